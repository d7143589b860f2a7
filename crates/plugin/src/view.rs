use crate::tree::ConcreteNode;
use scopemux_api::SourceRange;

/// Engine-neutral, object-safe read view of a concrete node bound to its
/// source text. Language adapters inspect syntax only through this trait.
pub trait NodeView {
    fn kind(&self) -> &str;

    fn text(&self) -> &str;

    fn range(&self) -> SourceRange;

    fn field(&self, name: &str) -> Option<Box<dyn NodeView + '_>>;

    fn named_children(&self) -> Vec<Box<dyn NodeView + '_>>;

    fn field_text(&self, name: &str) -> Option<String> {
        self.field(name).map(|f| f.text().to_string())
    }
}

/// A concrete node paired with the source it was parsed from.
#[derive(Debug, Clone, Copy)]
pub struct BoundNode<'s, N> {
    pub node: N,
    pub source: &'s str,
}

impl<'s, N: ConcreteNode> BoundNode<'s, N> {
    pub fn new(node: N, source: &'s str) -> Self {
        Self { node, source }
    }
}

impl<'s, N: ConcreteNode + 's> NodeView for BoundNode<'s, N> {
    fn kind(&self) -> &str {
        self.node.kind()
    }

    fn text(&self) -> &str {
        self.node.text(self.source)
    }

    fn range(&self) -> SourceRange {
        self.node.point_range()
    }

    fn field(&self, name: &str) -> Option<Box<dyn NodeView + '_>> {
        self.node
            .child_by_field(name)
            .map(|n| Box::new(BoundNode::new(n, self.source)) as Box<dyn NodeView + '_>)
    }

    fn named_children(&self) -> Vec<Box<dyn NodeView + '_>> {
        self.node
            .named_children()
            .into_iter()
            .map(|n| Box::new(BoundNode::new(n, self.source)) as Box<dyn NodeView + '_>)
            .collect()
    }
}

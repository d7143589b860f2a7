use super::range::SourceRange;
use schemars::JsonSchema;
use serde::Serialize;

/// Full-fidelity mirror of one concrete-tree node.
///
/// `syntax_type` is the grammar's interned kind string and is never copied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct CstNode {
    #[schemars(with = "String")]
    pub syntax_type: &'static str,
    /// Covered source text; set on leaves only.
    pub content: Option<String>,
    pub source_range: SourceRange,
    pub children: Vec<CstNode>,
}

impl CstNode {
    pub fn new(syntax_type: &'static str, content: Option<String>, source_range: SourceRange) -> Self {
        Self {
            syntax_type,
            content,
            source_range,
            children: Vec::new(),
        }
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }

    /// Length of the longest root-to-leaf path, counting nodes.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 1usize)];
        while let Some((node, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            stack.extend(node.children.iter().map(|c| (c, depth + 1)));
        }
        deepest
    }

    /// Pre-order walk.
    pub fn walk(&self) -> impl Iterator<Item = &CstNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

// Deep concrete trees (long expression chains, generated code) would blow
// the stack under the derived recursive drop.
impl Drop for CstNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(depth: usize) -> CstNode {
        let mut node = CstNode::new("leaf", None, SourceRange::default());
        for _ in 0..depth {
            let mut parent = CstNode::new("wrap", None, SourceRange::default());
            parent.children.push(node);
            node = parent;
        }
        node
    }

    #[test]
    fn deep_chains_drop_without_recursion() {
        let node = chain(200_000);
        assert_eq!(node.node_count(), 200_001);
        drop(node);
    }

    #[test]
    fn walk_is_preorder() {
        let mut root = CstNode::new("root", None, SourceRange::default());
        let mut a = CstNode::new("a", None, SourceRange::default());
        a.children.push(CstNode::new("a1", None, SourceRange::default()));
        root.children.push(a);
        root.children.push(CstNode::new("b", None, SourceRange::default()));
        let order: Vec<_> = root.walk().map(|n| n.syntax_type).collect();
        assert_eq!(order, vec!["root", "a", "a1", "b"]);
        assert_eq!(root.depth(), 3);
    }
}

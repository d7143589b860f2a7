use scopemux_api::CstNode;
use scopemux_plugin::ConcreteNode;

/// Result of mirroring a concrete tree.
#[derive(Debug)]
pub struct CstOutcome {
    pub root: CstNode,
    pub node_count: usize,
    /// Set when `max_depth` cut off part of the tree.
    pub truncated: bool,
}

struct Frame<N> {
    children: Vec<N>,
    next: usize,
    depth: usize,
    built: CstNode,
}

impl<N: ConcreteNode> Frame<N> {
    fn open(node: N, source: &str, depth: usize) -> Self {
        let children = node.children();
        // Interior text is the concatenation of its leaves; only leaves copy.
        let content = children
            .is_empty()
            .then(|| node.text(source).to_string());
        Self {
            children,
            next: 0,
            depth,
            built: CstNode::new(node.kind(), content, node.point_range()),
        }
    }
}

/// Mirrors `root` and every descendant 1:1 into owned [`CstNode`]s.
/// Leaves carry their source text; interior nodes carry only a range.
///
/// The walk keeps its own stack, so input depth is bounded by memory
/// rather than by the thread stack.
pub fn build_cst<N: ConcreteNode>(root: N, source: &str, max_depth: Option<usize>) -> CstOutcome {
    let mut truncated = false;
    let mut node_count = 1;
    let mut open: Vec<Frame<N>> = Vec::new();
    let mut current = Frame::open(root, source, 1);

    loop {
        if current.next < current.children.len() {
            if max_depth.is_some_and(|max| current.depth >= max) {
                truncated = true;
                current.next = current.children.len();
                continue;
            }
            let child = current.children[current.next];
            current.next += 1;
            let frame = Frame::open(child, source, current.depth + 1);
            open.push(std::mem::replace(&mut current, frame));
            node_count += 1;
            continue;
        }

        match open.pop() {
            Some(parent) => {
                let done = std::mem::replace(&mut current, parent);
                current.built.children.push(done.built);
            }
            None => {
                return CstOutcome {
                    root: current.built,
                    node_count,
                    truncated,
                };
            }
        }
    }
}

/// Childless stand-in returned when the walk faults.
pub fn minimal_cst<N: ConcreteNode>(root: N) -> CstNode {
    CstNode::new(root.kind(), None, root.point_range())
}

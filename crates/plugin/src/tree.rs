//! Capability surface over an external incremental parsing engine.
//!
//! Builders are written against these traits only; the tree-sitter
//! implementation lives in `scopemux_core::syntax`.

use crate::error::PluginResult;
use scopemux_api::{Language, SourceRange};
use std::fmt::Debug;
use std::ops::Range;

/// A node of a concrete (engine-owned) syntax tree.
pub trait ConcreteNode: Copy + Debug {
    /// Grammar kind; interned by the engine for the whole process.
    fn kind(&self) -> &'static str;

    /// Identity that is stable for the lifetime of the tree.
    fn id(&self) -> usize;

    fn is_named(&self) -> bool;

    /// True for error and missing nodes produced by recovery.
    fn is_error(&self) -> bool;

    fn byte_range(&self) -> Range<usize>;

    fn point_range(&self) -> SourceRange;

    fn child_count(&self) -> usize;

    fn child(&self, index: usize) -> Option<Self>;

    fn child_by_field(&self, field: &str) -> Option<Self>;

    fn parent(&self) -> Option<Self>;

    fn children(&self) -> Vec<Self> {
        (0..self.child_count()).filter_map(|i| self.child(i)).collect()
    }

    fn named_children(&self) -> Vec<Self> {
        self.children().into_iter().filter(|c| c.is_named()).collect()
    }

    /// Slice of `source` covered by this node. Empty when the range does
    /// not fall on character boundaries of `source`.
    fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.byte_range()).unwrap_or("")
    }
}

/// A parsed concrete tree.
pub trait ConcreteTree {
    type Node<'a>: ConcreteNode
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;
}

/// One (capture-role, concrete-node) pair of a match.
#[derive(Debug, Clone, Copy)]
pub struct Capture<'q, N> {
    pub role: &'q str,
    pub node: N,
}

/// One match of a declarative query, captures in engine order.
#[derive(Debug, Clone)]
pub struct QueryMatch<'q, N> {
    pub pattern_index: usize,
    pub captures: Vec<Capture<'q, N>>,
}

/// Node type of an engine's trees.
pub type NodeOf<'t, E> = <<E as SyntaxEngine>::Tree as ConcreteTree>::Node<'t>;

/// "parse bytes -> concrete tree" and "run a pattern over a tree -> matches".
///
/// Implementations are shared read-only between sessions.
pub trait SyntaxEngine: Send + Sync {
    type Tree: ConcreteTree;
    type Query: Send + Sync;

    fn supports(&self, language: &Language) -> bool;

    fn parse(&self, source: &[u8], language: &Language) -> PluginResult<Self::Tree>;

    /// Compile declarative query text. Malformed text is an error.
    fn compile_query(&self, language: &Language, source: &str) -> PluginResult<Self::Query>;

    /// Execute `query` under `node`, yielding matches in engine order.
    fn run_query<'q, 't>(
        &self,
        query: &'q Self::Query,
        node: NodeOf<'t, Self>,
        source: &[u8],
    ) -> PluginResult<Vec<QueryMatch<'q, NodeOf<'t, Self>>>>
    where
        Self::Tree: 't;
}

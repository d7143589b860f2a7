//! tree-sitter implementation of the concrete tree capability.

mod ts;

pub use ts::{TreeSitterEngine, TsNode, TsQuery, TsTree, range_from_ts};

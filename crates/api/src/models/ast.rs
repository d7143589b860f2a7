use super::kind::NodeKind;
use super::range::SourceRange;
use crate::error::{ApiError, ApiResult};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Handle to an AST node living in a session arena.
///
/// A handle records the arena epoch it was issued under, so handles that
/// survive a `clear` are rejected instead of aliasing a fresh node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    pub(crate) arena: u32,
    pub(crate) epoch: u32,
    pub(crate) slot: u32,
}

impl NodeId {
    pub fn new(arena: u32, epoch: u32, slot: u32) -> Self {
        Self { arena, epoch, slot }
    }

    pub fn arena(&self) -> u32 {
        self.arena
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn slot(&self) -> usize {
        self.slot as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}:{}", self.arena, self.epoch, self.slot)
    }
}

/// Payload of a normalized AST node.
///
/// Structural edges (parent, children, references) are owned by the arena
/// the node lives in, so hooks holding `&mut AstNode` can rewrite fields
/// without being able to break the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstNode {
    pub kind: NodeKind,
    pub name: String,
    pub qualified_name: String,
    pub source_range: SourceRange,
    pub signature: Option<String>,
    pub docstring: Option<String>,
    pub raw_content: Option<String>,
    pub file_path: Option<String>,
    pub properties: IndexMap<String, String>,
}

impl AstNode {
    /// Builds a node that is immediately usable as a tree root.
    /// The qualified name starts out equal to the name.
    pub fn new(kind: NodeKind, name: impl Into<String>, source_range: SourceRange) -> ApiResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ApiError::InvalidArgument(format!(
                "{} node requires a non-empty name",
                kind
            )));
        }
        Ok(Self {
            kind,
            qualified_name: name.clone(),
            name,
            source_range,
            signature: None,
            docstring: None,
            raw_content: None,
            file_path: None,
            properties: IndexMap::new(),
        })
    }

    pub fn with_qualified_name(mut self, qualified_name: impl Into<String>) -> Self {
        self.qualified_name = qualified_name.into();
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = Some(signature.into());
        self
    }

    pub fn with_raw_content(mut self, raw: impl Into<String>) -> Self {
        self.raw_content = Some(raw.into());
        self
    }

    pub fn with_file_path(mut self, path: impl Into<String>) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.properties.insert(key.into(), value.into());
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Rough heap footprint, used by allocation accounting.
    pub fn heap_size(&self) -> usize {
        let opt = |s: &Option<String>| s.as_ref().map_or(0, String::capacity);
        self.name.capacity()
            + self.qualified_name.capacity()
            + opt(&self.signature)
            + opt(&self.docstring)
            + opt(&self.raw_content)
            + opt(&self.file_path)
            + self
                .properties
                .iter()
                .map(|(k, v)| k.capacity() + v.capacity())
                .sum::<usize>()
    }
}

/// Owned, serializable snapshot of an AST subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AstView {
    pub kind: NodeKind,
    pub name: String,
    pub qualified_name: String,
    pub signature: Option<String>,
    pub docstring: Option<String>,
    pub raw_content: Option<String>,
    pub file_path: Option<String>,
    pub source_range: SourceRange,
    #[schemars(with = "std::collections::BTreeMap<String, String>")]
    pub properties: IndexMap<String, String>,
    pub children: Vec<AstView>,
}

impl AstView {
    pub fn from_node(node: &AstNode, children: Vec<AstView>) -> Self {
        Self {
            kind: node.kind,
            name: node.name.clone(),
            qualified_name: node.qualified_name.clone(),
            signature: node.signature.clone(),
            docstring: node.docstring.clone(),
            raw_content: node.raw_content.clone(),
            file_path: node.file_path.clone(),
            source_range: node.source_range,
            properties: node.properties.clone(),
            children,
        }
    }

    /// Depth-first search by qualified name.
    pub fn find(&self, qualified_name: &str) -> Option<&AstView> {
        if self.qualified_name == qualified_name {
            return Some(self);
        }
        self.children.iter().find_map(|c| c.find(qualified_name))
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstView::node_count).sum::<usize>()
    }
}

use crate::error::Result;
use scopemux_api::NodeKind;
use serde::{Deserialize, Serialize};

/// Canonical kind for include-class constructs under a schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IncludeKind {
    #[default]
    Include,
    Import,
}

impl IncludeKind {
    pub fn node_kind(&self) -> NodeKind {
        match self {
            IncludeKind::Include => NodeKind::Include,
            IncludeKind::Import => NodeKind::Import,
        }
    }
}

/// Tunables of the normalization pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Max lines between a preceding comment and the construct it documents.
    pub docstring_window: usize,
    pub reorder_root_children: bool,
    pub strip_comment_nodes: bool,
    pub include_kind: IncludeKind,
    pub contain_faults: bool,
    pub root_name: String,
    pub max_cst_depth: Option<usize>,
    /// Link definitions to the in-file definitions they call or extend.
    pub resolve_references: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            docstring_window: 5,
            reorder_root_children: true,
            strip_comment_nodes: true,
            include_kind: IncludeKind::Include,
            contain_faults: true,
            root_name: "ROOT".to_string(),
            max_cst_depth: None,
            resolve_references: true,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = EngineConfig::from_json(r#"{ "include_kind": "import", "docstring_window": 2 }"#)
            .unwrap();
        assert_eq!(cfg.include_kind.node_kind(), NodeKind::Import);
        assert_eq!(cfg.docstring_window, 2);
        assert!(cfg.contain_faults);
        assert_eq!(cfg.root_name, "ROOT");
        assert!(cfg.resolve_references);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(EngineConfig::from_json("{ docstring_window: }").is_err());
    }
}

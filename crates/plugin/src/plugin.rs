use crate::adapter::LanguageAdapter;
use crate::pass::ExtractionPass;
use scopemux_api::Language;
use std::sync::Arc;

/// Metadata for a plugin (plugin's own information).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PluginInfo {
    pub id: String,
    pub name: String,
    pub version: String,
    pub description: Option<String>,
}

/// Declarative query text for one (language, pass) pair.
#[derive(Debug, Clone, Copy)]
pub struct QueryResource {
    pub pass: ExtractionPass,
    pub source: &'static str,
}

impl QueryResource {
    pub const fn new(pass: ExtractionPass, source: &'static str) -> Self {
        Self { pass, source }
    }
}

/// Everything the engine needs to support one language.
pub trait LanguagePlugin: Send + Sync {
    fn info(&self) -> PluginInfo;

    fn language(&self) -> Language;

    /// Supported file extensions
    fn supported_extensions(&self) -> &[&str];

    /// Grammar handed to the tree-sitter engine.
    fn grammar(&self) -> tree_sitter::Language;

    /// One query per supported pass; passes without a query are skipped.
    fn queries(&self) -> Vec<QueryResource>;

    fn adapter(&self) -> Option<Arc<dyn LanguageAdapter>> {
        None
    }
}

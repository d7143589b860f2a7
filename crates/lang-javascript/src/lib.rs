//! JavaScript and TypeScript support.

pub mod adapter;
pub mod queries;

pub use adapter::{JavaScriptAdapter, TypeScriptAdapter};

use scopemux_api::Language;
use scopemux_plugin::{LanguageAdapter, LanguagePlugin, PluginInfo, QueryResource};
use std::sync::Arc;

#[derive(Debug, Default, Clone, Copy)]
pub struct JavaScriptPlugin;

impl JavaScriptPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for JavaScriptPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: "javascript".to_string(),
            name: "JavaScript".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: Some("ECMAScript modules and CommonJS".to_string()),
        }
    }

    fn language(&self) -> Language {
        Language::JAVASCRIPT
    }

    fn supported_extensions(&self) -> &[&str] {
        &["js", "mjs", "cjs", "jsx"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_javascript::LANGUAGE.into()
    }

    fn queries(&self) -> Vec<QueryResource> {
        queries::JAVASCRIPT_QUERIES.to_vec()
    }

    fn adapter(&self) -> Option<Arc<dyn LanguageAdapter>> {
        Some(Arc::new(JavaScriptAdapter))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct TypeScriptPlugin;

impl TypeScriptPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for TypeScriptPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: "typescript".to_string(),
            name: "TypeScript".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: None,
        }
    }

    fn language(&self) -> Language {
        Language::TYPESCRIPT
    }

    fn supported_extensions(&self) -> &[&str] {
        &["ts", "mts", "cts"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
    }

    fn queries(&self) -> Vec<QueryResource> {
        queries::TYPESCRIPT_QUERIES.to_vec()
    }

    fn adapter(&self) -> Option<Arc<dyn LanguageAdapter>> {
        Some(Arc::new(TypeScriptAdapter::new()))
    }
}

/// TypeScript with JSX. Shares the TypeScript queries and adapter rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct TsxPlugin;

impl TsxPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for TsxPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: "tsx".to_string(),
            name: "TSX".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: None,
        }
    }

    fn language(&self) -> Language {
        Language::TSX
    }

    fn supported_extensions(&self) -> &[&str] {
        &["tsx"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_typescript::LANGUAGE_TSX.into()
    }

    fn queries(&self) -> Vec<QueryResource> {
        queries::TYPESCRIPT_QUERIES.to_vec()
    }

    fn adapter(&self) -> Option<Arc<dyn LanguageAdapter>> {
        Some(Arc::new(TypeScriptAdapter::tsx()))
    }
}

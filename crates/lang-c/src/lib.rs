//! C and C++ support: grammars, per-pass queries and adapters.

pub mod adapter;
pub mod queries;

pub use adapter::{CAdapter, CppAdapter};

use scopemux_api::Language;
use scopemux_plugin::{LanguageAdapter, LanguagePlugin, PluginInfo, QueryResource};
use std::sync::Arc;

#[derive(Debug, Default, Clone, Copy)]
pub struct CPlugin;

impl CPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for CPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: "c".to_string(),
            name: "C".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: Some("C translation units and headers".to_string()),
        }
    }

    fn language(&self) -> Language {
        Language::C
    }

    fn supported_extensions(&self) -> &[&str] {
        &["c", "h"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_c::LANGUAGE.into()
    }

    fn queries(&self) -> Vec<QueryResource> {
        queries::C_QUERIES.to_vec()
    }

    fn adapter(&self) -> Option<Arc<dyn LanguageAdapter>> {
        Some(Arc::new(CAdapter))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CppPlugin;

impl CppPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for CppPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: "cpp".to_string(),
            name: "C++".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: None,
        }
    }

    fn language(&self) -> Language {
        Language::CPP
    }

    fn supported_extensions(&self) -> &[&str] {
        &["cpp", "cc", "cxx", "hpp", "hh", "hxx"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_cpp::LANGUAGE.into()
    }

    fn queries(&self) -> Vec<QueryResource> {
        queries::CPP_QUERIES.to_vec()
    }

    fn adapter(&self) -> Option<Arc<dyn LanguageAdapter>> {
        Some(Arc::new(CppAdapter))
    }
}

//! Python support.

pub mod adapter;
pub mod queries;

pub use adapter::PythonAdapter;

use scopemux_api::Language;
use scopemux_plugin::{LanguageAdapter, LanguagePlugin, PluginInfo, QueryResource};
use std::sync::Arc;

#[derive(Debug, Default, Clone, Copy)]
pub struct PythonPlugin;

impl PythonPlugin {
    pub fn new() -> Self {
        Self
    }
}

impl LanguagePlugin for PythonPlugin {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            id: "python".to_string(),
            name: "Python".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: Some("Python modules and stubs".to_string()),
        }
    }

    fn language(&self) -> Language {
        Language::PYTHON
    }

    fn supported_extensions(&self) -> &[&str] {
        &["py", "pyi"]
    }

    fn grammar(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    fn queries(&self) -> Vec<QueryResource> {
        queries::PYTHON_QUERIES.to_vec()
    }

    fn adapter(&self) -> Option<Arc<dyn LanguageAdapter>> {
        Some(Arc::new(PythonAdapter))
    }
}

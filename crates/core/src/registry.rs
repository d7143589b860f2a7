use scopemux_api::Language;
use scopemux_plugin::LanguageAdapter;
use std::collections::HashMap;
use std::sync::Arc;

/// Language id → adapter table.
///
/// Filled while the toolchain is assembled and read-only afterwards.
/// Registering a second adapter for a language replaces the first.
#[derive(Default, Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<Language, Arc<dyn LanguageAdapter>>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `adapter` under its own language; returns the adapter it replaced.
    pub fn register(&mut self, adapter: Arc<dyn LanguageAdapter>) -> Option<Arc<dyn LanguageAdapter>> {
        let language = adapter.language();
        let replaced = self.adapters.insert(language.clone(), adapter);
        if replaced.is_some() {
            tracing::info!(%language, "replaced previously registered adapter");
        }
        replaced
    }

    pub fn lookup(&self, language: &Language) -> Option<Arc<dyn LanguageAdapter>> {
        self.adapters.get(language).cloned()
    }

    pub fn contains(&self, language: &Language) -> bool {
        self.adapters.contains_key(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.adapters.keys()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl std::fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.adapters.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopemux_api::NodeKind;
    use scopemux_plugin::{NodeView, ParentScope};

    struct Tagged(&'static str);

    impl LanguageAdapter for Tagged {
        fn language(&self) -> Language {
            Language::PYTHON
        }

        fn extract_signature(&self, _node: &dyn NodeView) -> String {
            self.0.to_string()
        }
    }

    #[test]
    fn last_registration_wins() {
        let mut registry = AdapterRegistry::new();
        let second: Arc<dyn LanguageAdapter> = Arc::new(Tagged("second"));
        assert!(registry.register(Arc::new(Tagged("first"))).is_none());
        assert!(registry.register(second.clone()).is_some());
        assert_eq!(registry.len(), 1);

        let adapter = registry.lookup(&Language::PYTHON).unwrap();
        assert_eq!(Arc::as_ptr(&adapter) as *const (), Arc::as_ptr(&second) as *const ());

        let scope = ParentScope {
            kind: NodeKind::Root,
            qualified_name: None,
            base_filename: "m.py",
        };
        assert_eq!(adapter.generate_qualified_name("f", NodeKind::Function, &scope), "m.py.f");
        assert!(registry.lookup(&Language::C).is_none());
    }
}

use crate::catalog::{LanguageQueries, QueryCatalog};
use crate::config::EngineConfig;
use crate::error::{Result, ScopemuxError};
use crate::registry::AdapterRegistry;
use crate::syntax::TreeSitterEngine;
use scopemux_api::Language;
use scopemux_plugin::{LanguageAdapter, LanguagePlugin, PluginError, QueryResource, SyntaxEngine};
use std::collections::HashMap;
use std::sync::Arc;

/// Everything a session reads but never writes: the syntax engine with
/// its grammars, compiled queries, adapters and engine configuration.
///
/// Built once through [`ToolchainBuilder`], then shared via `Arc` by any
/// number of sessions on any number of threads.
pub struct Toolchain<E: SyntaxEngine = TreeSitterEngine> {
    engine: E,
    queries: QueryCatalog<E::Query>,
    adapters: AdapterRegistry,
    extensions: HashMap<String, Language>,
    config: EngineConfig,
}

impl<E: SyntaxEngine> Toolchain<E> {
    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn queries(&self) -> &QueryCatalog<E::Query> {
        &self.queries
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn supports(&self, language: &Language) -> bool {
        self.engine.supports(language)
    }

    pub fn adapter(&self, language: &Language) -> Option<Arc<dyn LanguageAdapter>> {
        self.adapters.lookup(language)
    }

    /// Language registered for the extension of `filename`, falling back to
    /// the built-in extension table, then to [`Language::UNKNOWN`].
    pub fn language_for(&self, filename: &str) -> Language {
        filename
            .rsplit_once('.')
            .and_then(|(_, ext)| self.extensions.get(&ext.to_ascii_lowercase()).cloned())
            .or_else(|| Language::from_filename(filename))
            .unwrap_or_default()
    }
}

impl<E: SyntaxEngine> std::fmt::Debug for Toolchain<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain")
            .field("adapters", &self.adapters)
            .field("extensions", &self.extensions.len())
            .field("config", &self.config)
            .finish()
    }
}

/// Compiles every resource of `language` with `engine`, letting the adapter
/// rewrite query text first. The first malformed query aborts the set.
fn compile_queries<E: SyntaxEngine>(
    engine: &E,
    language: &Language,
    resources: &[QueryResource],
    adapter: Option<&dyn LanguageAdapter>,
) -> Result<LanguageQueries<E::Query>> {
    let mut compiled = LanguageQueries::new();
    for resource in resources {
        let text = adapter
            .and_then(|a| a.pre_process_query(resource.pass, resource.source))
            .unwrap_or_else(|| resource.source.to_string());
        let query = engine.compile_query(language, &text).map_err(|e| match e {
            PluginError::Query { message, .. } => ScopemuxError::Query {
                language: language.clone(),
                pass: resource.pass,
                message,
            },
            other => other.into(),
        })?;
        if compiled.insert(resource.pass, query).is_some() {
            tracing::warn!(%language, pass = %resource.pass, "duplicate query resource; keeping the last one");
        }
    }
    Ok(compiled)
}

pub struct ToolchainBuilder<E: SyntaxEngine = TreeSitterEngine> {
    engine: E,
    queries: QueryCatalog<E::Query>,
    adapters: AdapterRegistry,
    extensions: HashMap<String, Language>,
    config: EngineConfig,
}

impl Default for ToolchainBuilder<TreeSitterEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolchainBuilder<TreeSitterEngine> {
    pub fn new() -> Self {
        Self::with_engine(TreeSitterEngine::new())
    }

    /// Registers a plugin's grammar, adapter and queries.
    ///
    /// A malformed query leaves the language unregistered and is returned
    /// as [`ScopemuxError::Query`].
    pub fn register_plugin(&mut self, plugin: &dyn LanguagePlugin) -> Result<&mut Self> {
        let language = plugin.language();
        let adapter = plugin.adapter();

        self.engine.register_grammar(language.clone(), plugin.grammar());
        let compiled = match compile_queries(
            &self.engine,
            &language,
            &plugin.queries(),
            adapter.as_deref(),
        ) {
            Ok(compiled) => compiled,
            Err(e) => {
                self.engine.remove_grammar(&language);
                tracing::error!(%language, plugin = %plugin.info().id, "plugin rejected: {}", e);
                return Err(e);
            }
        };

        tracing::info!(%language, passes = compiled.len(), "registered language plugin");
        self.queries.install(language.clone(), compiled);
        if let Some(adapter) = adapter {
            self.adapters.register(adapter);
        }
        for ext in plugin.supported_extensions() {
            self.extensions
                .insert(ext.trim_start_matches('.').to_ascii_lowercase(), language.clone());
        }
        Ok(self)
    }
}

impl<E: SyntaxEngine> ToolchainBuilder<E> {
    pub fn with_engine(engine: E) -> Self {
        Self {
            engine,
            queries: QueryCatalog::new(),
            adapters: AdapterRegistry::new(),
            extensions: HashMap::new(),
            config: EngineConfig::default(),
        }
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Registers (or replaces) the adapter for its language.
    pub fn register_adapter(&mut self, adapter: Arc<dyn LanguageAdapter>) -> &mut Self {
        self.adapters.register(adapter);
        self
    }

    /// Compiles and installs query text for a language the engine already
    /// supports, replacing any previous set.
    pub fn register_queries(&mut self, language: Language, resources: &[QueryResource]) -> Result<&mut Self> {
        let adapter = self.adapters.lookup(&language);
        let compiled = compile_queries(&self.engine, &language, resources, adapter.as_deref())?;
        self.queries.install(language, compiled);
        Ok(self)
    }

    pub fn build(self) -> Arc<Toolchain<E>> {
        Arc::new(Toolchain {
            engine: self.engine,
            queries: self.queries,
            adapters: self.adapters,
            extensions: self.extensions,
            config: self.config,
        })
    }
}

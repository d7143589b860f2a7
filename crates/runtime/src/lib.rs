use once_cell::sync::Lazy;
use rayon::prelude::*;
use scopemux_api::{Language, ParseOutput};
use scopemux_core::{EngineConfig, ParseMode, ParserContext, Result, Toolchain, ToolchainBuilder};
use scopemux_plugin::LanguagePlugin;
use std::path::{Path, PathBuf};
use std::sync::Arc;

static DEFAULT_TOOLCHAIN: Lazy<Arc<Toolchain>> = Lazy::new(|| build_toolchain(EngineConfig::default()));

fn bundled_plugins() -> Vec<Box<dyn LanguagePlugin>> {
    vec![
        Box::new(scopemux_c::CPlugin::new()),
        Box::new(scopemux_c::CppPlugin::new()),
        Box::new(scopemux_python::PythonPlugin::new()),
        Box::new(scopemux_javascript::JavaScriptPlugin::new()),
        Box::new(scopemux_javascript::TypeScriptPlugin::new()),
        Box::new(scopemux_javascript::TsxPlugin::new()),
    ]
}

/// Assembles a toolchain with every bundled language plugin.
///
/// A plugin that fails to register is logged and left out; the remaining
/// languages stay usable.
pub fn build_toolchain(config: EngineConfig) -> Arc<Toolchain> {
    let mut builder = ToolchainBuilder::new().config(config);
    for plugin in bundled_plugins() {
        if let Err(e) = builder.register_plugin(plugin.as_ref()) {
            tracing::error!("Failed to load {} plugin: {}", plugin.info().name, e);
        }
    }
    builder.build()
}

/// The process-wide toolchain with default configuration, built on first use.
pub fn default_toolchain() -> Arc<Toolchain> {
    Arc::clone(&DEFAULT_TOOLCHAIN)
}

/// A fresh session over the default toolchain.
pub fn new_session(mode: ParseMode) -> ParserContext {
    ParserContext::new(default_toolchain()).with_mode(mode)
}

/// Initializes the logging system for a specific component.
/// This delegates to the core logging module.
pub fn init_logging(component: &str) -> Option<impl Drop> {
    Some(scopemux_core::logging::init_logging(component, false))
}

/// Parses `source` in a throwaway session and returns its outputs.
pub fn parse_source(
    source: &str,
    language: &Language,
    filename: Option<&str>,
    mode: ParseMode,
) -> Result<Vec<ParseOutput>> {
    let mut ctx = new_session(mode);
    ctx.parse_str(source, language, filename)?;
    ctx.outputs()
}

/// Parses each file on the rayon pool, one session per file.
pub fn parse_files(paths: &[PathBuf], mode: ParseMode) -> Vec<(PathBuf, Result<Vec<ParseOutput>>)> {
    let toolchain = default_toolchain();
    paths
        .par_iter()
        .map(|path| {
            let result = parse_file_with(&toolchain, path, mode);
            if let Err(e) = &result {
                tracing::warn!(path = %path.display(), "parse failed: {}", e);
            }
            (path.clone(), result)
        })
        .collect()
}

fn parse_file_with(toolchain: &Arc<Toolchain>, path: &Path, mode: ParseMode) -> Result<Vec<ParseOutput>> {
    let mut ctx = ParserContext::new(Arc::clone(toolchain)).with_mode(mode);
    ctx.parse_path(path)?;
    ctx.outputs()
}

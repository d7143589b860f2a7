use scopemux_api::Language;
use scopemux_core::{EngineConfig, ParserContext, Toolchain, ToolchainBuilder};
use std::sync::Arc;

#[allow(dead_code)]
pub fn toolchain_with(config: EngineConfig) -> Arc<Toolchain> {
    let mut builder = ToolchainBuilder::new().config(config);
    builder
        .register_plugin(&scopemux_c::CPlugin::new())
        .expect("C plugin should register");
    builder
        .register_plugin(&scopemux_python::PythonPlugin::new())
        .expect("Python plugin should register");
    builder.build()
}

#[allow(dead_code)]
pub fn toolchain() -> Arc<Toolchain> {
    toolchain_with(EngineConfig::default())
}

#[allow(dead_code)]
pub fn parse_c(source: &str, filename: &str) -> ParserContext {
    let mut ctx = ParserContext::new(toolchain());
    ctx.parse_str(source, &Language::C, Some(filename))
        .expect("parse should succeed");
    ctx
}

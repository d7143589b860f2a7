use scopemux_api::{AstNode, Language, NodeId};
use scopemux_core::{ParserContext, Toolchain, ToolchainBuilder};
use scopemux_python::PythonPlugin;
use std::sync::Arc;

#[allow(dead_code)]
pub fn python_toolchain() -> Arc<Toolchain> {
    let mut builder = ToolchainBuilder::new();
    builder
        .register_plugin(&PythonPlugin::new())
        .expect("Python plugin should register");
    builder.build()
}

#[allow(dead_code)]
pub fn parse(source: &str, filename: &str) -> ParserContext {
    let mut ctx = ParserContext::new(python_toolchain());
    ctx.parse_str(source, &Language::PYTHON, Some(filename))
        .expect("parse should succeed");
    ctx
}

#[allow(dead_code)]
pub fn children_of<'a>(ctx: &'a ParserContext, id: NodeId) -> Vec<&'a AstNode> {
    ctx.children(id)
        .unwrap()
        .iter()
        .map(|child| ctx.node(*child).unwrap())
        .collect()
}

use scopemux_api::{AstNode, Language, NodeId};
use scopemux_c::{CPlugin, CppPlugin};
use scopemux_core::{ParserContext, Toolchain, ToolchainBuilder};
use std::sync::Arc;

#[allow(dead_code)]
pub fn c_toolchain() -> Arc<Toolchain> {
    let mut builder = ToolchainBuilder::new();
    builder
        .register_plugin(&CPlugin::new())
        .expect("C plugin should register");
    builder
        .register_plugin(&CppPlugin::new())
        .expect("C++ plugin should register");
    builder.build()
}

#[allow(dead_code)]
pub fn parse(source: &str, language: Language, filename: &str) -> ParserContext {
    let mut ctx = ParserContext::new(c_toolchain());
    ctx.parse_str(source, &language, Some(filename))
        .expect("parse should succeed");
    ctx
}

/// Root children with their nodes, in output order.
#[allow(dead_code)]
pub fn root_children(ctx: &ParserContext) -> Vec<(NodeId, &AstNode)> {
    let root = ctx.ast_root().expect("AST root");
    ctx.children(root)
        .unwrap()
        .iter()
        .map(|id| (*id, ctx.node(*id).unwrap()))
        .collect()
}

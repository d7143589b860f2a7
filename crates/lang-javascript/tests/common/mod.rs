use scopemux_api::{AstNode, Language, NodeId, NodeKind};
use scopemux_core::{ParserContext, Toolchain, ToolchainBuilder};
use scopemux_javascript::{JavaScriptPlugin, TsxPlugin, TypeScriptPlugin};
use std::sync::Arc;

#[allow(dead_code)]
pub fn js_toolchain() -> Arc<Toolchain> {
    let mut builder = ToolchainBuilder::new();
    builder
        .register_plugin(&JavaScriptPlugin::new())
        .expect("JavaScript plugin should register");
    builder
        .register_plugin(&TypeScriptPlugin::new())
        .expect("TypeScript plugin should register");
    builder
        .register_plugin(&TsxPlugin::new())
        .expect("TSX plugin should register");
    builder.build()
}

/// Parses with the language resolved from `filename`.
#[allow(dead_code)]
pub fn parse(source: &str, filename: &str) -> ParserContext {
    let mut ctx = ParserContext::new(js_toolchain());
    ctx.parse_str(source, &Language::UNKNOWN, Some(filename))
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

#[allow(dead_code)]
pub fn names_of_kind(ctx: &ParserContext, kind: NodeKind) -> Vec<String> {
    ctx.nodes_of_kind(kind)
        .into_iter()
        .map(|id| ctx.node(id).unwrap().name.clone())
        .collect()
}

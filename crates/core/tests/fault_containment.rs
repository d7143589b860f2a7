mod common;

use common::toolchain_with;
use scopemux_api::{AstNode, DiagnosticCode, Language};
use scopemux_core::{EngineConfig, ErrorCode, ParserContext, ScopemuxError, Toolchain, ToolchainBuilder};
use scopemux_plugin::{AdapterContext, LanguageAdapter, PluginError, PluginResult};
use std::sync::Arc;

/// C adapter that faults on `explode` and rejects `reject`.
struct Volatile;

impl LanguageAdapter for Volatile {
    fn language(&self) -> Language {
        Language::C
    }

    fn process_special_cases(&self, node: &mut AstNode, _ctx: &AdapterContext<'_>) {
        if node.name == "explode" {
            panic!("adapter fault while processing {}", node.name);
        }
    }

    fn enforce_schema(&self, node: &mut AstNode, _ctx: &AdapterContext<'_>) -> PluginResult<()> {
        if node.name == "reject" {
            return Err(PluginError::Adapter("name is reserved".into()));
        }
        Ok(())
    }
}

fn volatile_toolchain(config: EngineConfig) -> Arc<Toolchain> {
    let mut builder = ToolchainBuilder::new().config(config);
    builder
        .register_plugin(&scopemux_c::CPlugin::new())
        .unwrap()
        .register_adapter(Arc::new(Volatile));
    builder.build()
}

#[test]
fn test_fault_leaves_minimal_tree_and_usable_session() {
    let mut ctx = ParserContext::new(volatile_toolchain(EngineConfig::default()));
    let source = "int keep(void) { return 0; }\nint explode(void) { return 1; }\n";

    let err = ctx.parse_str(source, &Language::C, Some("boom.c")).unwrap_err();
    assert!(matches!(err, ScopemuxError::Fatal(_)));
    assert_eq!(ctx.last_error().unwrap().code, ErrorCode::Fatal);
    assert!(
        ctx.diagnostics()
            .iter()
            .any(|d| d.code == DiagnosticCode::FatalFault)
    );

    let root = ctx.ast_root().expect("minimal root survives");
    assert!(ctx.children(root).unwrap().is_empty());
    assert_eq!(ctx.node(root).unwrap().qualified_name, "boom.c");
    assert_eq!(ctx.live_nodes(), 1);

    // The CST walk is independent of the adapter and completes.
    assert!(ctx.cst_root().unwrap().node_count() > 10);
    assert_eq!(ctx.outputs().unwrap().len(), 2);

    ctx.parse_str("int calm(void) { return 0; }", &Language::C, Some("calm.c"))
        .unwrap();
    assert!(ctx.last_error().is_none());
    assert!(ctx.find_by_qualified_name("calm.c.calm").is_some());
}

#[test]
fn test_compliance_failure_is_reported_not_fatal() {
    let mut ctx = ParserContext::new(volatile_toolchain(EngineConfig::default()));
    ctx.parse_str("int reject;\nint fine;\n", &Language::C, Some("names.c"))
        .unwrap();

    let failures: Vec<_> = ctx
        .diagnostics()
        .iter()
        .filter(|d| d.code == DiagnosticCode::ComplianceFailed)
        .collect();
    assert_eq!(failures.len(), 1);
    assert!(failures[0].message.contains("names.c.reject"));
    assert!(ctx.find_by_qualified_name("names.c.reject").is_some());
    assert!(ctx.find_by_qualified_name("names.c.fine").is_some());
}

#[test]
fn test_containment_can_be_disabled() {
    let config = EngineConfig {
        contain_faults: false,
        ..EngineConfig::default()
    };
    let mut ctx = ParserContext::new(volatile_toolchain(config));
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        ctx.parse_str("int explode(void) { return 1; }", &Language::C, Some("raw.c"))
    }));
    assert!(outcome.is_err());
}

#[test]
fn test_default_toolchain_has_no_faults() {
    let mut ctx = ParserContext::new(toolchain_with(EngineConfig::default()));
    ctx.parse_str("int explode(void) { return 1; }", &Language::C, Some("ok.c"))
        .unwrap();
    assert!(ctx.diagnostics().is_empty());
}

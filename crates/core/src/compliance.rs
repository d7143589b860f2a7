use crate::config::EngineConfig;
use crate::error::LifecycleError;
use crate::guard::{NodeArena, contain_if};
use crate::build::capture::placeholder_name;
use scopemux_api::{AstNode, Diagnostic, DiagnosticCode, NodeId, NodeKind};
use scopemux_plugin::{AdapterContext, LanguageAdapter, PluginError, UNNAMED_NODE};

fn fill_identity(node: &mut AstNode) {
    if node.name.trim().is_empty() {
        node.name = placeholder_name(node.kind);
    }
    if node.qualified_name.trim().is_empty() {
        node.qualified_name = if node.name.is_empty() {
            UNNAMED_NODE.to_string()
        } else {
            node.name.clone()
        };
    }
}

/// Final normalization over the tree under `root`.
///
/// Generic rules run first: every node gets a non-empty name and
/// qualified name, and include-class nodes take the configured canonical
/// kind. The adapter's `enforce_schema` runs afterwards on each node; a
/// failing or faulting callback is logged and reported, and the walk
/// continues with the next node.
pub fn enforce_schema(
    arena: &mut NodeArena,
    root: NodeId,
    config: &EngineConfig,
    adapter: Option<&dyn LanguageAdapter>,
    ctx: &AdapterContext<'_>,
) -> Result<Vec<Diagnostic>, LifecycleError> {
    let include_kind = config.include_kind.node_kind();
    let mut diagnostics = Vec::new();
    let mut stack = vec![root];

    while let Some(id) = stack.pop() {
        let node = arena.get_mut(id)?;
        fill_identity(node);
        if matches!(node.kind, NodeKind::Include | NodeKind::Import) && node.kind != include_kind {
            node.kind = include_kind;
        }

        if let Some(adapter) = adapter {
            let outcome = contain_if(
                config.contain_faults,
                "compliance",
                || adapter.enforce_schema(node, ctx),
                || Err(PluginError::Adapter("compliance callback faulted".into())),
            );
            let failure = match outcome.fatal_message().map(str::to_string) {
                Some(message) => Some(message),
                None => outcome.into_inner().err().map(|e| e.to_string()),
            };
            if let Some(message) = failure {
                tracing::warn!(language = %ctx.language, node = %id, "compliance callback failed: {}", message);
                diagnostics.push(Diagnostic::new(
                    DiagnosticCode::ComplianceFailed,
                    format!("{} ({}): {}", node.qualified_name, node.kind, message),
                ));
            }
            // The callback may have blanked what the generic rules filled.
            fill_identity(node);
        }

        stack.extend(arena.children(id)?.iter().rev().copied());
    }
    Ok(diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IncludeKind;
    use scopemux_api::{Language, SourceRange};
    use scopemux_plugin::PluginResult;

    struct Picky;

    impl LanguageAdapter for Picky {
        fn language(&self) -> Language {
            Language::C
        }

        fn enforce_schema(&self, node: &mut AstNode, _ctx: &AdapterContext<'_>) -> PluginResult<()> {
            match node.name.as_str() {
                "bad" => Err(PluginError::Adapter("rejected".into())),
                "boom" => panic!("callback blew up"),
                _ => {
                    node.set_property("checked", "true");
                    Ok(())
                }
            }
        }
    }

    fn build(arena: &mut NodeArena) -> (NodeId, Vec<NodeId>) {
        let root = arena.alloc(AstNode::new(NodeKind::Root, "ROOT", SourceRange::default()).unwrap());
        let mut ids = Vec::new();
        for (kind, name) in [
            (NodeKind::Include, "stdio.h"),
            (NodeKind::Function, "bad"),
            (NodeKind::Function, "boom"),
            (NodeKind::Variable, "ok"),
        ] {
            let mut node = AstNode::new(kind, name, SourceRange::default()).unwrap();
            node.qualified_name.clear();
            let id = arena.alloc(node);
            arena.add_child(root, id).unwrap();
            ids.push(id);
        }
        (root, ids)
    }

    #[test]
    fn callback_failures_do_not_abort_the_walk() {
        let mut arena = NodeArena::new();
        let (root, ids) = build(&mut arena);
        let config = EngineConfig {
            include_kind: IncludeKind::Import,
            ..EngineConfig::default()
        };
        let ctx = AdapterContext {
            language: &Language::C,
            filename: Some("main.c"),
            source: "",
        };

        let diagnostics = enforce_schema(&mut arena, root, &config, Some(&Picky), &ctx).unwrap();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.code == DiagnosticCode::ComplianceFailed));

        let include = arena.get(ids[0]).unwrap();
        assert_eq!(include.kind, NodeKind::Import);
        assert_eq!(include.qualified_name, "stdio.h");
        assert_eq!(arena.get(ids[3]).unwrap().property("checked"), Some("true"));
    }
}

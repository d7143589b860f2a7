use super::capture::{MalformedMatch, compose_signature, interpret, placeholder_name};
use crate::catalog::LanguageQueries;
use crate::config::EngineConfig;
use crate::error::{LifecycleError, Result};
use crate::guard::NodeArena;
use scopemux_api::{
    ApiError, AstNode, Diagnostic, DiagnosticCode, Language, NodeId, NodeKind, SourceRange,
};
use scopemux_plugin::utils::base_filename;
use scopemux_plugin::{
    AdapterContext, BoundNode, ConcreteNode, DotPathConvention, ExtractionPass, LanguageAdapter,
    MatchDisposition, NamingConvention, NodeOf, ParentScope, QueryMatch, SyntaxEngine,
    UNNAMED_NODE,
};
use std::collections::HashMap;

/// Why a single match was dropped.
#[derive(Debug, thiserror::Error)]
enum MatchFailure {
    #[error(transparent)]
    Malformed(#[from] MalformedMatch),
    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),
    #[error(transparent)]
    Model(#[from] ApiError),
}

/// Read-only inputs of one AST build.
pub struct AstBuildInput<'a, E: SyntaxEngine> {
    pub engine: &'a E,
    pub queries: Option<&'a LanguageQueries<E::Query>>,
    pub adapter: Option<&'a dyn LanguageAdapter>,
    pub config: &'a EngineConfig,
    pub language: &'a Language,
    pub source: &'a str,
    pub filename: Option<&'a str>,
}

impl<E: SyntaxEngine> AstBuildInput<'_, E> {
    fn adapter_context(&self) -> AdapterContext<'_> {
        AdapterContext {
            language: self.language,
            filename: self.filename,
            source: self.source,
        }
    }
}

#[derive(Debug)]
pub struct AstBuildOutput {
    pub root: NodeId,
    pub extracted: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Allocates the synthetic root: named after the config, qualified by the
/// base file name and carrying `filename`/`basename` properties.
pub fn create_root(
    arena: &mut NodeArena,
    config: &EngineConfig,
    filename: Option<&str>,
    range: SourceRange,
) -> Result<NodeId> {
    let base = base_filename(filename);
    let mut root = AstNode::new(NodeKind::Root, config.root_name.as_str(), range)?
        .with_qualified_name(base);
    if let Some(filename) = filename {
        root.file_path = Some(filename.to_string());
        root.set_property("filename", filename);
        root.set_property("basename", base);
    }
    Ok(arena.alloc(root))
}

/// Query-driven extraction over one concrete tree.
///
/// Passes run in [`ExtractionPass::ORDERED`]; within a pass, matches are
/// handled in engine order. Every node is registered with the arena before
/// it is linked, so a failure between the two still leaves it reachable
/// for teardown.
pub struct AstBuilder<'a, E: SyntaxEngine> {
    input: AstBuildInput<'a, E>,
    arena: &'a mut NodeArena,
    root: NodeId,
    extracted: usize,
    diagnostics: Vec<Diagnostic>,
    last_of_kind: HashMap<NodeKind, NodeId>,
    scopes: Vec<(SourceRange, NodeKind, NodeId)>,
    seen: HashMap<(NodeKind, SourceRange), NodeId>,
}

impl<'a, E: SyntaxEngine> AstBuilder<'a, E> {
    pub fn new(input: AstBuildInput<'a, E>, arena: &'a mut NodeArena, root: NodeId) -> Self {
        Self {
            input,
            arena,
            root,
            extracted: 0,
            diagnostics: Vec::new(),
            last_of_kind: HashMap::new(),
            scopes: Vec::new(),
            seen: HashMap::new(),
        }
    }

    pub fn run<'t>(mut self, tree_root: NodeOf<'t, E>) -> AstBuildOutput
    where
        E::Tree: 't,
    {
        if let Some(queries) = self.input.queries {
            for pass in ExtractionPass::ORDERED {
                // A language without a query for this pass has no such construct.
                let Some(query) = queries.get(pass) else {
                    continue;
                };
                self.run_pass(pass, query, tree_root);
            }
        }
        AstBuildOutput {
            root: self.root,
            extracted: self.extracted,
            diagnostics: self.diagnostics,
        }
    }

    fn run_pass<'t>(&mut self, pass: ExtractionPass, query: &E::Query, tree_root: NodeOf<'t, E>)
    where
        E::Tree: 't,
    {
        let matches = match self
            .input
            .engine
            .run_query(query, tree_root, self.input.source.as_bytes())
        {
            Ok(matches) => matches,
            Err(e) => {
                tracing::warn!(language = %self.input.language, %pass, "query execution failed: {}", e);
                self.diagnostics.push(Diagnostic::new(
                    DiagnosticCode::MatchSkipped,
                    format!("{pass} pass skipped: {e}"),
                ));
                return;
            }
        };

        tracing::debug!(language = %self.input.language, %pass, matches = matches.len(), "running pass");
        for m in &matches {
            match self.process_match(pass, m) {
                Ok(Some(_)) => self.extracted += 1,
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(%pass, pattern = m.pattern_index, "match skipped: {}", e);
                    self.diagnostics.push(Diagnostic::new(
                        DiagnosticCode::MatchSkipped,
                        format!("{pass}: {e}"),
                    ));
                }
            }
        }
    }

    fn process_match<N: ConcreteNode>(
        &mut self,
        pass: ExtractionPass,
        m: &QueryMatch<'_, N>,
    ) -> std::result::Result<Option<NodeId>, MatchFailure> {
        let source = self.input.source;
        let interpreted = interpret(pass, m, source)?;
        let mut construct = interpreted.construct;

        // Several patterns may describe one construct; a later one can only
        // contribute a docstring the first lacked.
        if let Some(existing) = self.seen.get(&(construct.kind, construct.range)) {
            let node = self.arena.get_mut(*existing)?;
            if node.docstring.is_none() {
                node.docstring = construct.docstring;
            }
            return Ok(None);
        }

        if construct.kind.is_callable() {
            construct.signature = self
                .input
                .adapter
                .map(|a| a.extract_signature(&BoundNode::new(interpreted.primary, source)))
                .filter(|s| !s.trim().is_empty());
        }

        let ctx = self.input.adapter_context();
        if let Some(adapter) = self.input.adapter {
            let primary = BoundNode::new(interpreted.primary, source);
            if adapter.post_process_match(&mut construct, &primary, &ctx) == MatchDisposition::Skip {
                tracing::debug!(%pass, kind = %construct.kind, "match vetoed by adapter");
                return Ok(None);
            }
        }

        let name = construct
            .name
            .take()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| placeholder_name(construct.kind));
        if construct.kind.is_callable() && construct.signature.is_none() {
            construct.signature = Some(compose_signature(
                &name,
                construct.params.as_deref(),
                construct.return_type.as_deref(),
            ));
        }

        let parent = self.resolve_parent(
            construct.kind,
            construct.enclosing,
            interpreted.enclosing_name.as_deref(),
            &construct.range,
        );
        let qualified_name = self.qualify(&name, construct.kind, parent)?;

        let mut node = AstNode::new(construct.kind, name, construct.range)?
            .with_qualified_name(qualified_name);
        node.signature = construct.signature;
        node.docstring = construct.docstring;
        node.raw_content = construct.raw_content;
        node.file_path = self.input.filename.map(str::to_string);
        node.properties = construct.properties;

        let id = self.arena.alloc_child(parent, node)?;

        if let Some(adapter) = self.input.adapter {
            adapter.process_special_cases(self.arena.get_mut(id)?, &ctx);
        }

        let kind = self.arena.get(id)?.kind;
        self.seen.insert((construct.kind, construct.range), id);
        self.last_of_kind.insert(kind, id);
        if kind.is_scope() || kind.is_callable() {
            self.adopt_enclosed(id, parent, &construct.range)?;
            self.scopes.push((construct.range, kind, id));
        }
        Ok(Some(id))
    }

    /// Moves earlier siblings lying inside `scope` under it. Passes run by
    /// construct type, so a namespace is built after the classes it holds.
    fn adopt_enclosed(
        &mut self,
        scope: NodeId,
        parent: NodeId,
        range: &SourceRange,
    ) -> std::result::Result<(), LifecycleError> {
        let mut adopted = Vec::new();
        for sibling in self.arena.children(parent)? {
            if *sibling == scope {
                continue;
            }
            let inner = self.arena.get(*sibling)?.source_range;
            if range.encloses(&inner) && inner != *range {
                adopted.push(*sibling);
            }
        }
        for id in adopted {
            self.arena.detach(id)?;
            self.arena.add_child(scope, id)?;
            self.requalify(id)?;
        }
        Ok(())
    }

    /// Recomputes qualified names of the subtree under `top`, parents first.
    fn requalify(&mut self, top: NodeId) -> std::result::Result<(), LifecycleError> {
        let mut stack = vec![top];
        while let Some(id) = stack.pop() {
            let parent = self.arena.parent(id)?.unwrap_or(self.root);
            let node = self.arena.get(id)?;
            let (name, kind) = (node.name.clone(), node.kind);
            let qualified = self.qualify(&name, kind, parent)?;
            self.arena.get_mut(id)?.qualified_name = qualified;
            stack.extend(self.arena.children(id)?.iter().copied());
        }
        Ok(())
    }

    /// Enclosing-role matches go under the innermost node of that kind
    /// containing them, else the latest type-like scope carrying the
    /// enclosing name, else the most recent node of that kind. Other
    /// matches go under the innermost enclosing scope or callable; methods
    /// only under type-like scopes.
    fn resolve_parent(
        &self,
        kind: NodeKind,
        enclosing: Option<NodeKind>,
        enclosing_name: Option<&str>,
        range: &SourceRange,
    ) -> NodeId {
        if let Some(wanted) = enclosing {
            return self
                .innermost(range, |k| k == wanted)
                .or_else(|| enclosing_name.and_then(|name| self.scope_named(name)))
                .or_else(|| self.last_of_kind.get(&wanted).copied())
                .unwrap_or(self.root);
        }
        if kind == NodeKind::Method {
            return self
                .innermost(range, |k| {
                    matches!(
                        k,
                        NodeKind::Class | NodeKind::Struct | NodeKind::Interface | NodeKind::Union
                    )
                })
                .unwrap_or(self.root);
        }
        self.innermost(range, |_| true).unwrap_or(self.root)
    }

    fn scope_named(&self, name: &str) -> Option<NodeId> {
        self.scopes.iter().rev().find_map(|(_, kind, id)| {
            let type_like = kind.is_scope() && *kind != NodeKind::Root;
            let node = self.arena.get(*id).ok()?;
            (type_like && node.name == name).then_some(*id)
        })
    }

    fn innermost(&self, range: &SourceRange, accept: impl Fn(NodeKind) -> bool) -> Option<NodeId> {
        self.scopes
            .iter()
            .filter(|(r, k, _)| accept(*k) && r.encloses(range) && r != range)
            .max_by_key(|(r, _, _)| (r.start, std::cmp::Reverse(r.end)))
            .map(|(_, _, id)| *id)
    }

    fn qualify(
        &self,
        name: &str,
        kind: NodeKind,
        parent: NodeId,
    ) -> std::result::Result<String, LifecycleError> {
        let parent_node = self.arena.get(parent)?;
        let scope = ParentScope {
            kind: parent_node.kind,
            qualified_name: Some(parent_node.qualified_name.as_str()).filter(|q| !q.is_empty()),
            base_filename: base_filename(self.input.filename),
        };
        let qualified = match self.input.adapter {
            Some(adapter) => adapter.generate_qualified_name(name, kind, &scope),
            None => DotPathConvention.qualify(name, kind, &scope),
        };
        Ok(if qualified.trim().is_empty() {
            UNNAMED_NODE.to_string()
        } else {
            qualified
        })
    }
}

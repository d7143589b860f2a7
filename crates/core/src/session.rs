//! Per-parse session.
//!
//! A [`ParserContext`] owns everything one parse produces: the concrete
//! tree (only while building), the AST node registry, the CST, the
//! diagnostics and the last-error slot. It shares nothing mutable with
//! other sessions; the [`Toolchain`] it reads from is immutable.

use crate::build::ast::{AstBuildInput, AstBuilder, create_root};
use crate::build::cst::{CstOutcome, build_cst, minimal_cst};
use crate::build::postprocess::finish_tree;
use crate::build::references::resolve_references;
use crate::compliance::enforce_schema;
use crate::error::{ErrorCode, LifecycleError, Result, ScopemuxError};
use crate::guard::{Contained, LeakReport, NodeArena, contain_if};
use crate::syntax::TreeSitterEngine;
use crate::toolchain::Toolchain;
use scopemux_api::{
    AstNode, AstView, CstNode, Diagnostic, DiagnosticCode, Language, NodeId, NodeKind, ParseOutput,
};
use scopemux_plugin::{AdapterContext, ConcreteNode, ConcreteTree, NodeOf, SyntaxEngine};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

/// Which trees a parse produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParseMode {
    Ast,
    Cst,
    #[default]
    Both,
}

impl ParseMode {
    pub fn wants_ast(&self) -> bool {
        matches!(self, ParseMode::Ast | ParseMode::Both)
    }

    pub fn wants_cst(&self) -> bool {
        matches!(self, ParseMode::Cst | ParseMode::Both)
    }
}

/// Contents of the session's single last-error slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LastError {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&ScopemuxError> for LastError {
    fn from(err: &ScopemuxError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

pub struct ParserContext<E: SyntaxEngine = TreeSitterEngine> {
    toolchain: Arc<Toolchain<E>>,
    mode: ParseMode,
    arena: NodeArena,
    ast_root: Option<NodeId>,
    cst_root: Option<CstNode>,
    diagnostics: Vec<Diagnostic>,
    last_error: Option<LastError>,
    source: Option<String>,
    filename: Option<String>,
    language: Language,
    cleared: bool,
}

fn build_ast<'t, E: SyntaxEngine>(
    input: AstBuildInput<'_, E>,
    arena: &mut NodeArena,
    root: NodeId,
    tree_root: NodeOf<'t, E>,
) -> Result<Vec<Diagnostic>>
where
    E::Tree: 't,
{
    let config = input.config;
    let source = input.source;
    let adapter = input.adapter;
    let output = AstBuilder::new(input, arena, root).run(tree_root);
    let mut diagnostics = output.diagnostics;
    tracing::debug!(extracted = output.extracted, "AST extraction finished");
    finish_tree(arena, root, config, source, &mut diagnostics)?;
    if let Some(adapter) = adapter.filter(|_| config.resolve_references) {
        resolve_references(arena, root, tree_root, source, adapter)?;
    }
    Ok(diagnostics)
}

impl<E: SyntaxEngine> ParserContext<E> {
    pub fn new(toolchain: Arc<Toolchain<E>>) -> Self {
        Self {
            toolchain,
            mode: ParseMode::default(),
            arena: NodeArena::new(),
            ast_root: None,
            cst_root: None,
            diagnostics: Vec::new(),
            last_error: None,
            source: None,
            filename: None,
            language: Language::UNKNOWN,
            cleared: true,
        }
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ParseMode) {
        self.mode = mode;
    }

    pub fn toolchain(&self) -> &Arc<Toolchain<E>> {
        &self.toolchain
    }

    /// Parses `source` and builds the trees selected by the mode.
    ///
    /// Prior results are cleared first. An unknown `language` is resolved
    /// from `filename` when one is given. Setup failures (unsupported
    /// language, engine failure) produce no tree. A contained fault still
    /// leaves a minimal tree behind and is reported as
    /// [`ScopemuxError::Fatal`].
    pub fn parse(&mut self, source: &[u8], language: &Language, filename: Option<&str>) -> Result<()> {
        if !self.cleared {
            self.clear();
        }
        self.cleared = false;

        let language = match (language.is_unknown(), filename) {
            (true, Some(filename)) => self.toolchain.language_for(filename),
            _ => language.clone(),
        };
        self.language = language.clone();
        self.filename = filename.map(str::to_string);

        let text = String::from_utf8_lossy(source).into_owned();
        let result = if self.toolchain.supports(&language) {
            self.run_pipeline(&language, filename, &text)
        } else {
            Err(ScopemuxError::UnsupportedLanguage(language.clone()))
        };
        self.source = Some(text);

        match result {
            Ok(()) => {
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                if e.code() == ErrorCode::Setup {
                    tracing::warn!(%language, "parse setup failed: {}", e);
                    self.diagnostics
                        .push(Diagnostic::new(DiagnosticCode::SetupError, e.to_string()));
                }
                Err(self.record(e))
            }
        }
    }

    pub fn parse_str(&mut self, source: &str, language: &Language, filename: Option<&str>) -> Result<()> {
        self.parse(source.as_bytes(), language, filename)
    }

    /// Reads `path` and parses it, resolving the language from its name.
    pub fn parse_path(&mut self, path: &Path) -> Result<()> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) => return Err(self.record(e.into())),
        };
        let filename = path.to_string_lossy();
        self.parse(&bytes, &Language::UNKNOWN, Some(&filename))
    }

    fn run_pipeline(&mut self, language: &Language, filename: Option<&str>, source: &str) -> Result<()> {
        let toolchain = Arc::clone(&self.toolchain);
        let config = toolchain.config();
        let tree = toolchain.engine().parse(source.as_bytes(), language)?;
        let tree_root = tree.root();
        let adapter = toolchain.adapter(language);
        let mut fatal: Option<String> = None;

        if self.mode.wants_ast() {
            let range = tree_root.point_range();
            let root = create_root(&mut self.arena, config, filename, range)?;
            let input = AstBuildInput {
                engine: toolchain.engine(),
                queries: toolchain.queries().for_language(language),
                adapter: adapter.as_deref(),
                config,
                language,
                source,
                filename,
            };
            let arena = &mut self.arena;
            let outcome = contain_if(
                config.contain_faults,
                "ast_build",
                || build_ast(input, arena, root, tree_root),
                || Err(ScopemuxError::Fatal("AST build faulted".into())),
            );
            let root = match outcome {
                Contained::Completed(diagnostics) => {
                    self.diagnostics.extend(diagnostics?);
                    root
                }
                Contained::Fatal { message, .. } => {
                    // Partially built nodes are released; only a bare root survives.
                    self.arena.clear();
                    self.diagnostics
                        .push(Diagnostic::new(DiagnosticCode::FatalFault, message.clone()));
                    fatal = Some(message);
                    create_root(&mut self.arena, config, filename, range)?
                }
            };

            let ctx = AdapterContext {
                language,
                filename,
                source,
            };
            let diagnostics = enforce_schema(&mut self.arena, root, config, adapter.as_deref(), &ctx)?;
            self.diagnostics.extend(diagnostics);
            self.ast_root = Some(root);
        }

        if self.mode.wants_cst() {
            let max_depth = config.max_cst_depth;
            let outcome = contain_if(
                config.contain_faults,
                "cst_build",
                || build_cst(tree_root, source, max_depth),
                || CstOutcome {
                    root: minimal_cst(tree_root),
                    node_count: 1,
                    truncated: false,
                },
            );
            if let Some(message) = outcome.fatal_message() {
                self.diagnostics
                    .push(Diagnostic::new(DiagnosticCode::FatalFault, message));
                fatal.get_or_insert_with(|| message.to_string());
            }
            let outcome = outcome.into_inner();
            if outcome.truncated {
                let message = format!(
                    "CST truncated at depth {}",
                    max_depth.unwrap_or_default()
                );
                tracing::error!(%language, nodes = outcome.node_count, "{}", message);
                self.diagnostics
                    .push(Diagnostic::new(DiagnosticCode::FatalFault, message.clone()));
                fatal.get_or_insert(message);
            }
            self.cst_root = Some(outcome.root);
        }

        drop(tree);
        match fatal {
            Some(message) => Err(ScopemuxError::Fatal(message)),
            None => Ok(()),
        }
    }

    /// Releases every tree and node of the last parse. Safe to call any
    /// number of times; handles from before the clear become stale.
    pub fn clear(&mut self) {
        if self.cleared {
            tracing::debug!("session already clear");
            return;
        }
        let freed = self.arena.clear();
        self.ast_root = None;
        self.cst_root = None;
        self.diagnostics.clear();
        self.source = None;
        self.filename = None;
        self.language = Language::UNKNOWN;
        self.cleared = true;
        tracing::debug!(freed, "session cleared");
    }

    fn record(&mut self, err: ScopemuxError) -> ScopemuxError {
        self.last_error = Some(LastError::from(&err));
        err
    }

    fn misuse(&mut self, err: ScopemuxError) -> ScopemuxError {
        self.diagnostics
            .push(Diagnostic::new(DiagnosticCode::LifecycleMisuse, err.to_string()));
        self.record(err)
    }

    /// Every fallible lifecycle call overwrites the last-error slot:
    /// cleared on success, set on misuse.
    fn settle<T>(&mut self, result: std::result::Result<T, LifecycleError>) -> Result<T> {
        match result {
            Ok(value) => {
                self.last_error = None;
                Ok(value)
            }
            Err(e) => Err(self.misuse(e.into())),
        }
    }

    pub fn ast_root(&self) -> Option<NodeId> {
        self.ast_root
    }

    pub fn cst_root(&self) -> Option<&CstNode> {
        self.cst_root.as_ref()
    }

    /// Moves the CST out of the session.
    pub fn take_cst(&mut self) -> Option<CstNode> {
        self.cst_root.take()
    }

    pub fn node(&self, id: NodeId) -> Result<&AstNode> {
        Ok(self.arena.get(id)?)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Result<&mut AstNode> {
        Ok(self.arena.get_mut(id)?)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.arena.children(id)?)
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.arena.parent(id)?)
    }

    pub fn references(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.arena.references(id)?)
    }

    /// Registers a caller-built node; it stays detached until linked with
    /// [`ParserContext::add_child`].
    pub fn alloc_node(&mut self, node: AstNode) -> NodeId {
        self.cleared = false;
        self.arena.alloc(node)
    }

    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let result = self.arena.add_child(parent, child);
        self.settle(result)
    }

    /// Non-owning link from `from` to `to`.
    pub fn add_reference(&mut self, from: NodeId, to: NodeId) -> Result<()> {
        let result = self.arena.add_reference(from, to);
        self.settle(result)
    }

    /// Destroys `id` and its subtree; returns the number of nodes freed.
    pub fn destroy_node(&mut self, id: NodeId) -> Result<usize> {
        let result = self.arena.destroy(id);
        let freed = self.settle(result)?;
        if self.ast_root == Some(id) {
            self.ast_root = None;
        }
        Ok(freed)
    }

    pub fn find_by_qualified_name(&self, qualified_name: &str) -> Option<NodeId> {
        self.arena.find_by_qualified_name(qualified_name)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> Vec<NodeId> {
        self.arena.nodes_of_kind(kind)
    }

    pub fn live_nodes(&self) -> usize {
        self.arena.live_count()
    }

    pub fn ast_view(&self) -> Result<Option<AstView>> {
        self.ast_root
            .map(|root| self.arena.view(root))
            .transpose()
            .map_err(Into::into)
    }

    /// One output per produced tree, AST first.
    pub fn outputs(&self) -> Result<Vec<ParseOutput>> {
        let mut outputs = Vec::new();
        if let Some(view) = self.ast_view()? {
            outputs.push(ParseOutput::ast(view, self.diagnostics.clone()));
        }
        if let Some(cst) = &self.cst_root {
            outputs.push(ParseOutput::cst(cst.clone(), self.diagnostics.clone()));
        }
        Ok(outputs)
    }

    pub fn last_error(&self) -> Option<&LastError> {
        self.last_error.as_ref()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn leak_report(&self) -> LeakReport {
        self.arena.leak_report()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn language(&self) -> &Language {
        &self.language
    }
}

impl<E: SyntaxEngine> Drop for ParserContext<E> {
    fn drop(&mut self) {
        self.clear();
    }
}

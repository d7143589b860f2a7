use scopemux_api::{Language, SourcePoint, SourceRange};
use scopemux_plugin::{
    Capture, ConcreteNode, ConcreteTree, PluginError, PluginResult, QueryMatch,
    SyntaxEngine,
};
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use tree_sitter::{Parser, Query, QueryCursor, StreamingIterator, Tree};

/// Converts a tree-sitter range to our 0-based half-open range.
pub fn range_from_ts(range: tree_sitter::Range) -> SourceRange {
    SourceRange {
        start: SourcePoint::new(range.start_point.row, range.start_point.column),
        end: SourcePoint::new(range.end_point.row, range.end_point.column),
    }
}

#[derive(Clone, Copy)]
pub struct TsNode<'t>(tree_sitter::Node<'t>);

impl<'t> TsNode<'t> {
    pub fn inner(&self) -> tree_sitter::Node<'t> {
        self.0
    }
}

impl fmt::Debug for TsNode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{:?}", self.0.kind(), self.0.byte_range())
    }
}

impl ConcreteNode for TsNode<'_> {
    fn kind(&self) -> &'static str {
        self.0.kind()
    }

    fn id(&self) -> usize {
        self.0.id()
    }

    fn is_named(&self) -> bool {
        self.0.is_named()
    }

    fn is_error(&self) -> bool {
        self.0.is_error() || self.0.is_missing()
    }

    fn byte_range(&self) -> Range<usize> {
        self.0.byte_range()
    }

    fn point_range(&self) -> SourceRange {
        range_from_ts(self.0.range())
    }

    fn child_count(&self) -> usize {
        self.0.child_count()
    }

    fn child(&self, index: usize) -> Option<Self> {
        let index = u32::try_from(index).ok()?;
        self.0.child(index).map(TsNode)
    }

    fn child_by_field(&self, field: &str) -> Option<Self> {
        self.0.child_by_field_name(field).map(TsNode)
    }

    fn parent(&self) -> Option<Self> {
        self.0.parent().map(TsNode)
    }

    fn children(&self) -> Vec<Self> {
        let mut cursor = self.0.walk();
        self.0.children(&mut cursor).map(TsNode).collect()
    }
}

pub struct TsTree(Tree);

impl TsTree {
    pub fn inner(&self) -> &Tree {
        &self.0
    }
}

impl ConcreteTree for TsTree {
    type Node<'a> = TsNode<'a>;

    fn root(&self) -> TsNode<'_> {
        TsNode(self.0.root_node())
    }
}

pub struct TsQuery {
    query: Query,
}

/// Grammar table plus the parse/query entry points.
///
/// Grammars are registered during toolchain construction; afterwards the
/// engine is only read. Each `parse` uses a fresh `Parser`, so one engine
/// serves any number of concurrent sessions.
#[derive(Default)]
pub struct TreeSitterEngine {
    grammars: HashMap<Language, tree_sitter::Language>,
}

impl TreeSitterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the grammar for `language`.
    pub fn register_grammar(&mut self, language: Language, grammar: tree_sitter::Language) {
        self.grammars.insert(language, grammar);
    }

    pub fn remove_grammar(&mut self, language: &Language) -> Option<tree_sitter::Language> {
        self.grammars.remove(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &Language> {
        self.grammars.keys()
    }

    fn grammar(&self, language: &Language) -> PluginResult<&tree_sitter::Language> {
        self.grammars
            .get(language)
            .ok_or_else(|| PluginError::MissingGrammar(language.clone()))
    }
}

impl SyntaxEngine for TreeSitterEngine {
    type Tree = TsTree;
    type Query = TsQuery;

    fn supports(&self, language: &Language) -> bool {
        self.grammars.contains_key(language)
    }

    fn parse(&self, source: &[u8], language: &Language) -> PluginResult<TsTree> {
        let grammar = self.grammar(language)?;
        let mut parser = Parser::new();
        parser
            .set_language(grammar)
            .map_err(|e| PluginError::Engine(format!("Incompatible grammar for {language}: {e}")))?;
        parser
            .parse(source, None)
            .map(TsTree)
            .ok_or_else(|| PluginError::Engine(format!("tree-sitter failed to parse {language} source")))
    }

    fn compile_query(&self, language: &Language, source: &str) -> PluginResult<TsQuery> {
        let grammar = self.grammar(language)?;
        Query::new(grammar, source)
            .map(|query| TsQuery { query })
            .map_err(|e| PluginError::Query {
                language: language.clone(),
                message: format!("{:?}", e),
            })
    }

    fn run_query<'q, 't>(
        &self,
        query: &'q TsQuery,
        node: TsNode<'t>,
        source: &[u8],
    ) -> PluginResult<Vec<QueryMatch<'q, TsNode<'t>>>>
    where
        Self::Tree: 't,
    {
        let names = query.query.capture_names();
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query.query, node.0, source);
        let mut out = Vec::new();
        while let Some(mat) = matches.next() {
            let captures = mat
                .captures
                .iter()
                .filter_map(|cap| {
                    names.get(cap.index as usize).map(|role| Capture {
                        role: *role,
                        node: TsNode(cap.node),
                    })
                })
                .collect();
            out.push(QueryMatch {
                pattern_index: mat.pattern_index,
                captures,
            });
        }
        Ok(out)
    }
}

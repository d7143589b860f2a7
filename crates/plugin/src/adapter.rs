use crate::error::PluginResult;
use crate::naming::{DotPathConvention, NamingConvention, ParentScope};
use crate::pass::ExtractionPass;
use crate::view::NodeView;
use indexmap::IndexMap;
use scopemux_api::{AstNode, Language, NodeKind, SourceRange};

static DOT_PATH: DotPathConvention = DotPathConvention;

/// What a hook can see of the unit being parsed.
#[derive(Debug, Clone, Copy)]
pub struct AdapterContext<'a> {
    pub language: &'a Language,
    pub filename: Option<&'a str>,
    pub source: &'a str,
}

impl AdapterContext<'_> {
    pub fn extension(&self) -> Option<&str> {
        self.filename?.rsplit_once('.').map(|(_, ext)| ext)
    }
}

/// A match after capture interpretation and before node allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedConstruct {
    pub pass: ExtractionPass,
    pub kind: NodeKind,
    pub name: Option<String>,
    pub range: SourceRange,
    pub raw_content: Option<String>,
    pub signature: Option<String>,
    pub params: Option<String>,
    pub return_type: Option<String>,
    pub docstring: Option<String>,
    /// Enclosing construct named by the match, if any.
    pub enclosing: Option<NodeKind>,
    pub properties: IndexMap<String, String>,
}

impl ExtractedConstruct {
    pub fn new(pass: ExtractionPass, kind: NodeKind, range: SourceRange) -> Self {
        Self {
            pass,
            kind,
            name: None,
            range,
            raw_content: None,
            signature: None,
            params: None,
            return_type: None,
            docstring: None,
            enclosing: None,
            properties: IndexMap::new(),
        }
    }
}

/// What a reference site names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    /// Call of a callable, or instantiation of a type.
    Call,
    /// Base class, extended type or implemented interface.
    Inheritance,
}

/// A use of a name in the concrete tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSite {
    pub kind: ReferenceKind,
    /// The name as written: `helper`, `self.area`, `geo::Shape`.
    pub target: String,
    pub range: SourceRange,
}

impl ReferenceSite {
    pub fn new(kind: ReferenceKind, target: impl Into<String>, range: SourceRange) -> Self {
        Self {
            kind,
            target: target.into(),
            range,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchDisposition {
    Keep,
    Skip,
}

/// Per-language customization points of the generic pipeline.
///
/// Every hook has a default, so an adapter overrides only what its grammar
/// needs. Adapters are registered once and then shared across sessions.
pub trait LanguageAdapter: Send + Sync {
    fn language(&self) -> Language;

    /// Render a callable's signature (return type, name, parameters).
    /// An empty string leaves the builder's `<return_type> <name><params>`
    /// composition in place.
    fn extract_signature(&self, _node: &dyn NodeView) -> String {
        String::new()
    }

    fn naming(&self) -> &dyn NamingConvention {
        &DOT_PATH
    }

    fn generate_qualified_name(&self, name: &str, kind: NodeKind, parent: &ParentScope<'_>) -> String {
        self.naming().qualify(name, kind, parent)
    }

    /// Post-hoc adjustment of a finished node.
    fn process_special_cases(&self, _node: &mut AstNode, _ctx: &AdapterContext<'_>) {}

    /// Rewrite query text for a pass before compilation. `None` keeps it.
    fn pre_process_query(&self, _pass: ExtractionPass, _query: &str) -> Option<String> {
        None
    }

    /// Adjust or veto an interpreted match before it becomes a node.
    /// `primary` is the concrete node the match selected.
    fn post_process_match(
        &self,
        _construct: &mut ExtractedConstruct,
        _primary: &dyn NodeView,
        _ctx: &AdapterContext<'_>,
    ) -> MatchDisposition {
        MatchDisposition::Keep
    }

    /// Name uses at `node`. Asked once for every named concrete node after
    /// the AST is built; the sites feed reference resolution.
    fn reference_sites(&self, _node: &dyn NodeView) -> Vec<ReferenceSite> {
        Vec::new()
    }

    /// Language rules of the schema compliance pass; runs after the generic rules.
    fn enforce_schema(&self, _node: &mut AstNode, _ctx: &AdapterContext<'_>) -> PluginResult<()> {
        Ok(())
    }
}

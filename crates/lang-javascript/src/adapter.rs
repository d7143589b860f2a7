use scopemux_api::{AstNode, Language, NodeKind};
use scopemux_plugin::utils::collapse_whitespace;
use scopemux_plugin::{
    AdapterContext, ExtractedConstruct, LanguageAdapter, MatchDisposition, NodeView, PluginResult,
    ReferenceKind, ReferenceSite,
};

/// Leading identifier-like token of `text`.
fn first_word(text: &str) -> &str {
    let text = text.trim_start();
    let end = text
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == '$'))
        .unwrap_or(text.len());
    &text[..end]
}

fn is_function_node(kind: &str) -> bool {
    matches!(
        kind,
        "arrow_function" | "function_expression" | "function" | "generator_function"
    )
}

/// True when the declarator of `name` in a `const`/`let`/`var` declaration
/// is initialized with a function expression or arrow function. Without a
/// name the first declarator decides.
fn declares_function(declaration: &dyn NodeView, name: Option<&str>) -> bool {
    let declarators = declaration.named_children();
    let Some(declarator) = declarators
        .iter()
        .filter(|d| d.kind() == "variable_declarator")
        .find(|d| name.is_none() || d.field_text("name").as_deref() == name)
    else {
        return false;
    };
    declarator
        .field("value")
        .is_some_and(|value| is_function_node(value.kind()))
}

/// `name(params): ret` for declarations, methods and named function values.
fn callable_signature(node: &dyn NodeView) -> String {
    let Some(name) = node.field_text("name") else {
        return String::new();
    };
    let value = node.field("value");
    let function: &dyn NodeView = match &value {
        Some(value) => value.as_ref(),
        None => node,
    };
    let params = function
        .field_text("parameters")
        .or_else(|| function.field_text("parameter").map(|p| format!("({p})")))
        .unwrap_or_else(|| "()".to_string());
    let prefix = if first_word(function.text()) == "async" {
        "async "
    } else {
        ""
    };
    let ret = function.field_text("return_type").unwrap_or_default();
    collapse_whitespace(&format!("{prefix}{name}{params}{ret}"))
}

/// Accessor, static and constructor flags of class members.
fn mark_member(node: &mut AstNode) {
    if !node.kind.is_callable() {
        return;
    }
    let raw = node.raw_content.clone().unwrap_or_default();
    let head = raw.split('(').next().unwrap_or_default();
    let words: Vec<&str> = head.split_whitespace().collect();

    let is_async = words.contains(&"async");
    let is_method = node.kind == NodeKind::Method;
    let is_static = is_method && words.first() == Some(&"static");
    let accessor = words
        .iter()
        .find(|w| matches!(**w, "get" | "set"))
        .filter(|accessor| words.last() != Some(*accessor))
        .copied()
        .filter(|_| is_method);

    if is_async {
        node.set_property("async", "true");
    }
    if is_method && node.name == "constructor" {
        node.set_property("constructor", "true");
    }
    if is_static {
        node.set_property("static", "true");
    }
    if let Some(accessor) = accessor {
        node.set_property("accessor", accessor);
    }
}

/// Drops variable matches whose declarator holds a function; the functions
/// pass already produced a node for them.
fn skip_function_variables(construct: &ExtractedConstruct, primary: &dyn NodeView) -> MatchDisposition {
    if construct.kind == NodeKind::Variable && declares_function(primary, construct.name.as_deref()) {
        MatchDisposition::Skip
    } else {
        MatchDisposition::Keep
    }
}

/// Type names of an `extends`/`implements` list, generic arguments dropped.
fn heritage_sites(heritage: &dyn NodeView) -> Vec<ReferenceSite> {
    let mut sites = Vec::new();
    let mut push = |base: &dyn NodeView| {
        let name = base.text().split('<').next().unwrap_or_default().trim();
        if !name.is_empty() {
            sites.push(ReferenceSite::new(ReferenceKind::Inheritance, name, base.range()));
        }
    };
    for clause in heritage.named_children() {
        match clause.kind() {
            "extends_clause" | "implements_clause" => {
                for base in clause.named_children() {
                    if base.kind() != "type_arguments" {
                        push(base.as_ref());
                    }
                }
            }
            _ => push(clause.as_ref()),
        }
    }
    sites
}

fn script_reference_sites(node: &dyn NodeView) -> Vec<ReferenceSite> {
    let callee = match node.kind() {
        "call_expression" => node.field_text("function"),
        "new_expression" => node.field_text("constructor"),
        "class_heritage" => return heritage_sites(node),
        _ => None,
    };
    callee
        .map(|target| vec![ReferenceSite::new(ReferenceKind::Call, target, node.range())])
        .unwrap_or_default()
}

#[derive(Debug, Default, Clone, Copy)]
pub struct JavaScriptAdapter;

impl LanguageAdapter for JavaScriptAdapter {
    fn language(&self) -> Language {
        Language::JAVASCRIPT
    }

    fn extract_signature(&self, node: &dyn NodeView) -> String {
        callable_signature(node)
    }

    fn post_process_match(
        &self,
        construct: &mut ExtractedConstruct,
        primary: &dyn NodeView,
        _ctx: &AdapterContext<'_>,
    ) -> MatchDisposition {
        skip_function_variables(construct, primary)
    }

    fn process_special_cases(&self, node: &mut AstNode, _ctx: &AdapterContext<'_>) {
        mark_member(node);
    }

    fn reference_sites(&self, node: &dyn NodeView) -> Vec<ReferenceSite> {
        script_reference_sites(node)
    }
}

/// TypeScript rules, shared by the `.ts` and `.tsx` grammars.
#[derive(Debug, Clone)]
pub struct TypeScriptAdapter {
    language: Language,
}

impl Default for TypeScriptAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeScriptAdapter {
    pub fn new() -> Self {
        Self {
            language: Language::TYPESCRIPT,
        }
    }

    pub fn tsx() -> Self {
        Self {
            language: Language::TSX,
        }
    }
}

impl LanguageAdapter for TypeScriptAdapter {
    fn language(&self) -> Language {
        self.language.clone()
    }

    fn extract_signature(&self, node: &dyn NodeView) -> String {
        callable_signature(node)
    }

    fn post_process_match(
        &self,
        construct: &mut ExtractedConstruct,
        primary: &dyn NodeView,
        _ctx: &AdapterContext<'_>,
    ) -> MatchDisposition {
        skip_function_variables(construct, primary)
    }

    fn process_special_cases(&self, node: &mut AstNode, _ctx: &AdapterContext<'_>) {
        mark_member(node);
        if node.kind == NodeKind::Class
            && node
                .raw_content
                .as_deref()
                .is_some_and(|raw| first_word(raw) == "abstract")
        {
            node.set_property("abstract", "true");
        }
    }

    fn reference_sites(&self, node: &dyn NodeView) -> Vec<ReferenceSite> {
        script_reference_sites(node)
    }

    fn enforce_schema(&self, node: &mut AstNode, ctx: &AdapterContext<'_>) -> PluginResult<()> {
        if node.kind == NodeKind::Root && ctx.filename.is_some_and(|f| f.ends_with(".d.ts")) {
            node.set_property("declaration_file", "true");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scopemux_api::SourceRange;

    fn member(kind: NodeKind, name: &str, raw: &str) -> AstNode {
        let mut node = AstNode::new(kind, name, SourceRange::default())
            .unwrap()
            .with_raw_content(raw);
        mark_member(&mut node);
        node
    }

    #[test]
    fn member_flags_come_from_the_head() {
        let load = member(NodeKind::Method, "load", "static async load(name) { }");
        assert_eq!(load.property("static"), Some("true"));
        assert_eq!(load.property("async"), Some("true"));

        let size = member(NodeKind::Method, "size", "get size() { return 0; }");
        assert_eq!(size.property("accessor"), Some("get"));

        let getter_named = member(NodeKind::Method, "get", "get() { }");
        assert_eq!(getter_named.property("accessor"), None);

        let wrap = member(NodeKind::Function, "wrap", "wrap = asyncValue => asyncValue");
        assert_eq!(wrap.property("async"), None);
    }

    #[test]
    fn keywords_match_whole_tokens() {
        assert_eq!(first_word("  async (x) => x"), "async");
        assert_eq!(first_word("asyncValue"), "asyncValue");
        assert_eq!(first_word("abstract class Base {}"), "abstract");
    }
}

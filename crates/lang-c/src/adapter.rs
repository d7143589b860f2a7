use scopemux_api::{AstNode, Language, NodeKind};
use scopemux_plugin::utils::collapse_whitespace;
use scopemux_plugin::{
    AdapterContext, LanguageAdapter, NodeView, PluginResult, ReferenceKind, ReferenceSite,
};

/// `<type> <declarator>` of a function definition or prototype, with the
/// body left out: `static char *dup(const char *s)`.
fn declarator_signature(node: &dyn NodeView) -> String {
    let Some(declarator) = node.field_text("declarator") else {
        return String::new();
    };
    let mut parts: Vec<String> = node
        .named_children()
        .iter()
        .filter(|child| matches!(child.kind(), "storage_class_specifier" | "type_qualifier"))
        .map(|child| child.text().to_string())
        .collect();
    if let Some(ty) = node.field_text("type") {
        parts.push(ty);
    }
    parts.push(declarator);
    collapse_whitespace(&parts.join(" "))
}

/// Marks function-like macros (`#define MAX(a, b) ...`).
fn mark_macro(node: &mut AstNode) {
    if node.kind != NodeKind::Macro {
        return;
    }
    let function_like = node
        .raw_content
        .as_deref()
        .and_then(|raw| raw.split_once(node.name.as_str()))
        .is_some_and(|(_, rest)| rest.starts_with('('));
    if function_like {
        node.set_property("function_like", "true");
    }
}

fn site(kind: ReferenceKind, target: Option<String>, at: &dyn NodeView) -> Vec<ReferenceSite> {
    target
        .map(|target| vec![ReferenceSite::new(kind, target, at.range())])
        .unwrap_or_default()
}

/// `f(x)`, `ops->run(x)`.
fn call_sites(node: &dyn NodeView) -> Vec<ReferenceSite> {
    match node.kind() {
        "call_expression" => site(ReferenceKind::Call, node.field_text("function"), node),
        _ => Vec::new(),
    }
}

/// Calls plus `new T(...)` and the bases of `class D : public B`.
fn cpp_sites(node: &dyn NodeView) -> Vec<ReferenceSite> {
    match node.kind() {
        "new_expression" => site(ReferenceKind::Call, node.field_text("type"), node),
        "base_class_clause" => node
            .named_children()
            .iter()
            .filter(|base| base.kind().ends_with("identifier") || base.kind() == "template_type")
            .flat_map(|base| site(ReferenceKind::Inheritance, Some(base.text().to_string()), base.as_ref()))
            .collect(),
        _ => call_sites(node),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CAdapter;

impl LanguageAdapter for CAdapter {
    fn language(&self) -> Language {
        Language::C
    }

    fn extract_signature(&self, node: &dyn NodeView) -> String {
        declarator_signature(node)
    }

    fn process_special_cases(&self, node: &mut AstNode, _ctx: &AdapterContext<'_>) {
        mark_macro(node);
    }

    fn reference_sites(&self, node: &dyn NodeView) -> Vec<ReferenceSite> {
        call_sites(node)
    }

    fn enforce_schema(&self, node: &mut AstNode, ctx: &AdapterContext<'_>) -> PluginResult<()> {
        if node.kind == NodeKind::Root && ctx.extension() == Some("h") {
            node.set_property("is_header", "true");
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct CppAdapter;

impl LanguageAdapter for CppAdapter {
    fn language(&self) -> Language {
        Language::CPP
    }

    fn extract_signature(&self, node: &dyn NodeView) -> String {
        declarator_signature(node)
    }

    fn process_special_cases(&self, node: &mut AstNode, _ctx: &AdapterContext<'_>) {
        mark_macro(node);
        // `virtual void draw() = 0;`
        if node.kind == NodeKind::Method
            && node
                .raw_content
                .as_deref()
                .is_some_and(|raw| raw.trim_end_matches(';').trim_end().ends_with("= 0"))
        {
            node.set_property("pure_virtual", "true");
        }
    }

    fn reference_sites(&self, node: &dyn NodeView) -> Vec<ReferenceSite> {
        cpp_sites(node)
    }

    fn enforce_schema(&self, node: &mut AstNode, ctx: &AdapterContext<'_>) -> PluginResult<()> {
        if node.kind == NodeKind::Root && matches!(ctx.extension(), Some("h" | "hh" | "hpp" | "hxx")) {
            node.set_property("is_header", "true");
        }
        Ok(())
    }
}

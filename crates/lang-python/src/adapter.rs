use scopemux_api::{AstNode, Language, NodeKind};
use scopemux_plugin::utils::collapse_whitespace;
use scopemux_plugin::{AdapterContext, LanguageAdapter, NodeView, ReferenceKind, ReferenceSite};

/// `helper()`, `self.area()`, and the bases of `class Circle(Shape)`.
fn python_sites(node: &dyn NodeView) -> Vec<ReferenceSite> {
    match node.kind() {
        "call" => node
            .field_text("function")
            .map(|callee| vec![ReferenceSite::new(ReferenceKind::Call, callee, node.range())])
            .unwrap_or_default(),
        "class_definition" => {
            let Some(bases) = node.field("superclasses") else {
                return Vec::new();
            };
            let bases = bases.named_children();
            bases
                .iter()
                .filter(|base| matches!(base.kind(), "identifier" | "attribute"))
                .map(|base| ReferenceSite::new(ReferenceKind::Inheritance, base.text(), base.range()))
                .collect()
        }
        _ => Vec::new(),
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct PythonAdapter;

impl LanguageAdapter for PythonAdapter {
    fn language(&self) -> Language {
        Language::PYTHON
    }

    /// `def area(self, scale: float = 1.0) -> float`, prefixed with
    /// `async` for coroutines.
    fn extract_signature(&self, node: &dyn NodeView) -> String {
        let (Some(name), Some(params)) = (node.field_text("name"), node.field_text("parameters")) else {
            return String::new();
        };
        let keyword = if node.text().starts_with("async") {
            "async def"
        } else {
            "def"
        };
        let signature = match node.field_text("return_type") {
            Some(ret) => format!("{keyword} {name}{params} -> {ret}"),
            None => format!("{keyword} {name}{params}"),
        };
        collapse_whitespace(&signature)
    }

    fn process_special_cases(&self, node: &mut AstNode, _ctx: &AdapterContext<'_>) {
        if !node.kind.is_callable() {
            return;
        }
        if node.raw_content.as_deref().is_some_and(|raw| raw.starts_with("async")) {
            node.set_property("async", "true");
        }
        if node.kind == NodeKind::Method && node.name == "__init__" {
            node.set_property("constructor", "true");
        } else if node.name.starts_with('_') && !node.name.ends_with("__") {
            node.set_property("visibility", "private");
        }
    }

    fn reference_sites(&self, node: &dyn NodeView) -> Vec<ReferenceSite> {
        python_sites(node)
    }
}

use crate::error::ApiResult;
use crate::models::{AstView, CstNode, Diagnostic};
use schemars::JsonSchema;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
pub enum OutputKind {
    #[serde(rename = "AST")]
    Ast,
    #[serde(rename = "CST")]
    Cst,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
#[serde(untagged)]
pub enum OutputRoot {
    Ast(AstView),
    Cst(CstNode),
}

/// The root object handed to consumers:
/// `{ kind: "AST"|"CST", root, diagnostics: [{ code, message }] }`.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct ParseOutput {
    pub kind: OutputKind,
    pub root: OutputRoot,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutput {
    pub fn ast(root: AstView, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            kind: OutputKind::Ast,
            root: OutputRoot::Ast(root),
            diagnostics,
        }
    }

    pub fn cst(root: CstNode, diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            kind: OutputKind::Cst,
            root: OutputRoot::Cst(root),
            diagnostics,
        }
    }

    pub fn as_ast(&self) -> Option<&AstView> {
        match &self.root {
            OutputRoot::Ast(view) => Some(view),
            OutputRoot::Cst(_) => None,
        }
    }

    pub fn as_cst(&self) -> Option<&CstNode> {
        match &self.root {
            OutputRoot::Cst(node) => Some(node),
            OutputRoot::Ast(_) => None,
        }
    }

    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    pub fn to_json(&self) -> ApiResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn to_json_pretty(&self) -> ApiResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// JSON schema describing the output object.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(ParseOutput)
    }
}

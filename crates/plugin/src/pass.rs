use scopemux_api::NodeKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One extraction pass of the AST builder.
///
/// Passes run in the order of [`ExtractionPass::ORDERED`]; enclosing
/// constructs come first so later passes can attach under them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionPass {
    Classes,
    Interfaces,
    Structs,
    Unions,
    Enums,
    Typedefs,
    Namespaces,
    Methods,
    Functions,
    Variables,
    Imports,
    Includes,
    Macros,
    ControlFlow,
    Docstrings,
}

impl ExtractionPass {
    pub const ORDERED: [ExtractionPass; 15] = [
        ExtractionPass::Classes,
        ExtractionPass::Interfaces,
        ExtractionPass::Structs,
        ExtractionPass::Unions,
        ExtractionPass::Enums,
        ExtractionPass::Typedefs,
        ExtractionPass::Namespaces,
        ExtractionPass::Methods,
        ExtractionPass::Functions,
        ExtractionPass::Variables,
        ExtractionPass::Imports,
        ExtractionPass::Includes,
        ExtractionPass::Macros,
        ExtractionPass::ControlFlow,
        ExtractionPass::Docstrings,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionPass::Classes => "classes",
            ExtractionPass::Interfaces => "interfaces",
            ExtractionPass::Structs => "structs",
            ExtractionPass::Unions => "unions",
            ExtractionPass::Enums => "enums",
            ExtractionPass::Typedefs => "typedefs",
            ExtractionPass::Namespaces => "namespaces",
            ExtractionPass::Methods => "methods",
            ExtractionPass::Functions => "functions",
            ExtractionPass::Variables => "variables",
            ExtractionPass::Imports => "imports",
            ExtractionPass::Includes => "includes",
            ExtractionPass::Macros => "macros",
            ExtractionPass::ControlFlow => "control_flow",
            ExtractionPass::Docstrings => "docstrings",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ORDERED.iter().copied().find(|p| p.as_str() == name)
    }

    /// Kind given to nodes of this pass unless the primary capture refines it.
    pub fn default_kind(&self) -> NodeKind {
        match self {
            ExtractionPass::Classes => NodeKind::Class,
            ExtractionPass::Interfaces => NodeKind::Interface,
            ExtractionPass::Structs => NodeKind::Struct,
            ExtractionPass::Unions => NodeKind::Union,
            ExtractionPass::Enums => NodeKind::Enum,
            ExtractionPass::Typedefs => NodeKind::Typedef,
            ExtractionPass::Namespaces => NodeKind::Namespace,
            ExtractionPass::Methods => NodeKind::Method,
            ExtractionPass::Functions => NodeKind::Function,
            ExtractionPass::Variables => NodeKind::Variable,
            ExtractionPass::Imports => NodeKind::Import,
            ExtractionPass::Includes => NodeKind::Include,
            ExtractionPass::Macros => NodeKind::Macro,
            ExtractionPass::ControlFlow => NodeKind::ControlFlow,
            ExtractionPass::Docstrings => NodeKind::Docstring,
        }
    }
}

impl fmt::Display for ExtractionPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpretation of a query capture name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureRole {
    /// Selects the construct itself; its span becomes the node's range.
    Primary(NodeKind),
    Name,
    Body,
    Params,
    ReturnType,
    Docstring,
    Path,
    /// Names an enclosing construct of the given kind.
    Enclosing(NodeKind),
    /// Captures used only for predicates or ignored by the builder.
    Auxiliary,
}

impl CaptureRole {
    pub fn parse(role: &str) -> Self {
        match role {
            "name" => CaptureRole::Name,
            "body" => CaptureRole::Body,
            "params" | "parameters" => CaptureRole::Params,
            "return_type" => CaptureRole::ReturnType,
            "docstring" => CaptureRole::Docstring,
            "path" | "system_path" | "source" => CaptureRole::Path,
            "class_name" | "parent_class" => CaptureRole::Enclosing(NodeKind::Class),
            "struct_name" => CaptureRole::Enclosing(NodeKind::Struct),
            "namespace_name" => CaptureRole::Enclosing(NodeKind::Namespace),
            "function" => CaptureRole::Primary(NodeKind::Function),
            "class" => CaptureRole::Primary(NodeKind::Class),
            "method" => CaptureRole::Primary(NodeKind::Method),
            "variable" => CaptureRole::Primary(NodeKind::Variable),
            "import" => CaptureRole::Primary(NodeKind::Import),
            "include" => CaptureRole::Primary(NodeKind::Include),
            "struct" => CaptureRole::Primary(NodeKind::Struct),
            "union" => CaptureRole::Primary(NodeKind::Union),
            "enum" => CaptureRole::Primary(NodeKind::Enum),
            "typedef" => CaptureRole::Primary(NodeKind::Typedef),
            "macro" => CaptureRole::Primary(NodeKind::Macro),
            "interface" => CaptureRole::Primary(NodeKind::Interface),
            "namespace" => CaptureRole::Primary(NodeKind::Namespace),
            "module" => CaptureRole::Primary(NodeKind::Module),
            "lambda" => CaptureRole::Primary(NodeKind::Lambda),
            "if_statement" => CaptureRole::Primary(NodeKind::IfStatement),
            "for_loop" => CaptureRole::Primary(NodeKind::ForStatement),
            "while_loop" => CaptureRole::Primary(NodeKind::WhileStatement),
            "do_while_loop" => CaptureRole::Primary(NodeKind::DoWhileStatement),
            "switch_statement" => CaptureRole::Primary(NodeKind::SwitchStatement),
            "try_statement" | "control_flow" => CaptureRole::Primary(NodeKind::ControlFlow),
            "comment" => CaptureRole::Primary(NodeKind::Comment),
            "docstring_node" => CaptureRole::Primary(NodeKind::Docstring),
            "template_specialization" => CaptureRole::Primary(NodeKind::TemplateSpecialization),
            _ => CaptureRole::Auxiliary,
        }
    }
}

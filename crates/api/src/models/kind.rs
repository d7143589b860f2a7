use crate::error::ApiError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed, language-agnostic vocabulary of AST node kinds.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeKind {
    Unknown,
    Root,
    Function,
    Class,
    Method,
    Variable,
    Parameter,
    Identifier,
    Import,
    Include,
    Module,
    VariableDeclaration,
    ForStatement,
    WhileStatement,
    DoWhileStatement,
    IfStatement,
    IfElseIfStatement,
    SwitchStatement,
    Comment,
    Docstring,
    Namespace,
    Struct,
    Enum,
    Interface,
    Union,
    Typedef,
    Macro,
    ControlFlow,
    TemplateSpecialization,
    Lambda,
    Using,
    Friend,
    Operator,
    Type,
    Property,
}

impl NodeKind {
    pub const ALL: [NodeKind; 35] = [
        NodeKind::Unknown,
        NodeKind::Root,
        NodeKind::Function,
        NodeKind::Class,
        NodeKind::Method,
        NodeKind::Variable,
        NodeKind::Parameter,
        NodeKind::Identifier,
        NodeKind::Import,
        NodeKind::Include,
        NodeKind::Module,
        NodeKind::VariableDeclaration,
        NodeKind::ForStatement,
        NodeKind::WhileStatement,
        NodeKind::DoWhileStatement,
        NodeKind::IfStatement,
        NodeKind::IfElseIfStatement,
        NodeKind::SwitchStatement,
        NodeKind::Comment,
        NodeKind::Docstring,
        NodeKind::Namespace,
        NodeKind::Struct,
        NodeKind::Enum,
        NodeKind::Interface,
        NodeKind::Union,
        NodeKind::Typedef,
        NodeKind::Macro,
        NodeKind::ControlFlow,
        NodeKind::TemplateSpecialization,
        NodeKind::Lambda,
        NodeKind::Using,
        NodeKind::Friend,
        NodeKind::Operator,
        NodeKind::Type,
        NodeKind::Property,
    ];

    /// Canonical wire name, e.g. `FUNCTION`.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Unknown => "UNKNOWN",
            NodeKind::Root => "ROOT",
            NodeKind::Function => "FUNCTION",
            NodeKind::Class => "CLASS",
            NodeKind::Method => "METHOD",
            NodeKind::Variable => "VARIABLE",
            NodeKind::Parameter => "PARAMETER",
            NodeKind::Identifier => "IDENTIFIER",
            NodeKind::Import => "IMPORT",
            NodeKind::Include => "INCLUDE",
            NodeKind::Module => "MODULE",
            NodeKind::VariableDeclaration => "VARIABLE_DECLARATION",
            NodeKind::ForStatement => "FOR_STATEMENT",
            NodeKind::WhileStatement => "WHILE_STATEMENT",
            NodeKind::DoWhileStatement => "DO_WHILE_STATEMENT",
            NodeKind::IfStatement => "IF_STATEMENT",
            NodeKind::IfElseIfStatement => "IF_ELSE_IF_STATEMENT",
            NodeKind::SwitchStatement => "SWITCH_STATEMENT",
            NodeKind::Comment => "COMMENT",
            NodeKind::Docstring => "DOCSTRING",
            NodeKind::Namespace => "NAMESPACE",
            NodeKind::Struct => "STRUCT",
            NodeKind::Enum => "ENUM",
            NodeKind::Interface => "INTERFACE",
            NodeKind::Union => "UNION",
            NodeKind::Typedef => "TYPEDEF",
            NodeKind::Macro => "MACRO",
            NodeKind::ControlFlow => "CONTROL_FLOW",
            NodeKind::TemplateSpecialization => "TEMPLATE_SPECIALIZATION",
            NodeKind::Lambda => "LAMBDA",
            NodeKind::Using => "USING",
            NodeKind::Friend => "FRIEND",
            NodeKind::Operator => "OPERATOR",
            NodeKind::Type => "TYPE",
            NodeKind::Property => "PROPERTY",
        }
    }

    /// Lower-case stem used for synthesized names (`unnamed_struct`).
    pub fn placeholder_stem(&self) -> String {
        self.as_str().to_ascii_lowercase()
    }

    /// Kinds that carry a callable signature.
    pub fn is_callable(&self) -> bool {
        matches!(self, NodeKind::Function | NodeKind::Method | NodeKind::Lambda)
    }

    /// Free-standing comment-like nodes that may be folded into a neighbour's docstring.
    pub fn is_comment_like(&self) -> bool {
        matches!(self, NodeKind::Comment | NodeKind::Docstring)
    }

    /// Kinds that may enclose other extracted constructs.
    pub fn is_scope(&self) -> bool {
        matches!(
            self,
            NodeKind::Root
                | NodeKind::Class
                | NodeKind::Struct
                | NodeKind::Union
                | NodeKind::Interface
                | NodeKind::Namespace
                | NodeKind::Module
                | NodeKind::Enum
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        NodeKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == upper)
            .ok_or_else(|| ApiError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_serde() {
        for kind in NodeKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("function".parse::<NodeKind>().unwrap(), NodeKind::Function);
        assert_eq!(
            "If_Else_If_Statement".parse::<NodeKind>().unwrap(),
            NodeKind::IfElseIfStatement
        );
        assert!("lambda_expression".parse::<NodeKind>().is_err());
    }

    #[test]
    fn placeholder_stem_is_lowercase() {
        assert_eq!(NodeKind::Typedef.placeholder_stem(), "typedef");
    }
}

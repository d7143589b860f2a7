use scopemux_api::NodeKind;
use std::fmt::Debug;

/// Final fallback when no qualified name can be derived.
pub const UNNAMED_NODE: &str = "unnamed_node";

/// Where a node is being attached, as seen by qualified naming.
#[derive(Debug, Clone, Copy)]
pub struct ParentScope<'a> {
    pub kind: NodeKind,
    pub qualified_name: Option<&'a str>,
    /// Base file name (directories stripped) of the unit being parsed.
    pub base_filename: &'a str,
}

impl ParentScope<'_> {
    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }
}

/// Language-specific rules for rendering qualified names.
pub trait NamingConvention: Send + Sync + Debug {
    /// The primary separator (e.g. "." for Python, "::" for C++).
    fn separator(&self) -> &str;

    /// Separator between a parent and a child based on their kinds.
    fn get_separator(&self, _parent: NodeKind, _child: NodeKind) -> &str {
        self.separator()
    }

    /// Split a qualified name into its segments.
    fn parse_qualified_name<'a>(&self, qualified_name: &'a str) -> Vec<&'a str> {
        qualified_name
            .split(self.separator())
            .filter(|s| !s.is_empty())
            .collect()
    }

    /// Derive the qualified name of `name` (a `kind` node) under `parent`.
    ///
    /// Under the root this is `<base_filename><sep><name>`, under any other
    /// parent `<parent.qualified_name><sep><name>`, and `<name>` when the
    /// parent has no qualified name. Never returns an empty string.
    fn qualify(&self, name: &str, kind: NodeKind, parent: &ParentScope<'_>) -> String {
        let name = name.trim();
        if name.is_empty() {
            return UNNAMED_NODE.to_string();
        }
        let prefix = if parent.is_root() {
            Some(parent.base_filename)
        } else {
            parent.qualified_name
        };
        match prefix.filter(|p| !p.is_empty()) {
            Some(prefix) => {
                let sep = self.get_separator(parent.kind, kind);
                format!("{prefix}{sep}{name}")
            }
            None => name.to_string(),
        }
    }
}

/// The default dotted convention.
#[derive(Debug, Default, Clone, Copy)]
pub struct DotPathConvention;

impl NamingConvention for DotPathConvention {
    fn separator(&self) -> &str {
        "."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root() -> ParentScope<'static> {
        ParentScope {
            kind: NodeKind::Root,
            qualified_name: Some("ignored"),
            base_filename: "main.c",
        }
    }

    #[test]
    fn root_children_use_base_filename() {
        let qn = DotPathConvention.qualify("main", NodeKind::Function, &root());
        assert_eq!(qn, "main.c.main");
    }

    #[test]
    fn nested_children_extend_parent() {
        let parent = ParentScope {
            kind: NodeKind::Class,
            qualified_name: Some("shapes.py.Circle"),
            base_filename: "shapes.py",
        };
        let qn = DotPathConvention.qualify("area", NodeKind::Method, &parent);
        assert_eq!(qn, "shapes.py.Circle.area");
        assert_eq!(
            DotPathConvention.parse_qualified_name(&qn),
            vec!["shapes", "py", "Circle", "area"]
        );
    }

    #[test]
    fn missing_parent_name_falls_back_to_name() {
        let parent = ParentScope {
            kind: NodeKind::Struct,
            qualified_name: None,
            base_filename: "a.c",
        };
        assert_eq!(DotPathConvention.qualify("x", NodeKind::Variable, &parent), "x");
        assert_eq!(DotPathConvention.qualify("", NodeKind::Variable, &parent), UNNAMED_NODE);
    }

    #[test]
    fn qualification_is_idempotent() {
        let a = DotPathConvention.qualify("f", NodeKind::Function, &root());
        let b = DotPathConvention.qualify("f", NodeKind::Function, &root());
        assert_eq!(a, b);
    }
}

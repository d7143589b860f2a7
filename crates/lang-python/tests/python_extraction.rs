mod common;

use common::{children_of, parse};
use scopemux_api::NodeKind;

const GEOMETRY: &str = r#"import os
from typing import List

# Shape helpers.
class Shape:
    """A drawable shape."""

    def __init__(self, sides):
        self.sides = sides

    @property
    def area(self) -> float:
        """Area in square units."""
        if self.sides > 2:
            return 1.0
        return 0.0

# Retries three times.
async def _fetch(url):
    for attempt in range(3):
        pass

LIMIT = 10
"#;

#[test]
fn test_root_children_are_ordered_and_comments_stripped() {
    let ctx = parse(GEOMETRY, "pkg/geometry.py");
    let root = ctx.ast_root().unwrap();

    let summary: Vec<_> = children_of(&ctx, root)
        .iter()
        .map(|n| (n.kind, n.name.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (NodeKind::Include, "os"),
            (NodeKind::Include, "typing"),
            (NodeKind::Function, "_fetch"),
            (NodeKind::Class, "Shape"),
            (NodeKind::Variable, "LIMIT"),
        ]
    );
    assert!(ctx.nodes_of_kind(NodeKind::Comment).is_empty());
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn test_class_and_method_docstrings_come_from_the_body() {
    let ctx = parse(GEOMETRY, "pkg/geometry.py");

    let shape = ctx.find_by_qualified_name("geometry.py.Shape").unwrap();
    assert_eq!(
        ctx.node(shape).unwrap().docstring.as_deref(),
        Some("A drawable shape.")
    );

    let methods = children_of(&ctx, shape);
    let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["__init__", "area"]);
    assert_eq!(methods[0].property("constructor"), Some("true"));

    let area = methods[1];
    assert_eq!(area.kind, NodeKind::Method);
    assert_eq!(area.qualified_name, "geometry.py.Shape.area");
    assert_eq!(area.signature.as_deref(), Some("def area(self) -> float"));
    assert_eq!(area.docstring.as_deref(), Some("Area in square units."));
}

#[test]
fn test_leading_comment_documents_async_function() {
    let ctx = parse(GEOMETRY, "pkg/geometry.py");
    let fetch = ctx.find_by_qualified_name("geometry.py._fetch").unwrap();
    let fetch = ctx.node(fetch).unwrap();

    assert_eq!(fetch.docstring.as_deref(), Some("Retries three times."));
    assert_eq!(fetch.signature.as_deref(), Some("async def _fetch(url)"));
    assert_eq!(fetch.property("async"), Some("true"));
    assert_eq!(fetch.property("visibility"), Some("private"));
}

#[test]
fn test_control_flow_nests_under_callables() {
    let ctx = parse(GEOMETRY, "pkg/geometry.py");

    let branch = ctx
        .find_by_qualified_name("geometry.py.Shape.area.if_statement")
        .expect("if statement under area");
    assert_eq!(ctx.node(branch).unwrap().kind, NodeKind::IfStatement);

    let fetch = ctx.find_by_qualified_name("geometry.py._fetch").unwrap();
    let kinds: Vec<_> = children_of(&ctx, fetch).iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NodeKind::ForStatement]);
}

#[test]
fn test_imports_keep_their_targets() {
    let ctx = parse("import numpy as np\nfrom . import sibling\n", "loader.py");
    let imports: Vec<_> = ctx
        .nodes_of_kind(NodeKind::Include)
        .into_iter()
        .map(|id| ctx.node(id).unwrap())
        .collect();

    assert_eq!(imports.len(), 2);
    assert_eq!(imports[0].name, "np");
    assert_eq!(imports[0].property("path"), Some("numpy"));
    assert_eq!(imports[1].property("path"), Some("."));
}

const RELATIONS: &str = r#"class Shape:
    def area(self):
        return 0

    def report(self):
        return self.area()

class Circle(Shape):
    def area(self):
        return 3

def helper():
    return len([])

helper()
"#;

#[test]
fn test_calls_and_bases_become_references() {
    let ctx = parse(RELATIONS, "rel.py");
    let id = |qn: &str| ctx.find_by_qualified_name(qn).unwrap();

    assert_eq!(ctx.references(id("rel.py.Shape.report")).unwrap(), &[id("rel.py.Shape.area")]);
    assert_eq!(ctx.references(id("rel.py.Circle")).unwrap(), &[id("rel.py.Shape")]);
    assert_eq!(ctx.references(ctx.ast_root().unwrap()).unwrap(), &[id("rel.py.helper")]);
    // Builtins resolve to nothing in the file.
    assert!(ctx.references(id("rel.py.helper")).unwrap().is_empty());
}

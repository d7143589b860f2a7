mod common;

use common::{children_of, parse};
use scopemux_api::{DiagnosticCode, Language, NodeKind};

const SHAPES: &str = r#"export interface Shape {
  area(): number;
}

export enum Color { Red, Green }

type Id = string;

export abstract class Base implements Shape {
  abstract area(): number;

  describe(): string {
    return `area ${this.area()}`;
  }
}

export function scale(n: number, by = 2): number {
  return n * by;
}
"#;

fn kind_of(ctx: &scopemux_core::ParserContext, qualified_name: &str) -> NodeKind {
    let id = ctx
        .find_by_qualified_name(qualified_name)
        .unwrap_or_else(|| panic!("{qualified_name} missing"));
    ctx.node(id).unwrap().kind
}

#[test]
fn test_type_level_constructs_are_extracted() {
    let ctx = parse(SHAPES, "shapes.ts");
    assert_eq!(ctx.language(), &Language::TYPESCRIPT);

    assert_eq!(kind_of(&ctx, "shapes.ts.Shape"), NodeKind::Interface);
    assert_eq!(kind_of(&ctx, "shapes.ts.Color"), NodeKind::Enum);
    assert_eq!(kind_of(&ctx, "shapes.ts.Id"), NodeKind::Typedef);
    assert_eq!(kind_of(&ctx, "shapes.ts.Base"), NodeKind::Class);
}

#[test]
fn test_abstract_class_keeps_concrete_methods() {
    let ctx = parse(SHAPES, "shapes.ts");
    let base = ctx.find_by_qualified_name("shapes.ts.Base").unwrap();
    assert_eq!(ctx.node(base).unwrap().property("abstract"), Some("true"));

    let methods = children_of(&ctx, base);
    assert_eq!(methods.len(), 1);
    assert_eq!(methods[0].name, "describe");
    assert_eq!(methods[0].signature.as_deref(), Some("describe(): string"));
}

#[test]
fn test_typed_signature_includes_return_annotation() {
    let ctx = parse(SHAPES, "shapes.ts");
    let scale = ctx.find_by_qualified_name("shapes.ts.scale").unwrap();
    assert_eq!(
        ctx.node(scale).unwrap().signature.as_deref(),
        Some("scale(n: number, by = 2): number")
    );
}

#[test]
fn test_declaration_file_root_is_marked() {
    let ctx = parse("declare function tick(): void;\n", "globals.d.ts");
    let root = ctx.node(ctx.ast_root().unwrap()).unwrap();
    assert_eq!(root.qualified_name, "globals.d.ts");
    assert_eq!(root.property("declaration_file"), Some("true"));

    let plain = parse(SHAPES, "shapes.ts");
    let root = plain.node(plain.ast_root().unwrap()).unwrap();
    assert_eq!(root.property("declaration_file"), None);
}

#[test]
fn test_implemented_interface_is_referenced() {
    let ctx = parse(SHAPES, "shapes.ts");
    let shape = ctx.find_by_qualified_name("shapes.ts.Shape").unwrap();
    let base = ctx.find_by_qualified_name("shapes.ts.Base").unwrap();
    assert!(ctx.references(base).unwrap().contains(&shape));
}

#[test]
fn test_tsx_files_accept_jsx() {
    let ctx = parse(
        "const x = <div/>;\nexport function App() { return <div/>; }\n",
        "ui/a.tsx",
    );
    assert_eq!(ctx.language(), &Language::TSX);
    assert_eq!(kind_of(&ctx, "a.tsx.x"), NodeKind::Variable);
    assert_eq!(kind_of(&ctx, "a.tsx.App"), NodeKind::Function);
    assert!(
        ctx.diagnostics()
            .iter()
            .all(|d| d.code != DiagnosticCode::NoConstructs)
    );
}

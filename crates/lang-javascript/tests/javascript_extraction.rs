mod common;

use common::{children_of, names_of_kind, parse};
use scopemux_api::{Language, NodeKind};

const LOADER: &str = r#"import { readFile } from 'fs/promises';
const path = require('path');

/** Default retry count. */
const RETRIES = 3;

export class Loader {
  constructor(root) {
    this.root = root;
  }

  static create() {
    return new Loader('.');
  }

  get size() {
    return 0;
  }

  async load(name) {
    for (const attempt of [1, 2]) {
      if (attempt > RETRIES) {
        return null;
      }
    }
  }
}

const double = (x) => x * 2;

function* ids() {
  yield 1;
}
"#;

#[test]
fn test_language_is_resolved_from_extension() {
    let ctx = parse(LOADER, "src/loader.js");
    assert_eq!(ctx.language(), &Language::JAVASCRIPT);
    assert!(ctx.diagnostics().is_empty());
}

#[test]
fn test_class_members_carry_flags() {
    let ctx = parse(LOADER, "src/loader.js");
    let loader = ctx.find_by_qualified_name("loader.js.Loader").unwrap();

    let methods = children_of(&ctx, loader);
    let names: Vec<_> = methods.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["constructor", "create", "size", "load"]);

    assert_eq!(methods[0].property("constructor"), Some("true"));
    assert_eq!(methods[1].property("static"), Some("true"));
    assert_eq!(methods[2].property("accessor"), Some("get"));
    assert_eq!(methods[3].property("async"), Some("true"));
    assert_eq!(methods[3].signature.as_deref(), Some("async load(name)"));
    assert_eq!(methods[3].qualified_name, "loader.js.Loader.load");
}

#[test]
fn test_arrow_function_is_a_function_not_a_variable() {
    let ctx = parse(LOADER, "src/loader.js");

    let double = ctx.find_by_qualified_name("loader.js.double").unwrap();
    let double = ctx.node(double).unwrap();
    assert_eq!(double.kind, NodeKind::Function);
    assert_eq!(double.signature.as_deref(), Some("double(x)"));

    assert_eq!(names_of_kind(&ctx, NodeKind::Variable), vec!["path", "RETRIES"]);
    assert_eq!(names_of_kind(&ctx, NodeKind::Function), vec!["double", "ids"]);
}

#[test]
fn test_imports_and_requires_become_includes() {
    let ctx = parse(LOADER, "src/loader.js");
    assert_eq!(
        names_of_kind(&ctx, NodeKind::Include),
        vec!["fs/promises", "path"]
    );
}

#[test]
fn test_block_comment_documents_constant() {
    let ctx = parse(LOADER, "src/loader.js");
    let retries = ctx.find_by_qualified_name("loader.js.RETRIES").unwrap();
    assert_eq!(
        ctx.node(retries).unwrap().docstring.as_deref(),
        Some("Default retry count.")
    );
}

#[test]
fn test_loop_and_branch_sit_under_the_method() {
    let ctx = parse(LOADER, "src/loader.js");
    let load = ctx.find_by_qualified_name("loader.js.Loader.load").unwrap();
    let kinds: Vec<_> = children_of(&ctx, load).iter().map(|n| n.kind).collect();
    assert_eq!(kinds, vec![NodeKind::ForStatement, NodeKind::IfStatement]);
}

#[test]
fn test_only_function_initializers_leave_the_variables() {
    let ctx = parse(
        "const v = asyncValue;\nconst t = functionTable[0];\nconst n = 1;\nconst f = async () => 1;\n",
        "values.js",
    );
    assert_eq!(names_of_kind(&ctx, NodeKind::Variable), vec!["v", "t", "n"]);
    assert_eq!(names_of_kind(&ctx, NodeKind::Function), vec!["f"]);
}

#[test]
fn test_constructor_call_references_the_class() {
    let ctx = parse(LOADER, "src/loader.js");
    let loader = ctx.find_by_qualified_name("loader.js.Loader").unwrap();
    let create = ctx.find_by_qualified_name("loader.js.Loader.create").unwrap();
    assert_eq!(ctx.references(create).unwrap(), &[loader]);

    // `require` and `readFile` name nothing in this file.
    let root = ctx.ast_root().unwrap();
    assert!(ctx.references(root).unwrap().is_empty());
}

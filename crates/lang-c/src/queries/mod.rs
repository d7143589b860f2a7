//! Query resources, one file per (language, pass).

use scopemux_plugin::{ExtractionPass, QueryResource};

pub const C_QUERIES: &[QueryResource] = &[
    QueryResource::new(ExtractionPass::Structs, include_str!("c/structs.scm")),
    QueryResource::new(ExtractionPass::Unions, include_str!("c/unions.scm")),
    QueryResource::new(ExtractionPass::Enums, include_str!("c/enums.scm")),
    QueryResource::new(ExtractionPass::Typedefs, include_str!("c/typedefs.scm")),
    QueryResource::new(ExtractionPass::Functions, include_str!("c/functions.scm")),
    QueryResource::new(ExtractionPass::Variables, include_str!("c/variables.scm")),
    QueryResource::new(ExtractionPass::Includes, include_str!("c/includes.scm")),
    QueryResource::new(ExtractionPass::Macros, include_str!("c/macros.scm")),
    QueryResource::new(ExtractionPass::ControlFlow, include_str!("c/control_flow.scm")),
    QueryResource::new(ExtractionPass::Docstrings, include_str!("c/docstrings.scm")),
];

pub const CPP_QUERIES: &[QueryResource] = &[
    QueryResource::new(ExtractionPass::Classes, include_str!("cpp/classes.scm")),
    QueryResource::new(ExtractionPass::Structs, include_str!("cpp/structs.scm")),
    QueryResource::new(ExtractionPass::Unions, include_str!("cpp/unions.scm")),
    QueryResource::new(ExtractionPass::Enums, include_str!("cpp/enums.scm")),
    QueryResource::new(ExtractionPass::Typedefs, include_str!("cpp/typedefs.scm")),
    QueryResource::new(ExtractionPass::Namespaces, include_str!("cpp/namespaces.scm")),
    QueryResource::new(ExtractionPass::Methods, include_str!("cpp/methods.scm")),
    QueryResource::new(ExtractionPass::Functions, include_str!("cpp/functions.scm")),
    QueryResource::new(ExtractionPass::Variables, include_str!("cpp/variables.scm")),
    QueryResource::new(ExtractionPass::Includes, include_str!("cpp/includes.scm")),
    QueryResource::new(ExtractionPass::Macros, include_str!("cpp/macros.scm")),
    QueryResource::new(ExtractionPass::ControlFlow, include_str!("cpp/control_flow.scm")),
    QueryResource::new(ExtractionPass::Docstrings, include_str!("cpp/docstrings.scm")),
];

//! Query resources. TypeScript reuses the JavaScript queries for the
//! constructs both grammars share.

use scopemux_plugin::{ExtractionPass, QueryResource};

pub const JAVASCRIPT_QUERIES: &[QueryResource] = &[
    QueryResource::new(ExtractionPass::Classes, include_str!("javascript/classes.scm")),
    QueryResource::new(ExtractionPass::Methods, include_str!("javascript/methods.scm")),
    QueryResource::new(ExtractionPass::Functions, include_str!("javascript/functions.scm")),
    QueryResource::new(ExtractionPass::Variables, include_str!("javascript/variables.scm")),
    QueryResource::new(ExtractionPass::Imports, include_str!("javascript/imports.scm")),
    QueryResource::new(ExtractionPass::ControlFlow, include_str!("javascript/control_flow.scm")),
    QueryResource::new(ExtractionPass::Docstrings, include_str!("javascript/docstrings.scm")),
];

pub const TYPESCRIPT_QUERIES: &[QueryResource] = &[
    QueryResource::new(ExtractionPass::Classes, include_str!("typescript/classes.scm")),
    QueryResource::new(ExtractionPass::Interfaces, include_str!("typescript/interfaces.scm")),
    QueryResource::new(ExtractionPass::Enums, include_str!("typescript/enums.scm")),
    QueryResource::new(ExtractionPass::Typedefs, include_str!("typescript/typedefs.scm")),
    QueryResource::new(ExtractionPass::Methods, include_str!("javascript/methods.scm")),
    QueryResource::new(ExtractionPass::Functions, include_str!("javascript/functions.scm")),
    QueryResource::new(ExtractionPass::Variables, include_str!("javascript/variables.scm")),
    QueryResource::new(ExtractionPass::Imports, include_str!("javascript/imports.scm")),
    QueryResource::new(ExtractionPass::ControlFlow, include_str!("javascript/control_flow.scm")),
    QueryResource::new(ExtractionPass::Docstrings, include_str!("javascript/docstrings.scm")),
];

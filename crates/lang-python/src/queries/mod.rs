use scopemux_plugin::{ExtractionPass, QueryResource};

pub const PYTHON_QUERIES: &[QueryResource] = &[
    QueryResource::new(ExtractionPass::Classes, include_str!("classes.scm")),
    QueryResource::new(ExtractionPass::Methods, include_str!("methods.scm")),
    QueryResource::new(ExtractionPass::Functions, include_str!("functions.scm")),
    QueryResource::new(ExtractionPass::Variables, include_str!("variables.scm")),
    QueryResource::new(ExtractionPass::Imports, include_str!("imports.scm")),
    QueryResource::new(ExtractionPass::ControlFlow, include_str!("control_flow.scm")),
    QueryResource::new(ExtractionPass::Docstrings, include_str!("docstrings.scm")),
];

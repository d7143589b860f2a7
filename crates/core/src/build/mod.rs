//! Tree construction: capture interpretation, the query-driven AST
//! builder with its post-processing and reference resolution, and the
//! CST mirror.

pub mod ast;
pub mod capture;
pub mod cst;
pub mod postprocess;
pub mod references;

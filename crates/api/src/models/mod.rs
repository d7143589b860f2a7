pub mod ast;
pub mod cst;
pub mod diagnostic;
pub mod kind;
pub mod language;
pub mod range;

pub use ast::*;
pub use cst::*;
pub use diagnostic::*;
pub use kind::*;
pub use language::*;
pub use range::*;

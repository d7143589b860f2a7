//! Ownership bookkeeping and crash containment for AST construction.

pub mod arena;
pub mod boundary;
pub mod tracker;

pub use arena::NodeArena;
pub use boundary::{Contained, contain, contain_if};
pub use tracker::{AllocationTracker, LeakReport, TagLeak};

pub mod build;
pub mod catalog;
pub mod compliance;
pub mod config;
pub mod error;
pub mod guard;
pub mod logging;
pub mod registry;
pub mod session;
pub mod syntax;
pub mod toolchain;

pub use config::{EngineConfig, IncludeKind};
pub use error::{ErrorCode, LifecycleError, Result, ScopemuxError};
pub use guard::{LeakReport, NodeArena};
pub use registry::AdapterRegistry;
pub use session::{LastError, ParseMode, ParserContext};
pub use syntax::TreeSitterEngine;
pub use toolchain::{Toolchain, ToolchainBuilder};

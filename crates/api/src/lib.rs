pub mod error;
pub mod models;
pub mod output;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use models::*;
pub use output::{OutputKind, OutputRoot, ParseOutput};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unknown node kind: {0}")]
    UnknownKind(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

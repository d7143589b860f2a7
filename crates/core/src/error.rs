use scopemux_api::{ApiError, Language, NodeId};
use scopemux_plugin::{ExtractionPass, PluginError};
use thiserror::Error;

/// Misuse of the node lifecycle, detected and neutralized by the arena.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("node {0} was already destroyed")]
    DoubleFree(NodeId),
    #[error("handle {0} does not belong to this arena")]
    ForeignHandle(NodeId),
    #[error("handle {0} outlived the parse it was issued for")]
    StaleHandle(NodeId),
    #[error("canary of node {0} is corrupted; destruction skipped")]
    CanaryCorrupted(NodeId),
    #[error("node {child} already has parent {parent}")]
    AlreadyParented { child: NodeId, parent: NodeId },
    #[error("node {0} cannot be its own parent")]
    SelfParent(NodeId),
    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { child: NodeId, parent: NodeId },
}

#[derive(Error, Debug)]
pub enum ScopemuxError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(Language),
    #[error("Invalid {pass} query for {language}: {message}")]
    Query {
        language: Language,
        pass: ExtractionPass,
        message: String,
    },
    #[error("Engine error: {0}")]
    Engine(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Lifecycle error: {0}")]
    Lifecycle(#[from] LifecycleError),
    #[error("Fatal fault contained: {0}")]
    Fatal(String),
    #[error("Plugin error: {0}")]
    Plugin(String),
    #[error("Model error: {0}")]
    Model(#[from] ApiError),
}

/// Stable classification carried in a session's last-error slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Setup,
    Lifecycle,
    Fatal,
    Internal,
}

impl ScopemuxError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ScopemuxError::UnsupportedLanguage(_)
            | ScopemuxError::Query { .. }
            | ScopemuxError::Engine(_)
            | ScopemuxError::InvalidInput(_)
            | ScopemuxError::Plugin(_) => ErrorCode::Setup,
            ScopemuxError::Lifecycle(_) => ErrorCode::Lifecycle,
            ScopemuxError::Fatal(_) => ErrorCode::Fatal,
            ScopemuxError::Io(_) | ScopemuxError::Json(_) | ScopemuxError::Model(_) => {
                ErrorCode::Internal
            }
        }
    }
}

impl From<PluginError> for ScopemuxError {
    fn from(err: PluginError) -> Self {
        match err {
            PluginError::MissingGrammar(language) => ScopemuxError::UnsupportedLanguage(language),
            PluginError::Engine(message) => ScopemuxError::Engine(message),
            other => ScopemuxError::Plugin(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScopemuxError>;

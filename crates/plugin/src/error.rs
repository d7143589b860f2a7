use scopemux_api::Language;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PluginError {
    #[error("No grammar registered for language {0}")]
    MissingGrammar(Language),
    #[error("Engine error: {0}")]
    Engine(String),
    #[error("Invalid query for {language}: {message}")]
    Query { language: Language, message: String },
    #[error("Adapter error: {0}")]
    Adapter(String),
}

pub type PluginResult<T> = std::result::Result<T, PluginError>;

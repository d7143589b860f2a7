use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    /// Missing grammar or query resource, unsupported language, engine failure.
    SetupError,
    /// One query match could not be turned into a node and was skipped.
    MatchSkipped,
    /// Non-empty input produced no recognizable constructs.
    NoConstructs,
    /// A per-language compliance callback failed.
    ComplianceFailed,
    /// A fault was contained at the crash boundary.
    FatalFault,
    /// Double free, stale handle, re-parenting and similar misuse.
    LifecycleMisuse,
}

impl DiagnosticCode {
    pub fn is_fatal(&self) -> bool {
        matches!(self, DiagnosticCode::SetupError | DiagnosticCode::FatalFault)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::SetupError => "SETUP_ERROR",
            DiagnosticCode::MatchSkipped => "MATCH_SKIPPED",
            DiagnosticCode::NoConstructs => "NO_CONSTRUCTS",
            DiagnosticCode::ComplianceFailed => "COMPLIANCE_FAILED",
            DiagnosticCode::FatalFault => "FATAL_FAULT",
            DiagnosticCode::LifecycleMisuse => "LIFECYCLE_MISUSE",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub message: String,
}

impl Diagnostic {
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.code.is_fatal()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

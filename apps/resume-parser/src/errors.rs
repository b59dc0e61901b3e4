use thiserror::Error;

use crate::documents::DocumentError;
use crate::llm_client::LlmError;

/// Caller-facing error type.
/// Every failure of `parse_resume` surfaces as exactly one of these variants.
#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid file format: {0}")]
    InvalidFormat(String),

    #[error("I/O failure: {0}")]
    IoFailure(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Connection failure: {0}")]
    ConnectionFailure(String),

    #[error("LLM provider error: {0}")]
    ProviderError(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl ResumeError {
    /// Stable machine-readable code, used by the CLI's error output.
    pub fn code(&self) -> &'static str {
        match self {
            ResumeError::FileNotFound(_) => "FILE_NOT_FOUND",
            ResumeError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ResumeError::InvalidFormat(_) => "INVALID_FORMAT",
            ResumeError::IoFailure(_) => "IO_FAILURE",
            ResumeError::InvalidInput(_) => "INVALID_INPUT",
            ResumeError::ConnectionFailure(_) => "CONNECTION_FAILURE",
            ResumeError::ProviderError(_) => "PROVIDER_ERROR",
            ResumeError::ConfigurationError(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<DocumentError> for ResumeError {
    fn from(err: DocumentError) -> Self {
        match err {
            DocumentError::FileNotFound(path) => ResumeError::FileNotFound(path),
            DocumentError::InvalidFormat(msg) => ResumeError::InvalidFormat(msg),
            DocumentError::Io(msg) => ResumeError::IoFailure(msg),
        }
    }
}

impl From<LlmError> for ResumeError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::InvalidPrompt(msg) => ResumeError::InvalidInput(msg),
            LlmError::MissingApiKey => ResumeError::ConfigurationError(err.to_string()),
            LlmError::Authentication(_) | LlmError::Network(_) => {
                ResumeError::ConnectionFailure(err.to_string())
            }
            LlmError::Api { .. } | LlmError::Parse(_) => ResumeError::ProviderError(err.to_string()),
        }
    }
}

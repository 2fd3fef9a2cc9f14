//! Error types for dictbuddy
//!
//! Every failure a lookup can hit, from a missing credential to a
//! half-delivered stream. "Not found" is an answer, not an error.

use thiserror::Error;

/// Main error type for lookups and the REPL around them
#[derive(Error, Debug)]
pub enum LookupError {
    /// Configuration errors (missing credential)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// HTTP client errors
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Non-success status or provider error payload
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Streaming errors
    #[error("Streaming error: {0}")]
    StreamingError(String),

    /// Response body is not the JSON we expect
    #[error("JSON parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Line editor errors
    #[error("Input error: {0}")]
    InputError(String),
}

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;

impl From<rustyline::error::ReadlineError> for LookupError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        LookupError::InputError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LookupError::ApiError {
            status: 401,
            message: "Incorrect API key provided".to_string(),
        };
        assert!(err.to_string().contains("401"));
        assert!(err.to_string().contains("Incorrect API key"));
    }

    #[test]
    fn test_parse_error_from_serde() {
        let err: LookupError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, LookupError::ParseError(_)));
        assert!(err.to_string().starts_with("JSON parse error"));
    }

    #[test]
    fn test_config_error() {
        let err = LookupError::ConfigError("OPENAI_API_KEY not set".to_string());
        assert_eq!(err.to_string(), "Configuration error: OPENAI_API_KEY not set");
    }
}

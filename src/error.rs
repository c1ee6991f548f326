//! @ai:module:intent Error types for the evaluation harness and the oracle boundary
//! @ai:module:layer domain
//! @ai:module:public_api EvalError, OracleError, Result
//! @ai:module:stateless true

use thiserror::Error;

/// @ai:intent Failure of a single classification call
///            Recorded as a failure outcome by the drivers, never propagated from a batch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("oracle API error ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("malformed oracle response: {0}")]
    MalformedResponse(String),

    #[error("invalid field `{field}` in oracle response: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("OPENAI_API_KEY not set in environment")]
    MissingApiKey,
}

/// @ai:intent Unified error type for harness operations
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("cannot aggregate an empty result set")]
    EmptyResultSet,

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

impl EvalError {
    /// @ai:intent Shorthand for configuration errors
    /// @ai:effects pure
    pub fn invalid_config(message: impl Into<String>) -> Self {
        EvalError::InvalidConfiguration(message.into())
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oracle_error_descriptions() {
        let err = OracleError::Http {
            status: 429,
            body: "rate limited".to_string(),
        };
        assert_eq!(err.to_string(), "oracle API error (429): rate limited");

        let err = OracleError::InvalidField {
            field: "reliability_score",
            reason: "1.4 is outside [0, 1]".to_string(),
        };
        assert!(err.to_string().contains("reliability_score"));
    }

    #[test]
    fn test_oracle_error_is_transparent_in_eval_error() {
        let err: EvalError = OracleError::Timeout(30).into();
        assert_eq!(err.to_string(), "request timed out after 30s");
    }
}

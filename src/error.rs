//! Error types for the `daycast` library

use thiserror::Error;

/// Main error type for forecast fetching and parsing
#[derive(Error, Debug)]
pub enum ForecastError {
    /// Connection or I/O failure while talking to the forecast endpoint,
    /// including non-success HTTP status codes
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with an empty body
    #[error("forecast endpoint returned an empty body")]
    EmptyBody,

    /// The payload was not valid JSON or lacked an expected field
    #[error("malformed forecast payload: {0}")]
    MalformedPayload(String),

    /// The request was rejected before any network activity
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(String),

    /// A refresh cycle was cancelled because a newer one was issued
    #[error("refresh generation {generation} was superseded")]
    Superseded { generation: u64 },
}

impl ForecastError {
    /// Create a new malformed-payload error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedPayload(message.into())
    }

    /// Create a new invalid-request error
    pub fn invalid_request<S: Into<String>>(message: S) -> Self {
        Self::InvalidRequest(message.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Network failures and empty bodies are transient; a malformed payload
    /// means the endpoint's data shape does not match and retrying is
    /// pointless. Callers use this to decide whether to offer a retry.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ForecastError::Network(_) | ForecastError::EmptyBody | ForecastError::Superseded { .. }
        )
    }
}

impl From<serde_json::Error> for ForecastError {
    fn from(err: serde_json::Error) -> Self {
        ForecastError::MalformedPayload(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let malformed = ForecastError::malformed("missing field `list`");
        assert!(matches!(malformed, ForecastError::MalformedPayload(_)));

        let invalid = ForecastError::invalid_request("day count out of range");
        assert!(matches!(invalid, ForecastError::InvalidRequest(_)));
    }

    #[test]
    fn test_retryable_classification() {
        assert!(ForecastError::EmptyBody.is_retryable());
        assert!(ForecastError::Superseded { generation: 3 }.is_retryable());
        assert!(!ForecastError::malformed("bad json").is_retryable());
        assert!(!ForecastError::invalid_request("empty location").is_retryable());
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("hello").unwrap_err();
        let err: ForecastError = json_err.into();
        assert!(matches!(err, ForecastError::MalformedPayload(_)));
        assert!(!err.is_retryable());
    }
}

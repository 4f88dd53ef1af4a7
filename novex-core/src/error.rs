//! Error types for the Novex core library.
//!
//! One enum covers the three failure families the assistant can hit:
//! configuration (missing key, bad config file), the model API call
//! (transport, auth, timeout), and response handling (malformed JSON).
//! Failed calls are reported once and never retried.

use thiserror::Error;

/// The main error type for Novex operations.
#[derive(Debug, Error)]
pub enum NovexError {
    // ========================================================================
    // Configuration
    // ========================================================================
    /// No API key available for the live provider.
    #[error("Missing API key: set GEMINI_API_KEY or llm.api_key in novex.toml")]
    MissingApiKey,

    /// Configuration file parse error.
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidConfigValue { key: String, message: String },

    // ========================================================================
    // Model API
    // ========================================================================
    /// API request failed.
    #[error("API request failed: {0}")]
    ApiRequestFailed(String),

    /// API authentication failed.
    #[error("API authentication failed for {service}: {message}")]
    ApiAuthenticationFailed { service: String, message: String },

    /// API rate limit exceeded.
    #[error("API rate limit exceeded for {service}")]
    ApiRateLimitExceeded { service: String },

    /// API service unavailable.
    #[error("API service unavailable: {0}")]
    ApiServiceUnavailable(String),

    /// API call timed out.
    #[error("API request timed out after {0} seconds")]
    ApiTimeout(u64),

    /// API response could not be decoded.
    #[error("Failed to parse API response: {0}")]
    ApiParseError(String),

    // ========================================================================
    // General
    // ========================================================================
    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),

    /// Internal error (catch-all for unexpected conditions).
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for Novex operations.
pub type NovexResult<T> = Result<T, NovexError>;

// ============================================================================
// From trait implementations for seamless error propagation
// ============================================================================

impl From<reqwest::Error> for NovexError {
    fn from(err: reqwest::Error) -> Self {
        let service = err
            .url()
            .and_then(|u| u.host_str().map(|h| h.to_string()))
            .unwrap_or_else(|| "unknown".to_string());

        if err.is_timeout() {
            NovexError::ApiTimeout(30)
        } else if err.is_connect() {
            NovexError::ApiServiceUnavailable(err.to_string())
        } else if err.is_status() {
            match err.status().map(|s| s.as_u16()) {
                Some(429) => NovexError::ApiRateLimitExceeded { service },
                Some(401) | Some(403) => NovexError::ApiAuthenticationFailed {
                    service,
                    message: err.status().map(|s| s.to_string()).unwrap_or_default(),
                },
                _ => NovexError::ApiRequestFailed(err.to_string()),
            }
        } else if err.is_decode() {
            NovexError::ApiParseError(err.to_string())
        } else {
            NovexError::ApiRequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for NovexError {
    fn from(err: serde_json::Error) -> Self {
        NovexError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for NovexError {
    fn from(err: std::io::Error) -> Self {
        NovexError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for NovexError {
    fn from(err: config::ConfigError) -> Self {
        match err {
            config::ConfigError::NotFound(key) => NovexError::InvalidConfigValue {
                key,
                message: "Key not found".to_string(),
            },
            config::ConfigError::Type {
                origin,
                unexpected,
                expected,
                key,
            } => NovexError::InvalidConfigValue {
                key: key.unwrap_or_else(|| origin.map(|o| o.to_string()).unwrap_or_default()),
                message: format!("Expected {}, got {}", expected, unexpected),
            },
            _ => NovexError::ConfigParseError(err.to_string()),
        }
    }
}

// ============================================================================
// Categorization helpers
// ============================================================================

impl NovexError {
    /// Returns true if this error is related to configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            NovexError::MissingApiKey
                | NovexError::ConfigParseError(_)
                | NovexError::InvalidConfigValue { .. }
        )
    }

    /// Returns true if this error came from the model API call.
    pub fn is_api_error(&self) -> bool {
        matches!(
            self,
            NovexError::ApiRequestFailed(_)
                | NovexError::ApiAuthenticationFailed { .. }
                | NovexError::ApiRateLimitExceeded { .. }
                | NovexError::ApiServiceUnavailable(_)
                | NovexError::ApiTimeout(_)
                | NovexError::ApiParseError(_)
        )
    }

    /// Returns true if the same call might succeed later. Used only to pick
    /// a user-facing hint; failed turns are never retried automatically.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            NovexError::ApiRateLimitExceeded { .. }
                | NovexError::ApiServiceUnavailable(_)
                | NovexError::ApiTimeout(_)
        )
    }

    /// Returns a user-friendly suggestion for how to resolve this error.
    pub fn user_suggestion(&self) -> Option<&'static str> {
        match self {
            NovexError::MissingApiKey => {
                Some("Create a .env file with GEMINI_API_KEY or run with --demo")
            }
            NovexError::ApiAuthenticationFailed { .. } => {
                Some("Check your API key in the configuration")
            }
            NovexError::ApiRateLimitExceeded { .. } => {
                Some("Wait for the rate limit to reset before sending again")
            }
            NovexError::ApiServiceUnavailable(_) | NovexError::ApiTimeout(_) => {
                Some("Check your network connection and send the message again")
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NovexError::MissingApiKey;
        assert!(err.to_string().contains("GEMINI_API_KEY"));

        let err = NovexError::ApiAuthenticationFailed {
            service: "generativelanguage.googleapis.com".to_string(),
            message: "401 Unauthorized".to_string(),
        };
        assert!(err.to_string().contains("generativelanguage"));
    }

    #[test]
    fn test_error_categorization() {
        let config_err = NovexError::MissingApiKey;
        assert!(config_err.is_config_error());
        assert!(!config_err.is_api_error());

        let api_err = NovexError::ApiRequestFailed("network error".to_string());
        assert!(api_err.is_api_error());
        assert!(!api_err.is_config_error());
    }

    #[test]
    fn test_is_transient() {
        assert!(NovexError::ApiTimeout(30).is_transient());
        assert!(NovexError::ApiServiceUnavailable("503".to_string()).is_transient());
        assert!(NovexError::ApiRateLimitExceeded {
            service: "api".to_string()
        }
        .is_transient());

        assert!(!NovexError::MissingApiKey.is_transient());
        assert!(!NovexError::ApiParseError("bad json".to_string()).is_transient());
    }

    #[test]
    fn test_user_suggestions() {
        assert!(NovexError::MissingApiKey.user_suggestion().is_some());
        assert!(NovexError::ApiTimeout(30).user_suggestion().is_some());
        assert!(NovexError::Internal("err".to_string())
            .user_suggestion()
            .is_none());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_result: Result<serde_json::Value, _> = serde_json::from_str("not json");
        let err: NovexError = json_result.unwrap_err().into();
        assert!(matches!(err, NovexError::SerializationError(_)));
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: NovexError = io_err.into();
        assert!(matches!(err, NovexError::IoError(_)));
    }
}

//! # Client Error Types
//!
//! Error types for cart store operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Protocol            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connection     │  │  Rejected (success=0)   │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  DeserializationFailed  │ │
//! │  │  ConfigLoad/Save│  │  HttpStatus     │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │  Local (CoreError): stock pre-check, empty cart, missing line   │   │
//! │  │  raised before any request is sent                              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use cartsync_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Every way a cart operation can fail.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Invalid API base URL.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never got a response.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The HTTP client gave up waiting.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-2xx status without a decodable envelope.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // =========================================================================
    // Protocol Errors
    // =========================================================================
    /// The API answered with `success: false`.
    #[error("{message}")]
    Rejected { message: String },

    /// The response body did not match the expected shape.
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// A local pre-check failed; nothing was sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::DeserializationFailed(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::HttpStatus {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            ClientError::ConnectionFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::DeserializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Shorthand for a rejected envelope.
    pub fn rejected(message: impl Into<String>) -> Self {
        ClientError::Rejected {
            message: message.into(),
        }
    }

    /// Returns true if the error was raised before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, ClientError::Core(_)) || self.is_config_error()
    }

    /// Returns true if the server answered `success: false`.
    pub fn is_rejected(&self) -> bool {
        matches!(self, ClientError::Rejected { .. })
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert!(ClientError::Core(CoreError::EmptyCart).is_local());
        assert!(ClientError::InvalidUrl("x".into()).is_local());
        assert!(!ClientError::rejected("no such product").is_local());
        assert!(ClientError::rejected("no such product").is_rejected());
        assert!(!ClientError::Timeout("30s".into()).is_rejected());
        assert!(ClientError::ConfigSaveFailed("disk".into()).is_config_error());
    }

    #[test]
    fn test_error_display() {
        // Rejections surface the server's message untouched.
        assert_eq!(ClientError::rejected("找不到產品").to_string(), "找不到產品");

        let err = ClientError::HttpStatus {
            status: 502,
            body: "bad gateway".into(),
        };
        assert_eq!(err.to_string(), "HTTP 502: bad gateway");

        let err: ClientError = CoreError::EmptyCart.into();
        assert_eq!(err.to_string(), "Cart is empty");
    }

    #[test]
    fn test_validation_error_converts() {
        let err: ClientError = ValidationError::Required {
            field: "coupon code".into(),
        }
        .into();
        assert!(matches!(err, ClientError::Core(CoreError::Validation(_))));
        assert!(err.is_local());
    }
}

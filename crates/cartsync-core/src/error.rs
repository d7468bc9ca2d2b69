//! # Error Types
//!
//! Domain-specific error types for cartsync-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cartsync-core errors (this file)                                      │
//! │  ├── CoreError        - Local pre-check failures                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  cartsync-client errors (separate crate)                               │
//! │  └── ClientError      - Config, transport and rejected requests        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ClientError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `CoreError` is raised before a request leaves the process.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Local cart errors.
///
/// These represent checks the client can make against its own copy of the
/// cart. The server stays authoritative, so passing them does not guarantee
/// the request will succeed.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Adding would push a line item past the product's available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 3), cart already holds 4, stock = 5
    ///      │
    ///      ▼
    /// 4 + 3 > 5
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Matcha Latte", available: 5, requested: 7 }
    ///      │
    ///      ▼
    /// No request is sent
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// No line item with this cart id exists in the local cart.
    #[error("Cart line item not found: {0}")]
    LineItemNotFound(String),

    /// The operation needs at least one line item.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            product: "Matcha Latte".to_string(),
            available: 5,
            requested: 7,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Matcha Latte: available 5, requested 7"
        );
        assert_eq!(CoreError::EmptyCart.to_string(), "Cart is empty");
        assert_eq!(
            CoreError::LineItemNotFound("-Nabc".into()).to_string(),
            "Cart line item not found: -Nabc"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "code".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
        assert_eq!(core_err.to_string(), "Validation error: code is required");
    }
}

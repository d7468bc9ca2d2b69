//! # Validation Module
//!
//! Checks the client runs against its own state before sending a request.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: THIS MODULE (client side, best effort)                       │
//! │  ├── Quantity range, stock pre-check                                   │
//! │  └── Coupon code / order form shape                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Commerce API (authoritative)                                 │
//! │  ├── Real stock, product availability                                  │
//! │  └── Coupon validity, order acceptance                                 │
//! │                                                                         │
//! │  A failure here means no request is sent.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cartsync_core::validation::{validate_coupon_code, validate_quantity};
//!
//! validate_quantity(5).unwrap();
//! assert_eq!(validate_coupon_code("  spring80 ").unwrap(), "spring80");
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{LineItem, OrderRequest};
use crate::{MAX_COUPON_CODE_LEN, MAX_ITEM_QUANTITY, MAX_ORDER_MESSAGE_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantity & Stock
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Returns true if `new_qty` fits in the product's known stock.
///
/// A product without a stock count always fits; the server decides.
pub fn fits_stock(item: &LineItem, new_qty: i64) -> bool {
    item.product.num.map_or(true, |num| new_qty <= num)
}

/// Stock pre-check for adding `additional` units to an existing line.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  add_item("-Nprod1", 3)                                                 │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  Line already in cart? ── no ──► skip (stock unknown locally)          │
/// │       │ yes                                                             │
/// │       ▼                                                                 │
/// │  check_stock(line, 3) ← THIS FUNCTION                                  │
/// │       │                                                                 │
/// │       ├── stock unknown? → skip                                        │
/// │       ├── qty + 3 > product.num? → InsufficientStock, no request       │
/// │       │                                                                 │
/// │       └── OK → POST /cart                                              │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn check_stock(item: &LineItem, additional: i64) -> CoreResult<()> {
    let Some(available) = item.product.num else {
        return Ok(());
    };

    let requested = item.qty + additional;
    if requested > available {
        return Err(CoreError::InsufficientStock {
            product: item.product.title.clone(),
            available,
            requested,
        });
    }
    Ok(())
}

// =============================================================================
// Identifiers
// =============================================================================

/// Validates that an identifier (cart id, product id) is non-empty.
pub fn validate_id(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Coupon
// =============================================================================

/// Validates a coupon code and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most MAX_COUPON_CODE_LEN characters
pub fn validate_coupon_code(code: &str) -> ValidationResult<String> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "coupon code".to_string(),
        });
    }

    if code.chars().count() > MAX_COUPON_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "coupon code".to_string(),
            max: MAX_COUPON_CODE_LEN,
        });
    }

    Ok(code.to_string())
}

// =============================================================================
// Order Form
// =============================================================================

/// Validates the order form before submission.
///
/// ## Rules
/// - name, address, tel are required
/// - email must look like `local@domain`
/// - tel is digits with an optional leading `+`, at least 8 digits
/// - message at most MAX_ORDER_MESSAGE_LEN characters
pub fn validate_order(order: &OrderRequest) -> ValidationResult<()> {
    let user = &order.user;

    for (field, value) in [("name", &user.name), ("address", &user.address)] {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    validate_email(&user.email)?;
    validate_tel(&user.tel)?;

    if order.message.chars().count() > MAX_ORDER_MESSAGE_LEN {
        return Err(ValidationError::TooLong {
            field: "message".to_string(),
            max: MAX_ORDER_MESSAGE_LEN,
        });
    }

    Ok(())
}

fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }
    Ok(())
}

fn validate_tel(tel: &str) -> ValidationResult<()> {
    let tel = tel.trim();
    if tel.is_empty() {
        return Err(ValidationError::Required {
            field: "tel".to_string(),
        });
    }

    let digits = tel.strip_prefix('+').unwrap_or(tel);
    if digits.len() < 8 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "tel".to_string(),
            reason: "must be at least 8 digits".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::{OrderUser, Product};

    fn line(qty: i64, stock: i64) -> LineItem {
        LineItem {
            id: "-Ncart1".to_string(),
            product_id: "-Nprod1".to_string(),
            qty,
            total: Money::from_major(120 * qty),
            final_total: Money::from_major(120 * qty),
            product: Product {
                id: "-Nprod1".to_string(),
                title: "Matcha Latte".to_string(),
                category: "drinks".to_string(),
                unit: "cup".to_string(),
                origin_price: Money::from_major(150),
                price: Money::from_major(120),
                num: Some(stock),
                image_url: None,
                description: None,
                content: None,
                is_enabled: true,
            },
            coupon: None,
        }
    }

    fn order() -> OrderRequest {
        OrderRequest {
            user: OrderUser {
                name: "Lin Mei".to_string(),
                email: "mei@example.com".to_string(),
                tel: "0912345678".to_string(),
                address: "No. 1, Section 1, Taipei".to_string(),
            },
            message: "Leave at the front desk".to_string(),
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_fits_stock() {
        let item = line(2, 5);
        assert!(fits_stock(&item, 5));
        assert!(!fits_stock(&item, 6));
    }

    #[test]
    fn test_check_stock() {
        let item = line(4, 5);
        assert!(check_stock(&item, 1).is_ok());

        let err = check_stock(&item, 2).unwrap_err();
        match err {
            CoreError::InsufficientStock {
                product,
                available,
                requested,
            } => {
                assert_eq!(product, "Matcha Latte");
                assert_eq!(available, 5);
                assert_eq!(requested, 6);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_stock_is_not_checked() {
        let mut item = line(1, 0);
        item.product.num = None;
        assert!(fits_stock(&item, 500));
        assert!(check_stock(&item, 1).is_ok());
        assert!(check_stock(&item, 998).is_ok());
    }

    #[test]
    fn test_validate_id() {
        assert!(validate_id("cart id", "-Ncart1").is_ok());
        assert!(validate_id("cart id", "  ").is_err());
    }

    #[test]
    fn test_validate_coupon_code() {
        assert_eq!(validate_coupon_code(" spring80 ").unwrap(), "spring80");
        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_order() {
        assert!(validate_order(&order()).is_ok());

        let mut international = order();
        international.user.tel = "+886912345678".to_string();
        assert!(validate_order(&international).is_ok());

        let mut missing_name = order();
        missing_name.user.name = " ".to_string();
        assert!(matches!(
            validate_order(&missing_name),
            Err(ValidationError::Required { .. })
        ));

        let mut bad_email = order();
        bad_email.user.email = "mei.example.com".to_string();
        assert!(matches!(
            validate_order(&bad_email),
            Err(ValidationError::InvalidFormat { .. })
        ));

        let mut short_tel = order();
        short_tel.user.tel = "12345".to_string();
        assert!(validate_order(&short_tel).is_err());

        let mut long_message = order();
        long_message.message = "a".repeat(501);
        assert!(matches!(
            validate_order(&long_message),
            Err(ValidationError::TooLong { .. })
        ));
    }
}

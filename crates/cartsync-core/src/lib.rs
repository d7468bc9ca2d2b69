//! # cartsync-core: Pure Cart Types
//!
//! This crate holds the data model shared by the cart client and the CLI.
//! It contains no I/O: every type here is either decoded from the commerce
//! API or validated before a request is sent.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        cartsync Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (cartsync binary)                   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │         cartsync-client (CartStore, HttpCartApi, config)        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cartsync-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   error   │  │ validation│  │   │
//! │  │   │   Cart    │  │   Money   │  │ CoreError │  │   stock   │  │   │
//! │  │   │ LineItem  │  │           │  │           │  │   input   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Cart snapshot types (Cart, LineItem, Product, OrderRequest)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Stock and input checks run before a request is sent
//!
//! ## Example Usage
//!
//! ```rust
//! use cartsync_core::{Cart, Money};
//!
//! let cart = Cart::empty();
//! assert!(cart.is_empty());
//! assert_eq!(cart.total_amount(), Money::zero());
//! ```

pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity of a single line item accepted by the client.
///
/// ## Business Reason
/// Catches typos (1000 instead of 10) before they reach the server.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum length of a coupon code.
pub const MAX_COUPON_CODE_LEN: usize = 64;

/// Maximum length of the free-text order message.
pub const MAX_ORDER_MESSAGE_LEN: usize = 500;

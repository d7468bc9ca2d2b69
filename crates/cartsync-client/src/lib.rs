//! # cartsync-client: Cart Store over the Commerce API
//!
//! This crate keeps a local shopping cart in step with a remote commerce
//! API. The server owns the cart; the client holds the latest snapshot and
//! refetches it after every successful mutation.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Client Architecture                         │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      CartStore<A: CartApi>                       │  │
//! │  │                                                                  │  │
//! │  │  Local snapshot (Cart) + derived item count / total             │  │
//! │  │  Stock pre-check, decrement, order cleanup                      │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │  HttpCartApi   │  │   protocol     │  │  ClientConfig          │    │
//! │  │                │  │                │  │                        │    │
//! │  │ reqwest client │  │ {"data": ...}  │  │ base URL, api path     │    │
//! │  │ one method per │  │ envelope with  │  │ timeouts               │    │
//! │  │ endpoint       │  │ success flag   │  │ TOML + env overrides   │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`store`] - `CartStore` and its operations
//! - [`api`] - `CartApi` trait and the HTTP implementation
//! - [`protocol`] - Request bodies and response envelope
//! - [`config`] - Client configuration
//! - [`error`] - Client error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cartsync_client::{CartStore, ClientConfig, HttpCartApi};
//!
//! # async fn run() -> cartsync_client::ClientResult<()> {
//! let config = ClientConfig::load_or_default(None);
//! let mut store = CartStore::new(HttpCartApi::new(config)?);
//!
//! store.fetch_cart().await?;
//! store.add_item("-Nprod1", 2).await?;
//! println!("{} items, {} due", store.item_count(), store.total_amount());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod protocol;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{CartApi, HttpCartApi};
pub use config::{ApiSettings, ClientConfig};
pub use error::{ClientError, ClientResult};
pub use protocol::Ack;
pub use store::{CartStore, CouponReceipt, OrderReceipt, ALREADY_EMPTY_MESSAGE};

pub use cartsync_core::{Cart, LineItem, Money, OrderRequest, OrderUser, Product};

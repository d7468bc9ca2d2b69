//! # Cart Store
//!
//! Owns the local copy of the cart and keeps it equal to the server's
//! latest snapshot.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  Operation         Local pre-check          Request(s)         State   │
//! │  ─────────         ───────────────          ──────────         ─────   │
//! │                                                                         │
//! │  fetch_cart        -                        GET /cart          replace │
//! │  add_item          stock of existing line   POST /cart + GET   replace │
//! │  update_item       qty > 0, stock if grows  PUT /cart/{id}+GET replace │
//! │  remove_item       -                        DELETE /cart/{id}  replace │
//! │                                             + GET                       │
//! │  clear             empty? → done            DELETE /carts      empty   │
//! │  decrement_item    line exists              remove or update   replace │
//! │  place_order       form, non-empty cart     GET, POST /order,  empty   │
//! │                                             DELETE each line            │
//! │  apply_coupon      code shape               POST /coupon + GET replace │
//! │                                                                         │
//! │  Any failure propagates, except line cleanup after an order.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! Mutating operations take `&mut self`. Callers that share a store across
//! tasks wrap it in a `tokio::sync::Mutex`; the store itself does no locking.

use cartsync_core::validation::{
    check_stock, fits_stock, validate_coupon_code, validate_id, validate_order, validate_quantity,
};
use cartsync_core::{Cart, CoreError, Money, OrderRequest, ValidationError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::api::CartApi;
use crate::error::ClientResult;
use crate::protocol::{Ack, CartLineInput, CouponInput};

/// Message returned by [`CartStore::clear`] when there was nothing to clear.
pub const ALREADY_EMPTY_MESSAGE: &str = "Cart is already empty";

// =============================================================================
// Results
// =============================================================================

/// Outcome of [`CartStore::place_order`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderReceipt {
    pub order_id: String,

    /// Order total as reported by the server.
    pub total: Money,

    pub created_at: Option<DateTime<Utc>>,

    /// False when removing the ordered lines from the cart failed. The
    /// order itself was still placed.
    pub cleanup_complete: bool,
}

/// Outcome of [`CartStore::apply_coupon`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CouponReceipt {
    pub message: String,

    /// `final_total` reported by the coupon endpoint.
    pub final_total: Money,
}

// =============================================================================
// Store
// =============================================================================

/// Client-side cart state synchronized with the commerce API.
#[derive(Debug)]
pub struct CartStore<A> {
    api: A,
    cart: Cart,
}

impl<A: CartApi> CartStore<A> {
    /// Creates a store with an empty local cart. Call
    /// [`fetch_cart`](Self::fetch_cart) to load the server's state.
    pub fn new(api: A) -> Self {
        CartStore {
            api,
            cart: Cart::empty(),
        }
    }

    /// The current local snapshot.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The transport this store talks through.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Total quantity across all lines.
    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    /// Amount due after discounts.
    pub fn total_amount(&self) -> Money {
        self.cart.total_amount()
    }

    /// Returns true if `new_qty` fits the known stock of line `cart_id`.
    pub fn fits_stock(&self, cart_id: &str, new_qty: i64) -> ClientResult<bool> {
        let item = self
            .cart
            .find_by_id(cart_id)
            .ok_or_else(|| CoreError::LineItemNotFound(cart_id.to_string()))?;
        Ok(fits_stock(item, new_qty))
    }

    // =========================================================================
    // Retrieval
    // =========================================================================

    /// Fetches the server's snapshot and replaces the local cart with it.
    pub async fn fetch_cart(&mut self) -> ClientResult<&Cart> {
        let cart = self.api.get_cart().await?;
        debug!(
            lines = cart.line_count(),
            items = cart.item_count(),
            final_total = %cart.final_total,
            "Cart refreshed"
        );
        self.cart = cart;
        Ok(&self.cart)
    }

    /// Same as [`fetch_cart`](Self::fetch_cart).
    pub async fn refresh_cart(&mut self) -> ClientResult<&Cart> {
        self.fetch_cart().await
    }

    // =========================================================================
    // Line Mutations
    // =========================================================================

    /// Adds `qty` units of a product.
    ///
    /// If the product already has a line, the combined quantity must fit
    /// that line's known stock or the call fails without a request. A
    /// product not yet in the cart has no locally known stock, so only the
    /// server checks it.
    pub async fn add_item(&mut self, product_id: &str, qty: i64) -> ClientResult<Ack> {
        validate_id("product id", product_id)?;
        validate_quantity(qty)?;

        if let Some(existing) = self.cart.find_by_product(product_id) {
            check_stock(existing, qty)?;
        }

        debug!(product_id, qty, "Adding to cart");
        let ack = self
            .api
            .add_line(&CartLineInput {
                product_id: product_id.to_string(),
                qty,
            })
            .await?;

        self.fetch_cart().await?;
        Ok(ack)
    }

    /// Sets the quantity of line `cart_id`.
    ///
    /// The quantity must be positive; use [`remove_item`](Self::remove_item)
    /// to drop a line. Growing a known line past its stock fails locally.
    /// Shrinking a known line is never bounded from above, so a line the
    /// server holds above `MAX_ITEM_QUANTITY` can still be reduced.
    pub async fn update_item(
        &mut self,
        cart_id: &str,
        product_id: &str,
        qty: i64,
    ) -> ClientResult<Ack> {
        validate_id("cart id", cart_id)?;
        validate_id("product id", product_id)?;

        match self.cart.find_by_id(cart_id) {
            Some(existing) if qty <= existing.qty => {
                if qty <= 0 {
                    return Err(ValidationError::MustBePositive {
                        field: "quantity".to_string(),
                    }
                    .into());
                }
            }
            Some(existing) => {
                validate_quantity(qty)?;
                check_stock(existing, qty - existing.qty)?;
            }
            None => validate_quantity(qty)?,
        }

        debug!(cart_id, product_id, qty, "Updating cart line");
        let ack = self
            .api
            .update_line(
                cart_id,
                &CartLineInput {
                    product_id: product_id.to_string(),
                    qty,
                },
            )
            .await?;

        self.fetch_cart().await?;
        Ok(ack)
    }

    /// Removes line `cart_id`.
    pub async fn remove_item(&mut self, cart_id: &str) -> ClientResult<Ack> {
        validate_id("cart id", cart_id)?;

        debug!(cart_id, "Removing cart line");
        let ack = self.api.remove_line(cart_id).await?;

        self.fetch_cart().await?;
        Ok(ack)
    }

    /// Reduces line `cart_id` by `amount`, removing it when nothing is left.
    ///
    /// ```text
    /// qty 3, amount 1  →  PUT qty 2
    /// qty 3, amount 3  →  DELETE (never PUT qty 0)
    /// qty 3, amount 5  →  DELETE
    /// ```
    pub async fn decrement_item(&mut self, cart_id: &str, amount: i64) -> ClientResult<Ack> {
        if amount <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "amount".to_string(),
            }
            .into());
        }

        let (product_id, current) = match self.cart.find_by_id(cart_id) {
            Some(item) => (item.product_id.clone(), item.qty),
            None => return Err(CoreError::LineItemNotFound(cart_id.to_string()).into()),
        };

        let new_qty = current - amount;
        if new_qty <= 0 {
            return self.remove_item(cart_id).await;
        }

        self.update_item(cart_id, &product_id, new_qty).await
    }

    /// Empties the cart.
    ///
    /// An already-empty local cart succeeds with [`ALREADY_EMPTY_MESSAGE`]
    /// and sends nothing.
    pub async fn clear(&mut self) -> ClientResult<Ack> {
        if self.cart.is_empty() {
            debug!("Cart already empty, nothing to clear");
            return Ok(Ack::new(ALREADY_EMPTY_MESSAGE));
        }

        let ack = self.api.clear_lines().await.map_err(|e| {
            error!(error = %e, "Failed to clear cart");
            e
        })?;

        self.cart = Cart::empty();
        info!("Cart cleared");
        Ok(ack)
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Places an order for the current cart contents.
    ///
    /// ## Flow
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  1. validate form          ── invalid ──► Err, nothing sent        │
    /// │  2. GET /cart              ── empty ────► Err(EmptyCart)           │
    /// │  3. POST /order            ── rejected ─► Err(Rejected)            │
    /// │  4. DELETE /cart/{id} × n  ── failure ──► warn!, keep going to 5   │
    /// │  5. Ok(OrderReceipt { order_id, cleanup_complete })                │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Step 4 stops at the first failed removal. The order already exists,
    /// so the failure is logged and reported through `cleanup_complete`.
    pub async fn place_order(&mut self, order: &OrderRequest) -> ClientResult<OrderReceipt> {
        validate_order(order)?;

        self.fetch_cart().await?;
        if self.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        let created = self.api.create_order(order).await.map_err(|e| {
            error!(error = %e, "Failed to create order");
            e
        })?;

        info!(order_id = %created.order_id, total = %created.total, "Order created");

        let cleanup_complete = match self.remove_ordered_lines().await {
            Ok(()) => {
                self.cart = Cart::empty();
                true
            }
            Err(e) => {
                warn!(
                    order_id = %created.order_id,
                    error = %e,
                    "Cart cleanup failed, but the order was created"
                );
                false
            }
        };

        Ok(OrderReceipt {
            order_id: created.order_id,
            total: created.total,
            created_at: created.create_at,
            cleanup_complete,
        })
    }

    async fn remove_ordered_lines(&mut self) -> ClientResult<()> {
        let ids: Vec<String> = self.cart.carts.iter().map(|item| item.id.clone()).collect();
        for id in ids {
            self.remove_item(&id).await?;
        }
        Ok(())
    }

    /// Applies a coupon code, then refreshes the cart so totals reflect it.
    pub async fn apply_coupon(&mut self, code: &str) -> ClientResult<CouponReceipt> {
        let code = validate_coupon_code(code)?;

        debug!(code = %code, "Applying coupon");
        let (ack, applied) = self.api.apply_coupon(&CouponInput { code }).await?;

        self.fetch_cart().await?;
        Ok(CouponReceipt {
            message: ack.message,
            final_total: applied.final_total,
        })
    }
}

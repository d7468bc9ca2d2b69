//! # Domain Types
//!
//! Cart snapshot types as the commerce API returns them.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Cart       │   │    LineItem     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  carts ─────────┼──►│  id (cart id)   │   │  id             │       │
//! │  │  total          │   │  product_id     │   │  title          │       │
//! │  │  final_total    │   │  qty            │   │  price          │       │
//! │  └─────────────────┘   │  product ───────┼──►│  num (stock)    │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │  OrderRequest   │   │     Coupon      │                             │
//! │  │  user, message  │   │  code, percent  │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Two Identifiers per Line
//! A line item has its own `id` (the cart id used in `/cart/{id}` paths) and
//! the `product_id` it refers to. The backend keeps at most one line per
//! product, so `product_id` is unique within a snapshot as well.

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Product Snapshot
// =============================================================================

/// Product data embedded in a line item.
///
/// The snapshot reflects the product at the time the cart was fetched,
/// including `num`, the stock count used for the local pre-check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub unit: String,

    /// List price before any sale.
    #[serde(default)]
    pub origin_price: Money,

    /// Selling price per unit.
    pub price: Money,

    /// Available stock. Absent when the snapshot leaves it out, in which
    /// case only the server checks stock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num: Option<i64>,

    #[serde(default, rename = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// The API sends 0/1 here.
    #[serde(default = "default_enabled", with = "flag")]
    pub is_enabled: bool,
}

fn default_enabled() -> bool {
    true
}

// =============================================================================
// Coupon
// =============================================================================

/// A coupon attached to a line item after `POST /coupon` succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coupon {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub title: String,

    pub code: String,

    /// Percentage of the price the customer pays (80 = 20% off).
    #[serde(default)]
    pub percent: u32,

    /// Unix timestamp (seconds).
    #[serde(default)]
    pub due_date: i64,

    #[serde(default = "default_enabled", with = "flag")]
    pub is_enabled: bool,
}

// =============================================================================
// Line Item
// =============================================================================

/// One product-quantity pairing within a cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Cart id of this line (path segment for update/remove).
    pub id: String,

    pub product_id: String,

    pub qty: i64,

    /// Line total before discounts.
    #[serde(default)]
    pub total: Money,

    /// Line total after any coupon.
    #[serde(default)]
    pub final_total: Money,

    pub product: Product,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coupon: Option<Coupon>,
}

impl LineItem {
    /// Quantity still addable before hitting the product's stock, if the
    /// stock is known.
    pub fn remaining_stock(&self) -> Option<i64> {
        self.product.num.map(|num| (num - self.qty).max(0))
    }
}

// =============================================================================
// Cart
// =============================================================================

/// Server-authoritative cart snapshot.
///
/// ## Invariants
/// - Replaced wholesale after every successful mutating call
/// - At most one line item per `product_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Cart {
    #[serde(default)]
    pub carts: Vec<LineItem>,

    /// Subtotal before discounts.
    #[serde(default)]
    pub total: Money,

    /// Amount due after discounts.
    #[serde(default)]
    pub final_total: Money,
}

impl Cart {
    /// An empty cart with zero totals.
    pub fn empty() -> Self {
        Cart::default()
    }

    /// Checks if the cart has no line items.
    pub fn is_empty(&self) -> bool {
        self.carts.is_empty()
    }

    /// Number of distinct line items.
    pub fn line_count(&self) -> usize {
        self.carts.len()
    }

    /// Total quantity across all line items (the cart badge number).
    pub fn item_count(&self) -> i64 {
        self.carts.iter().map(|item| item.qty).sum()
    }

    /// Amount due, i.e. `final_total`.
    pub fn total_amount(&self) -> Money {
        self.final_total
    }

    /// Amount saved by coupons (`total - final_total`), never negative.
    pub fn discount(&self) -> Money {
        self.final_total.discount_from(self.total)
    }

    /// Finds the line item for a product.
    pub fn find_by_product(&self, product_id: &str) -> Option<&LineItem> {
        self.carts.iter().find(|item| item.product_id == product_id)
    }

    /// Finds a line item by its cart id.
    pub fn find_by_id(&self, cart_id: &str) -> Option<&LineItem> {
        self.carts.iter().find(|item| item.id == cart_id)
    }

    /// Quantity of a product currently in the cart (0 if absent).
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.find_by_product(product_id)
            .map(|item| item.qty)
            .unwrap_or(0)
    }
}

// =============================================================================
// Orders
// =============================================================================

/// Customer details submitted with an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderUser {
    pub name: String,
    pub email: String,
    pub tel: String,
    pub address: String,
}

/// Order metadata submitted to `POST /order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub user: OrderUser,

    #[serde(default)]
    pub message: String,
}

// =============================================================================
// Flag (de)serialization
// =============================================================================

/// Accepts `0`/`1` as well as `true`/`false`; writes `0`/`1`.
mod flag {
    use serde::de::{self, Deserializer, Unexpected, Visitor};
    use serde::Serializer;
    use std::fmt;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        deserializer.deserialize_any(FlagVisitor)
    }

    struct FlagVisitor;

    impl<'de> Visitor<'de> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("0, 1 or a boolean")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(Unexpected::Signed(other), &self)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
        "carts": [
            {
                "id": "-Ncart1",
                "product_id": "-Nprod1",
                "qty": 2,
                "total": 240,
                "final_total": 192,
                "product": {
                    "id": "-Nprod1",
                    "title": "Matcha Latte",
                    "category": "drinks",
                    "unit": "cup",
                    "origin_price": 150,
                    "price": 120,
                    "num": 5,
                    "imageUrl": "https://example.com/matcha.png",
                    "is_enabled": 1
                },
                "coupon": {
                    "id": "-Ncoupon",
                    "title": "Spring sale",
                    "code": "spring80",
                    "percent": 80,
                    "due_date": 1767225600,
                    "is_enabled": 1
                }
            },
            {
                "id": "-Ncart2",
                "product_id": "-Nprod2",
                "qty": 1,
                "total": 90,
                "final_total": 72,
                "product": {
                    "id": "-Nprod2",
                    "title": "Scone",
                    "price": 90,
                    "num": 10,
                    "is_enabled": 0
                }
            }
        ],
        "total": 330,
        "final_total": 264
    }"#;

    #[test]
    fn test_decode_cart_snapshot() {
        let cart: Cart = serde_json::from_str(SNAPSHOT).unwrap();

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total, Money::from_major(330));
        assert_eq!(cart.total_amount(), Money::from_major(264));
        assert_eq!(cart.discount(), Money::from_major(66));

        let matcha = cart.find_by_product("-Nprod1").unwrap();
        assert_eq!(matcha.id, "-Ncart1");
        assert_eq!(matcha.product.num, Some(5));
        assert_eq!(matcha.remaining_stock(), Some(3));
        assert!(matcha.product.is_enabled);
        assert_eq!(matcha.coupon.as_ref().unwrap().percent, 80);

        let scone = cart.find_by_id("-Ncart2").unwrap();
        assert!(!scone.product.is_enabled);
        assert_eq!(scone.product.origin_price, Money::zero());
        assert!(scone.coupon.is_none());
    }

    #[test]
    fn test_empty_cart() {
        let cart = Cart::empty();
        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_amount(), Money::zero());
        assert_eq!(cart.quantity_of("anything"), 0);

        // An empty snapshot may omit every field.
        let decoded: Cart = serde_json::from_str("{}").unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_discount_never_negative() {
        let cart = Cart {
            carts: Vec::new(),
            total: Money::from_major(100),
            final_total: Money::from_major(120),
        };
        assert_eq!(cart.discount(), Money::zero());
    }

    #[test]
    fn test_product_without_stock() {
        let json = r#"{"id": "-Nprod3", "title": "Tea", "price": 60}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.num, None);
        assert!(!serde_json::to_string(&product).unwrap().contains("num"));

        let line = LineItem {
            id: "-Ncart3".to_string(),
            product_id: product.id.clone(),
            qty: 1,
            total: Money::from_major(60),
            final_total: Money::from_major(60),
            product,
            coupon: None,
        };
        assert_eq!(line.remaining_stock(), None);
    }

    #[test]
    fn test_flag_rejects_other_numbers() {
        let json = r#"{"id": "p", "title": "t", "price": 1, "is_enabled": 2}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }
}

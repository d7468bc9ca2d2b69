//! # Wire Protocol
//!
//! Request and response shapes of the commerce API.
//!
//! ## Envelope
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every response is a flat JSON object with a success flag:             │
//! │                                                                         │
//! │  GET /cart     {"success": true, "data": {"carts": [...], ...}}        │
//! │  POST /cart    {"success": true, "message": "已加入購物車"}              │
//! │  POST /order   {"success": true, "orderId": "-N...", "total": 330,     │
//! │                 "create_at": 1767225600, "message": "..."}             │
//! │  POST /coupon  {"success": true, "data": {"final_total": 264}}         │
//! │  any failure   {"success": false, "message": "..." | ["...", "..."]}   │
//! │                                                                         │
//! │  `success` decides the outcome, even on a 2xx status.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Request bodies are wrapped in `{"data": ...}`.

use cartsync_core::{Cart, Money};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ClientError, ClientResult};

/// Message used when a rejection carries no text.
const DEFAULT_REJECTION: &str = "Request was rejected by the server";

// =============================================================================
// Requests
// =============================================================================

/// The `{"data": ...}` wrapper every request body uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataWrapper<T> {
    pub data: T,
}

impl<T> DataWrapper<T> {
    pub fn new(data: T) -> Self {
        DataWrapper { data }
    }
}

/// Body of `POST /cart` and `PUT /cart/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineInput {
    pub product_id: String,
    pub qty: i64,
}

/// Body of `POST /coupon`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponInput {
    pub code: String,
}

// =============================================================================
// Envelope
// =============================================================================

/// A response before its payload has been interpreted.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    pub success: bool,

    #[serde(default, deserialize_with = "message_text")]
    pub message: Option<String>,

    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl Envelope {
    /// Parses a response body.
    pub fn parse(body: &str) -> ClientResult<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// Fails with [`ClientError::Rejected`] unless `success` is true.
    pub fn ensure_success(&self) -> ClientResult<()> {
        if self.success {
            Ok(())
        } else {
            Err(ClientError::rejected(
                self.message.clone().unwrap_or_else(|| DEFAULT_REJECTION.to_string()),
            ))
        }
    }

    /// Decodes the payload fields of a successful envelope.
    pub fn into_payload<T: DeserializeOwned>(self) -> ClientResult<T> {
        self.ensure_success()?;
        Ok(serde_json::from_value(serde_json::Value::Object(self.rest))?)
    }

    /// Turns a successful envelope into an [`Ack`].
    pub fn into_ack(self) -> ClientResult<Ack> {
        self.ensure_success()?;
        Ok(Ack {
            message: self.message.unwrap_or_default(),
        })
    }
}

/// `message` is a string on most endpoints and a list of strings on
/// validation failures.
fn message_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Message {
        One(String),
        Many(Vec<String>),
    }

    Ok(match Option::<Message>::deserialize(deserializer)? {
        Some(Message::One(text)) => Some(text),
        Some(Message::Many(lines)) => Some(lines.join("; ")),
        None => None,
    })
}

// =============================================================================
// Responses
// =============================================================================

/// Acknowledgement of a mutation, carrying the server's message.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Ack {
    pub message: String,
}

impl Ack {
    pub fn new(message: impl Into<String>) -> Self {
        Ack {
            message: message.into(),
        }
    }
}

/// Payload of `GET /cart`.
#[derive(Debug, Clone, Deserialize)]
pub struct CartPayload {
    pub data: Cart,
}

/// Payload of `POST /order`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderCreated {
    #[serde(rename = "orderId")]
    pub order_id: String,

    #[serde(default)]
    pub total: Money,

    #[serde(default, with = "chrono::serde::ts_seconds_option")]
    pub create_at: Option<DateTime<Utc>>,
}

/// Payload of `POST /coupon`.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponPayload {
    #[serde(default)]
    pub data: CouponApplied,
}

/// Totals reported right after a coupon was accepted.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct CouponApplied {
    #[serde(default)]
    pub final_total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_bodies() {
        let body = DataWrapper::new(CartLineInput {
            product_id: "-Nprod1".into(),
            qty: 2,
        });
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"data": {"product_id": "-Nprod1", "qty": 2}})
        );

        let body = DataWrapper::new(CouponInput {
            code: "spring80".into(),
        });
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"data":{"code":"spring80"}}"#
        );
    }

    #[test]
    fn test_cart_payload() {
        let envelope = Envelope::parse(
            r#"{"success": true, "data": {"carts": [], "total": 0, "final_total": 0}, "messages": []}"#,
        )
        .unwrap();
        let payload: CartPayload = envelope.into_payload().unwrap();
        assert!(payload.data.is_empty());
    }

    #[test]
    fn test_rejection_carries_message() {
        let envelope = Envelope::parse(r#"{"success": false, "message": "找不到優惠券!"}"#).unwrap();
        let err = envelope.into_payload::<CouponPayload>().unwrap_err();
        assert!(err.is_rejected());
        assert_eq!(err.to_string(), "找不到優惠券!");
    }

    #[test]
    fn test_rejection_message_list_and_missing() {
        let envelope =
            Envelope::parse(r#"{"success": false, "message": ["Email 欄位必填", "電話欄位必填"]}"#)
                .unwrap();
        assert_eq!(
            envelope.into_ack().unwrap_err().to_string(),
            "Email 欄位必填; 電話欄位必填"
        );

        let envelope = Envelope::parse(r#"{"success": false}"#).unwrap();
        assert_eq!(envelope.into_ack().unwrap_err().to_string(), DEFAULT_REJECTION);
    }

    #[test]
    fn test_ack() {
        let envelope = Envelope::parse(r#"{"success": true, "message": "已加入購物車"}"#).unwrap();
        assert_eq!(envelope.into_ack().unwrap(), Ack::new("已加入購物車"));
    }

    #[test]
    fn test_order_created() {
        let envelope = Envelope::parse(
            r#"{"success": true, "message": "已建立訂單", "total": 264, "create_at": 1767225600, "orderId": "-Norder1"}"#,
        )
        .unwrap();
        let created: OrderCreated = envelope.into_payload().unwrap();
        assert_eq!(created.order_id, "-Norder1");
        assert_eq!(created.total, Money::from_major(264));
        assert_eq!(created.create_at.unwrap().timestamp(), 1_767_225_600);
    }

    #[test]
    fn test_order_without_id_is_a_decode_error() {
        let envelope = Envelope::parse(r#"{"success": true, "message": "ok"}"#).unwrap();
        let err = envelope.into_payload::<OrderCreated>().unwrap_err();
        assert!(matches!(err, ClientError::DeserializationFailed(_)));
    }

    #[test]
    fn test_coupon_payload() {
        let envelope = Envelope::parse(
            r#"{"success": true, "message": "已套用優惠券", "data": {"final_total": 1110.5}}"#,
        )
        .unwrap();
        let payload: CouponPayload = envelope.into_payload().unwrap();
        assert_eq!(payload.data.final_total.cents(), 111050);
    }

    #[test]
    fn test_not_an_envelope() {
        assert!(matches!(
            Envelope::parse("<html>502</html>"),
            Err(ClientError::DeserializationFailed(_))
        ));
    }
}

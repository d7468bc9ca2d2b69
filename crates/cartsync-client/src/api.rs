//! # Commerce API Transport
//!
//! The [`CartApi`] trait is the seam between [`crate::CartStore`] and the
//! network. [`HttpCartApi`] implements it over `reqwest`; tests drive the
//! store through an in-memory implementation instead.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartStore::add_item                                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartApi::add_line ─► POST {base}/api/{path}/cart  {"data": {...}}     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  send() ─► body text ─► Envelope::parse                                │
//! │       │         │                                                       │
//! │       │         └── not JSON + non-2xx ─► ClientError::HttpStatus      │
//! │       ▼                                                                 │
//! │  success == false ─► ClientError::Rejected { message }                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  typed payload (Cart, Ack, OrderCreated, CouponApplied)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use cartsync_core::{Cart, OrderRequest};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::protocol::{
    Ack, CartLineInput, CartPayload, CouponApplied, CouponInput, CouponPayload, DataWrapper,
    Envelope, OrderCreated,
};

// =============================================================================
// Trait
// =============================================================================

/// One method per commerce API endpoint.
///
/// Implementations return `ClientError::Rejected` when the envelope's
/// `success` flag is false.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// `GET /cart`
    async fn get_cart(&self) -> ClientResult<Cart>;

    /// `POST /cart`
    async fn add_line(&self, line: &CartLineInput) -> ClientResult<Ack>;

    /// `PUT /cart/{cart_id}`
    async fn update_line(&self, cart_id: &str, line: &CartLineInput) -> ClientResult<Ack>;

    /// `DELETE /cart/{cart_id}`
    async fn remove_line(&self, cart_id: &str) -> ClientResult<Ack>;

    /// `DELETE /carts`
    async fn clear_lines(&self) -> ClientResult<Ack>;

    /// `POST /order`
    async fn create_order(&self, order: &OrderRequest) -> ClientResult<OrderCreated>;

    /// `POST /coupon`
    async fn apply_coupon(&self, coupon: &CouponInput) -> ClientResult<(Ack, CouponApplied)>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// [`CartApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCartApi {
    config: ClientConfig,
    http: Client,
}

impl HttpCartApi {
    /// Builds the HTTP client from a validated config.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let http = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .user_agent(config.api.user_agent.clone())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// Returns the configuration this client was built with.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(&self, method: Method, endpoint: &str) -> ClientResult<RequestBuilder> {
        let url = self.config.endpoint(endpoint)?;
        debug!(method = method.as_str(), url = url.as_str(), "Commerce API request");
        Ok(self.http.request(method, url))
    }

    fn request_with<T: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        data: T,
    ) -> ClientResult<RequestBuilder> {
        Ok(self.request(method, endpoint)?.json(&DataWrapper::new(data)))
    }

    /// Sends a request and decodes the envelope.
    async fn send(&self, request: RequestBuilder) -> ClientResult<Envelope> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "Commerce API response");

        match Envelope::parse(&body) {
            Ok(envelope) => Ok(envelope),
            Err(_) if !status.is_success() => Err(ClientError::HttpStatus {
                status: status.as_u16(),
                body,
            }),
            Err(e) => Err(e),
        }
    }
}

/// Path segment for a single cart line.
fn line_endpoint(cart_id: &str) -> String {
    format!("cart/{}", cart_id)
}

#[async_trait]
impl CartApi for HttpCartApi {
    async fn get_cart(&self) -> ClientResult<Cart> {
        let envelope = self.send(self.request(Method::GET, "cart")?).await?;
        let payload: CartPayload = envelope.into_payload()?;
        Ok(payload.data)
    }

    async fn add_line(&self, line: &CartLineInput) -> ClientResult<Ack> {
        let request = self.request_with(Method::POST, "cart", line)?;
        self.send(request).await?.into_ack()
    }

    async fn update_line(&self, cart_id: &str, line: &CartLineInput) -> ClientResult<Ack> {
        let request = self.request_with(Method::PUT, &line_endpoint(cart_id), line)?;
        self.send(request).await?.into_ack()
    }

    async fn remove_line(&self, cart_id: &str) -> ClientResult<Ack> {
        let request = self.request(Method::DELETE, &line_endpoint(cart_id))?;
        self.send(request).await?.into_ack()
    }

    async fn clear_lines(&self) -> ClientResult<Ack> {
        let request = self.request(Method::DELETE, "carts")?;
        self.send(request).await?.into_ack()
    }

    async fn create_order(&self, order: &OrderRequest) -> ClientResult<OrderCreated> {
        let request = self.request_with(Method::POST, "order", order)?;
        self.send(request).await?.into_payload()
    }

    async fn apply_coupon(&self, coupon: &CouponInput) -> ClientResult<(Ack, CouponApplied)> {
        let request = self.request_with(Method::POST, "coupon", coupon)?;
        let envelope = self.send(request).await?;
        let message = envelope.message.clone().unwrap_or_default();
        let payload: CouponPayload = envelope.into_payload()?;
        Ok((Ack::new(message), payload.data))
    }
}

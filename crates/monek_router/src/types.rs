//! Domain model of a tracked order, plus the REST request/response shapes.

use std::collections::HashMap;

use masking::Secret;
use monek_connector::types::OrderSnapshot;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Payment lifecycle of an order as this service sees it.
///
/// Forward-only: `PaymentConfirmed` is terminal and is only ever reached
/// once, however many times the webhook fires.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OrderStatus {
    #[default]
    Pending,
    /// Paid synchronously at checkout; awaiting webhook confirmation.
    Processing,
    PaymentConfirmed,
}

/// Human-readable audit entry, appended for every status-affecting event.
#[derive(Clone, Debug, Serialize)]
pub struct OrderNote {
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub note: String,
}

/// An order as tracked by this service: the snapshot the host pushed, the
/// payment status, and the string-keyed metadata webhooks are matched on.
#[derive(Clone, Debug, Serialize)]
pub struct Order {
    pub snapshot: OrderSnapshot,
    pub status: OrderStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub metadata: HashMap<String, serde_json::Value>,
    pub notes: Vec<OrderNote>,
}

impl Order {
    pub fn order_id(&self) -> u64 {
        self.snapshot.order_id
    }

    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(serde_json::Value::as_str)
    }
}

/// Batched mutation applied to one order under the store lock.
#[derive(Debug, Default)]
pub struct OrderUpdate {
    pub status: Option<OrderStatus>,
    pub metadata: Vec<(String, serde_json::Value)>,
    pub notes: Vec<String>,
}

/// How the shopper paid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutMode {
    #[default]
    Card,
    /// Wallet-based flow; the wallet has already charged, no vendor call.
    Express,
}

/// Body of `POST /payments/complete`.
#[derive(Clone, Debug, Deserialize)]
pub struct CheckoutRequest {
    pub order_id: u64,
    #[serde(default)]
    pub mode: CheckoutMode,
    pub payment_reference: String,
    #[serde(default)]
    pub session_id: String,
    #[serde(default)]
    pub token: Secret<String>,
    /// Combined card expiry as the SDK reports it, `MM/YY`.
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub context: Option<serde_json::Value>,
}

/// Successful response of `POST /payments/complete`.
#[derive(Clone, Debug, Serialize)]
pub struct CheckoutResponse {
    pub ok: bool,
    pub order_id: u64,
    pub status: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Successful response of the webhook endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct WebhookAck {
    pub ok: bool,
    pub reference: String,
    pub order_id: u64,
    pub status: OrderStatus,
}

/// Response of the order intake endpoints.
#[derive(Clone, Debug, Serialize)]
pub struct OrderResponse {
    pub ok: bool,
    pub order_id: u64,
    pub status: OrderStatus,
    pub notes: Vec<OrderNote>,
}

impl From<&Order> for OrderResponse {
    fn from(order: &Order) -> Self {
        Self {
            ok: true,
            order_id: order.order_id(),
            status: order.status,
            notes: order.notes.clone(),
        }
    }
}

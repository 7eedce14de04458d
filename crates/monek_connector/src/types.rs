//! Domain types shared between the payload builders and the host service.

use masking::Secret;
use serde::{Deserialize, Serialize};

/// Which vendor integration lineage a deployment talks to.
///
/// The two lineages use different endpoints, auth schemes and payload
/// shapes; they are one configuration switch here, never forked code paths.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionMode {
    /// `POST <base>/payment` authenticated with `X-Api-Key` + `X-Secret-Key`.
    #[default]
    Embedded,
    /// `POST <base>/payments` authenticated with `Authorization: Bearer`.
    Server,
}

/// Read-only view of a host order, taken at payload-build time.
///
/// Totals are read from here rather than from anything cached earlier, so an
/// amount change between page render and submission cannot leak into the
/// charge.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrderSnapshot {
    pub order_id: u64,
    pub order_key: String,
    pub total: f64,
    /// Alpha-3 currency code, e.g. "GBP".
    pub currency: String,
    /// Decimal places the host displays for this currency, typically 2.
    pub currency_decimals: u32,
    pub billing: BillingDetails,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingDetails>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub shipping_total: f64,
    #[serde(default)]
    pub shipping_tax: f64,
    #[serde(default)]
    pub shipping_method: String,
    #[serde(default)]
    pub discount_total: f64,
}

/// Billing block of an order. Contact details are masked in logs.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BillingDetails {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: Secret<String>,
    #[serde(default)]
    pub phone: Secret<String>,
    #[serde(default)]
    pub address_1: String,
    #[serde(default)]
    pub address_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
    /// Alpha-2 country code.
    #[serde(default)]
    pub country: String,
}

impl BillingDetails {
    /// Full name with the surrounding whitespace of absent parts trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Shipping block of an order, present only when a recipient is named.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ShippingDetails {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address_1: String,
    #[serde(default)]
    pub address_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country: String,
}

/// One order line as the host reports it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(default)]
    pub sku: String,
    pub name: String,
    pub quantity: u32,
    /// Line total excluding tax, in major units.
    pub line_total: f64,
    #[serde(default)]
    pub line_tax: f64,
}

/// Per-attempt values captured client-side by the checkout SDK.
#[derive(Clone, Debug)]
pub struct PaymentAttempt {
    pub token: Secret<String>,
    pub session_id: String,
    /// Combined expiry exactly as the SDK reports it, `MM/YY`.
    pub expiry: String,
    /// Client-generated correlation id matched by the later webhook.
    pub payment_reference: String,
    /// Opaque extra context the SDK returned, forwarded verbatim.
    pub context: Option<serde_json::Value>,
}

/// Normalized outcome of the embedded `/payment` call.
///
/// Every path through the connector produces one of these; transport
/// failures and vendor declines are data, not errors, so the caller has a
/// single shape to log and surface.
#[derive(Clone, Debug, Default, Serialize)]
pub struct PaymentOutcome {
    /// True iff the vendor result string was the literal `"Success"`.
    pub success: bool,
    pub message: Option<String>,
    pub auth_code: Option<String>,
    pub error_code: Option<String>,
    /// The untouched decoded response body, retained for audit logging.
    pub raw: Option<serde_json::Value>,
}

/// Normalized outcome of the server-completion `/payments` call.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ServerCompletionOutcome {
    pub success: bool,
    pub transaction_id: Option<String>,
    pub message: Option<String>,
    pub raw: Option<serde_json::Value>,
}

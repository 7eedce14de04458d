//! Builders for the request bodies the vendor accepts, one per
//! integration mode, plus the tolerant response shapes coming back.

use masking::{PeekInterface, Secret};
use serde::{Deserialize, Serialize};

use crate::{
    amount::MinorUnit,
    codes::NumericCodes,
    errors::ConnectorError,
    types::{BillingDetails, OrderSnapshot, PaymentAttempt, ShippingDetails},
};

/// Store-level context every payload needs besides the order itself.
#[derive(Clone, Debug)]
pub struct StoreContext {
    pub codes: NumericCodes,
    /// Alpha-2 country code the store settles under.
    pub country_code: String,
    pub site_url: String,
    /// Purchase summary line, e.g. "Goods".
    pub basket_summary: String,
}

/// Amount-carrying wrapper pairing a converted amount with its source data.
pub struct MonekRouterData<T> {
    pub amount: MinorUnit,
    pub router_data: T,
}

impl<T> From<(MinorUnit, T)> for MonekRouterData<T> {
    fn from((amount, router_data): (MinorUnit, T)) -> Self {
        Self {
            amount,
            router_data,
        }
    }
}

/// Everything the embedded-checkout payload is built from.
#[derive(Clone, Copy, Debug)]
pub struct PaymentContext<'a> {
    pub order: &'a OrderSnapshot,
    pub attempt: &'a PaymentAttempt,
    pub store: &'a StoreContext,
}

/// Card expiry split out of the combined `MM/YY` the SDK reports.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardExpiry {
    pub expiry_month: Secret<String>,
    pub expiry_year: Secret<String>,
}

impl TryFrom<&str> for CardExpiry {
    type Error = ConnectorError;

    fn try_from(expiry: &str) -> Result<Self, Self::Error> {
        let bytes = expiry.as_bytes();
        let well_formed = bytes.len() == 5
            && bytes[2] == b'/'
            && expiry[0..2].chars().all(|c| c.is_ascii_digit())
            && expiry[3..5].chars().all(|c| c.is_ascii_digit());
        if !well_formed {
            return Err(ConnectorError::InvalidCardExpiry);
        }
        Ok(Self {
            expiry_month: Secret::new(expiry[0..2].to_string()),
            expiry_year: Secret::new(expiry[3..5].to_string()),
        })
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub enum SettlementType {
    Auto,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub enum CardEntryMode {
    ECommerce,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub enum PaymentIntent {
    Purchase,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub enum OrderChannel {
    Checkout,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub enum PaymentSource {
    EmbeddedCheckout,
}

/// Cardholder block. The vendor rejects empty optional keys, so absent
/// values are omitted from the serialized body entirely.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardHolder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Secret<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_street1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_street2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_postcode: Option<String>,
}

impl From<&BillingDetails> for CardHolder {
    fn from(billing: &BillingDetails) -> Self {
        Self {
            name: non_empty(&billing.full_name()),
            email_address: non_empty(billing.email.peek()).map(Secret::new),
            phone_number: non_empty(billing.phone.peek()).map(Secret::new),
            billing_street1: non_empty(&billing.address_1),
            billing_street2: non_empty(&billing.address_2),
            billing_city: non_empty(&billing.city),
            billing_postcode: non_empty(&billing.postcode),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Body of the embedded-checkout `POST /payment` call.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonekPaymentRequest {
    pub session_id: String,
    pub token_id: Secret<String>,
    pub settlement_type: SettlementType,
    pub card_entry: CardEntryMode,
    pub intent: PaymentIntent,
    pub order: OrderChannel,
    /// ISO-4217 numeric currency code.
    pub currency_code: String,
    pub minor_amount: MinorUnit,
    pub country_code: String,
    pub card: CardExpiry,
    pub card_holder: CardHolder,
    pub store_card_details: bool,
    /// Minted fresh per construction; a caller-side retry that rebuilds the
    /// payload gets a new token. Reuse requires reusing the built payload.
    pub idempotency_token: String,
    pub source: PaymentSource,
    pub url: String,
    pub basket_description: String,
    pub payment_reference: String,
}

impl TryFrom<&MonekRouterData<PaymentContext<'_>>> for MonekPaymentRequest {
    type Error = ConnectorError;

    fn try_from(item: &MonekRouterData<PaymentContext<'_>>) -> Result<Self, Self::Error> {
        let PaymentContext {
            order,
            attempt,
            store,
        } = item.router_data;

        if attempt.session_id.is_empty() {
            return Err(ConnectorError::MissingRequiredField {
                field_name: "session_id",
            });
        }
        if attempt.token.peek().is_empty() {
            return Err(ConnectorError::MissingRequiredField { field_name: "token" });
        }
        if attempt.payment_reference.is_empty() {
            return Err(ConnectorError::MissingRequiredField {
                field_name: "payment_reference",
            });
        }

        Ok(Self {
            session_id: attempt.session_id.clone(),
            token_id: attempt.token.clone(),
            settlement_type: SettlementType::Auto,
            card_entry: CardEntryMode::ECommerce,
            intent: PaymentIntent::Purchase,
            order: OrderChannel::Checkout,
            currency_code: store.codes.currency(&order.currency),
            minor_amount: item.amount,
            country_code: store.codes.country(&store.country_code),
            card: CardExpiry::try_from(attempt.expiry.as_str())?,
            card_holder: CardHolder::from(&order.billing),
            store_card_details: false,
            idempotency_token: format!("wc-{}-{}", order.order_id, uuid::Uuid::new_v4()),
            source: PaymentSource::EmbeddedCheckout,
            url: store.site_url.clone(),
            basket_description: format!("Order {}", order.order_id),
            payment_reference: attempt.payment_reference.clone(),
        })
    }
}

/// Everything the server-completion payload is built from. The idempotency
/// key is generated once per order by the caller and persisted, so retries
/// of the same order reuse it.
#[derive(Clone, Copy, Debug)]
pub struct ServerCompletionData<'a> {
    pub order: &'a OrderSnapshot,
    pub payment_token: &'a Secret<String>,
    pub context: Option<&'a serde_json::Value>,
    pub store: &'a StoreContext,
    pub merchant_id: &'a str,
    pub idempotency_key: &'a str,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmountBlock {
    pub minor: MinorUnit,
    pub currency_code: String,
    pub country_code: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionMetadata {
    pub platform: String,
    pub plugin_version: String,
    pub order_key: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCardholder {
    pub name: String,
    pub email: Secret<String>,
    pub phone: Secret<String>,
    pub billing_address: BillingAddress,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingBlock {
    pub name: String,
    pub company: String,
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub state: String,
    pub postcode: String,
    pub country: String,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub sku: String,
    pub description: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub total: f64,
    pub tax_amount: f64,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketAdjustment {
    pub description: String,
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize)]
pub struct Basket {
    pub items: Vec<BasketItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discounts: Option<Vec<BasketAdjustment>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery: Option<BasketAdjustment>,
}

/// Body of the server-completion `POST /payments` call.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerCompletionRequest {
    pub merchant_id: String,
    /// The order id doubles as the vendor-side payment reference here.
    pub payment_reference: String,
    pub amount: AmountBlock,
    pub description: String,
    pub payment_token: Secret<String>,
    pub idempotency_key: String,
    pub metadata: CompletionMetadata,
    pub cardholder: ServerCardholder,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<ShippingBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub basket: Option<Basket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl TryFrom<&MonekRouterData<ServerCompletionData<'_>>> for ServerCompletionRequest {
    type Error = ConnectorError;

    fn try_from(item: &MonekRouterData<ServerCompletionData<'_>>) -> Result<Self, Self::Error> {
        let ServerCompletionData {
            order,
            payment_token,
            context,
            store,
            merchant_id,
            idempotency_key,
        } = item.router_data;

        if payment_token.peek().is_empty() {
            return Err(ConnectorError::MissingRequiredField { field_name: "token" });
        }
        if merchant_id.is_empty() {
            return Err(ConnectorError::MissingRequiredField {
                field_name: "merchant_id",
            });
        }

        Ok(Self {
            merchant_id: merchant_id.to_string(),
            payment_reference: order.order_id.to_string(),
            amount: AmountBlock {
                minor: item.amount,
                currency_code: store.codes.currency(&order.currency),
                country_code: store.codes.country(&store.country_code),
            },
            description: store.basket_summary.clone(),
            payment_token: (*payment_token).clone(),
            idempotency_key: idempotency_key.to_string(),
            metadata: CompletionMetadata {
                platform: env!("CARGO_PKG_NAME").to_string(),
                plugin_version: env!("CARGO_PKG_VERSION").to_string(),
                order_key: order.order_key.clone(),
            },
            cardholder: build_cardholder(&order.billing),
            shipping: order.shipping.as_ref().and_then(build_shipping),
            basket: build_basket(order),
            context: context.cloned(),
        })
    }
}

fn build_cardholder(billing: &BillingDetails) -> ServerCardholder {
    ServerCardholder {
        name: billing.full_name(),
        email: billing.email.clone(),
        phone: billing.phone.clone(),
        billing_address: BillingAddress {
            line1: billing.address_1.clone(),
            line2: billing.address_2.clone(),
            city: billing.city.clone(),
            state: billing.state.clone(),
            postcode: billing.postcode.clone(),
            country: billing.country.clone(),
        },
    }
}

fn build_shipping(shipping: &ShippingDetails) -> Option<ShippingBlock> {
    if shipping.name.is_empty() {
        return None;
    }
    Some(ShippingBlock {
        name: shipping.name.clone(),
        company: shipping.company.clone(),
        line1: shipping.address_1.clone(),
        line2: shipping.address_2.clone(),
        city: shipping.city.clone(),
        state: shipping.state.clone(),
        postcode: shipping.postcode.clone(),
        country: shipping.country.clone(),
    })
}

fn build_basket(order: &OrderSnapshot) -> Option<Basket> {
    if order.items.is_empty() {
        return None;
    }

    let items = order
        .items
        .iter()
        .map(|item| {
            let unit_price = if item.quantity > 0 {
                item.line_total / f64::from(item.quantity)
            } else {
                0.0
            };
            BasketItem {
                sku: item.sku.clone(),
                description: item.name.clone(),
                quantity: item.quantity,
                unit_price: round2(unit_price),
                total: round2(item.line_total + item.line_tax),
                tax_amount: round2(item.line_tax),
            }
        })
        .collect();

    let delivery = (order.shipping_total > 0.0).then(|| BasketAdjustment {
        description: order.shipping_method.clone(),
        amount: round2(order.shipping_total + order.shipping_tax),
    });

    let discounts = (order.discount_total > 0.0).then(|| {
        vec![BasketAdjustment {
            description: "Discount".to_string(),
            amount: round2(order.discount_total),
        }]
    });

    Some(Basket {
        items,
        discounts,
        delivery,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Response body of the embedded `/payment` call.
///
/// The vendor flips between PascalCase and camelCase across API versions,
/// so every field tolerates both spellings.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonekPaymentResponse {
    #[serde(alias = "Result")]
    pub result: Option<String>,
    #[serde(alias = "Message")]
    pub message: Option<String>,
    #[serde(alias = "AuthCode")]
    pub auth_code: Option<String>,
    #[serde(alias = "ErrorCode")]
    pub error_code: Option<String>,
}

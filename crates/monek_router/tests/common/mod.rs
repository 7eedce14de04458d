//! Shared fixtures: a stub gateway behind the payment-API seam, a seeded
//! store, and settings for both integration modes.
#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;
use masking::Secret;
use monek_connector::{
    codes::NumericCodes,
    transformers::{MonekPaymentRequest, ServerCompletionRequest, StoreContext},
    types::{
        BillingDetails, CompletionMode, OrderSnapshot, PaymentOutcome, ServerCompletionOutcome,
    },
    MonekPayApi,
};
use monek_router::{
    configs::settings::MonekSettings,
    db::{InMemoryOrderStore, OrderStore},
    AppState,
};

/// Gateway double returning canned outcomes and counting calls.
pub struct StubGateway {
    pub outcome: PaymentOutcome,
    pub server_outcome: ServerCompletionOutcome,
    calls: AtomicUsize,
}

impl StubGateway {
    pub fn approving() -> Self {
        Self::with_outcome(PaymentOutcome {
            success: true,
            message: Some("Approved".to_string()),
            auth_code: Some("00112".to_string()),
            error_code: None,
            raw: Some(serde_json::json!({"Result": "Success", "AuthCode": "00112"})),
        })
    }

    pub fn declining() -> Self {
        Self::with_outcome(PaymentOutcome {
            success: false,
            message: Some("Insufficient funds".to_string()),
            auth_code: None,
            error_code: Some("51".to_string()),
            raw: Some(serde_json::json!({"result": "Declined", "errorCode": "51"})),
        })
    }

    pub fn with_outcome(outcome: PaymentOutcome) -> Self {
        Self {
            outcome,
            server_outcome: ServerCompletionOutcome {
                success: true,
                transaction_id: Some("txn_9".to_string()),
                message: Some("Completed".to_string()),
                raw: Some(serde_json::json!({"transactionId": "txn_9"})),
            },
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MonekPayApi for StubGateway {
    async fn complete_payment(&self, _request: &MonekPaymentRequest) -> PaymentOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    async fn complete_server_payment(
        &self,
        _request: &ServerCompletionRequest,
    ) -> ServerCompletionOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.server_outcome.clone()
    }
}

pub fn monek_settings(completion_mode: CompletionMode) -> MonekSettings {
    MonekSettings {
        completion_mode,
        api_base_url: "https://api.monek.example".to_string(),
        merchant_id: "123456".to_string(),
        api_key: Secret::new("pk_test".to_string()),
        secret_key: Secret::new("sk_test".to_string()),
        signing_secret: None,
    }
}

pub fn store_context() -> StoreContext {
    StoreContext {
        codes: NumericCodes::new(),
        country_code: "GB".to_string(),
        site_url: "https://shop.example".to_string(),
        basket_summary: "Goods".to_string(),
    }
}

pub fn snapshot(order_id: u64) -> OrderSnapshot {
    OrderSnapshot {
        order_id,
        order_key: format!("wc_order_{order_id}"),
        total: 19.999,
        currency: "GBP".to_string(),
        currency_decimals: 2,
        billing: BillingDetails {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: Secret::new("ada@example.com".to_string()),
            phone: Secret::new(String::new()),
            address_1: "1 High St".to_string(),
            address_2: String::new(),
            city: "London".to_string(),
            state: String::new(),
            postcode: "N1 1AA".to_string(),
            country: "GB".to_string(),
        },
        shipping: None,
        items: Vec::new(),
        shipping_total: 0.0,
        shipping_tax: 0.0,
        shipping_method: String::new(),
        discount_total: 0.0,
    }
}

/// State with a fresh store, one seeded order and the given stub gateway.
pub async fn seeded_state(
    gateway: Arc<StubGateway>,
    mode: CompletionMode,
    order_id: u64,
) -> (AppState, Arc<InMemoryOrderStore>) {
    let store = Arc::new(InMemoryOrderStore::new());
    store
        .insert_order(snapshot(order_id))
        .await
        .expect("seed order");
    let state = AppState::with_parts(
        store.clone(),
        gateway,
        monek_settings(mode),
        store_context(),
    );
    (state, store)
}

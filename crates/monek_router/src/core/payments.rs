//! Checkout completion: validation, metadata persistence, the vendor call,
//! and folding the outcome back onto the order.

use masking::{PeekInterface, Secret};
use monek_connector::{
    transformers::{
        MonekPaymentRequest, MonekRouterData, PaymentContext, ServerCompletionData,
        ServerCompletionRequest,
    },
    types::{CompletionMode, PaymentAttempt, PaymentOutcome, ServerCompletionOutcome},
    ConnectorError, MinorUnit,
};
use serde_json::json;
use tracing::instrument;

use crate::{
    consts,
    errors::ApiErrorResponse,
    routes::app::AppState,
    types::{CheckoutMode, CheckoutRequest, CheckoutResponse, Order, OrderStatus, OrderUpdate},
};

/// Completes a checkout submission for one order.
///
/// Correlation metadata is persisted *before* the vendor is called, so a
/// webhook racing the synchronous response can still find the order.
/// Charging only ever happens here, never in the webhook path.
#[instrument(skip_all, fields(order_id = request.order_id))]
pub async fn complete_payment(
    state: &AppState,
    request: CheckoutRequest,
) -> Result<CheckoutResponse, ApiErrorResponse> {
    let order = state
        .store
        .find_order(request.order_id)
        .await
        .map_err(|_| ApiErrorResponse::OrderNotFound { reference: None })?;

    if request.payment_reference.is_empty() {
        return Err(ApiErrorResponse::MissingRequiredField {
            field_name: "payment_reference",
        });
    }

    match request.mode {
        CheckoutMode::Express => complete_express(state, order, request).await,
        CheckoutMode::Card => complete_card(state, order, request).await,
    }
}

/// Wallet flow: the wallet already charged, so only correlation metadata
/// and the paid status are recorded.
async fn complete_express(
    state: &AppState,
    order: Order,
    request: CheckoutRequest,
) -> Result<CheckoutResponse, ApiErrorResponse> {
    let mut metadata = vec![(
        consts::META_PAYMENT_REFERENCE.to_string(),
        json!(request.payment_reference),
    )];
    if !request.session_id.is_empty() {
        metadata.push((consts::META_SESSION_ID.to_string(), json!(request.session_id)));
    }

    let updated = state
        .store
        .update_order(
            order.order_id(),
            OrderUpdate {
                status: Some(OrderStatus::Processing),
                metadata,
                notes: vec![format!(
                    "Express checkout payment approved (reference {})",
                    request.payment_reference
                )],
            },
        )
        .await
        .map_err(|_| ApiErrorResponse::InternalServerError)?;

    tracing::info!("express checkout completed");
    Ok(CheckoutResponse {
        ok: true,
        order_id: updated.order_id(),
        status: updated.status,
        auth_code: None,
        transaction_id: None,
        message: None,
    })
}

async fn complete_card(
    state: &AppState,
    order: Order,
    request: CheckoutRequest,
) -> Result<CheckoutResponse, ApiErrorResponse> {
    if request.token.peek().is_empty() {
        return Err(ApiErrorResponse::MissingRequiredField { field_name: "token" });
    }
    if state.monek.completion_mode == CompletionMode::Embedded {
        if request.session_id.is_empty() {
            return Err(ApiErrorResponse::MissingRequiredField {
                field_name: "session_id",
            });
        }
        // Validate the expiry shape before anything is persisted or sent.
        monek_connector::transformers::CardExpiry::try_from(request.expiry.as_str())
            .map_err(|_| ApiErrorResponse::InvalidCardExpiry)?;
    }

    let mut metadata = vec![(
        consts::META_PAYMENT_REFERENCE.to_string(),
        json!(request.payment_reference),
    )];
    if !request.session_id.is_empty() {
        metadata.push((consts::META_SESSION_ID.to_string(), json!(request.session_id)));
    }
    state
        .store
        .update_order(
            order.order_id(),
            OrderUpdate {
                metadata,
                ..Default::default()
            },
        )
        .await
        .map_err(|_| ApiErrorResponse::InternalServerError)?;

    let amount = MinorUnit::from_major(order.snapshot.total, order.snapshot.currency_decimals);

    match state.monek.completion_mode {
        CompletionMode::Embedded => {
            let attempt = PaymentAttempt {
                token: request.token.clone(),
                session_id: request.session_id.clone(),
                expiry: request.expiry.clone(),
                payment_reference: request.payment_reference.clone(),
                context: request.context.clone(),
            };
            let payload = MonekPaymentRequest::try_from(&MonekRouterData::from((
                amount,
                PaymentContext {
                    order: &order.snapshot,
                    attempt: &attempt,
                    store: &state.store_context,
                },
            )))
            .map_err(map_connector_error)?;

            let outcome = state.gateway.complete_payment(&payload).await;
            settle_embedded(state, &order, &request.token, outcome).await
        }
        CompletionMode::Server => {
            let idempotency_key = idempotency_key_for(state, &order).await?;
            let payload = ServerCompletionRequest::try_from(&MonekRouterData::from((
                amount,
                ServerCompletionData {
                    order: &order.snapshot,
                    payment_token: &request.token,
                    context: request.context.as_ref(),
                    store: &state.store_context,
                    merchant_id: &state.monek.merchant_id,
                    idempotency_key: &idempotency_key,
                },
            )))
            .map_err(map_connector_error)?;

            let outcome = state.gateway.complete_server_payment(&payload).await;
            settle_server(state, &order, &request.token, outcome).await
        }
    }
}

async fn settle_embedded(
    state: &AppState,
    order: &Order,
    token: &Secret<String>,
    outcome: PaymentOutcome,
) -> Result<CheckoutResponse, ApiErrorResponse> {
    if !outcome.success {
        let message = outcome
            .message
            .clone()
            .unwrap_or_else(|| consts::GENERIC_DECLINE_MESSAGE.to_string());
        record_failure(state, order, &message, outcome.raw).await;
        return Err(ApiErrorResponse::PaymentFailed { message });
    }

    let auth_code = outcome.auth_code.clone();
    let note = match &auth_code {
        Some(code) => format!("Payment approved (auth code {code})"),
        None => "Payment approved".to_string(),
    };
    let updated = state
        .store
        .update_order(
            order.order_id(),
            OrderUpdate {
                status: Some(OrderStatus::Processing),
                metadata: vec![
                    (consts::META_TOKEN.to_string(), json!(token.peek())),
                    (
                        consts::META_PAYMENT_RESULT.to_string(),
                        outcome.raw.unwrap_or(serde_json::Value::Null),
                    ),
                ],
                notes: vec![note],
            },
        )
        .await
        .map_err(|_| ApiErrorResponse::InternalServerError)?;

    tracing::info!(auth_code = ?auth_code, "payment approved");
    Ok(CheckoutResponse {
        ok: true,
        order_id: updated.order_id(),
        status: updated.status,
        auth_code,
        transaction_id: None,
        message: outcome.message,
    })
}

async fn settle_server(
    state: &AppState,
    order: &Order,
    token: &Secret<String>,
    outcome: ServerCompletionOutcome,
) -> Result<CheckoutResponse, ApiErrorResponse> {
    if !outcome.success {
        let message = outcome
            .message
            .clone()
            .unwrap_or_else(|| consts::GENERIC_DECLINE_MESSAGE.to_string());
        record_failure(state, order, &message, outcome.raw).await;
        return Err(ApiErrorResponse::PaymentFailed { message });
    }

    let transaction_id = outcome.transaction_id.clone();
    let note = match &transaction_id {
        Some(id) => format!("Payment completed (transaction {id})"),
        None => "Payment completed".to_string(),
    };
    let updated = state
        .store
        .update_order(
            order.order_id(),
            OrderUpdate {
                status: Some(OrderStatus::Processing),
                metadata: vec![
                    (consts::META_TOKEN.to_string(), json!(token.peek())),
                    (
                        consts::META_PAYMENT_RESULT.to_string(),
                        outcome.raw.unwrap_or(serde_json::Value::Null),
                    ),
                ],
                notes: vec![note],
            },
        )
        .await
        .map_err(|_| ApiErrorResponse::InternalServerError)?;

    tracing::info!(transaction_id = ?transaction_id, "server completion approved");
    Ok(CheckoutResponse {
        ok: true,
        order_id: updated.order_id(),
        status: updated.status,
        auth_code: None,
        transaction_id,
        message: outcome.message,
    })
}

/// Appends the failure note and audit metadata; the order stays unpaid.
async fn record_failure(
    state: &AppState,
    order: &Order,
    message: &str,
    raw: Option<serde_json::Value>,
) {
    tracing::warn!(%message, "payment not completed");
    let mut update = OrderUpdate {
        notes: vec![format!("Payment failed: {message}")],
        ..Default::default()
    };
    if let Some(raw) = raw {
        update
            .metadata
            .push((consts::META_PAYMENT_RESULT.to_string(), raw));
    }
    if let Err(error) = state.store.update_order(order.order_id(), update).await {
        tracing::error!(?error, "failed to record payment failure");
    }
}

/// The server-completion idempotency key is minted once per order and
/// persisted, so a retried completion sends the same key again.
async fn idempotency_key_for(state: &AppState, order: &Order) -> Result<String, ApiErrorResponse> {
    if let Some(existing) = order.metadata_str(consts::META_IDEMPOTENCY_KEY) {
        return Ok(existing.to_string());
    }

    let key = format!("monek_{}_{}", order.order_id(), uuid::Uuid::new_v4());
    state
        .store
        .update_order(
            order.order_id(),
            OrderUpdate {
                metadata: vec![(consts::META_IDEMPOTENCY_KEY.to_string(), json!(key))],
                ..Default::default()
            },
        )
        .await
        .map_err(|_| ApiErrorResponse::InternalServerError)?;
    Ok(key)
}

fn map_connector_error(error: ConnectorError) -> ApiErrorResponse {
    match error {
        ConnectorError::MissingRequiredField { field_name } => {
            ApiErrorResponse::MissingRequiredField { field_name }
        }
        ConnectorError::InvalidCardExpiry => ApiErrorResponse::InvalidCardExpiry,
        ConnectorError::ClientConstructionFailed => ApiErrorResponse::InternalServerError,
    }
}

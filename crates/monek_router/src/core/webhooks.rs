//! Incoming webhook reconciliation: match the delivery to an order by its
//! payment reference and move the order forward, idempotently.

use serde_json::Value;
use tracing::instrument;

use crate::{
    consts,
    db::OrderStore,
    errors::ApiErrorResponse,
    types::{OrderStatus, OrderUpdate, WebhookAck},
};

/// Pulls the payment reference out of a webhook body, tolerating the shapes
/// the vendor has been observed to send. First non-empty match wins.
/// Numeric values are cast to their string form, as the original endpoint
/// did for bare scalar references.
pub fn extract_payment_reference(body: &Value) -> Option<String> {
    let candidates = [
        body.get("paymentReference"),
        body.get("Data").and_then(|data| data.get("PaymentReference")),
        body.get("reference"),
    ];
    candidates
        .into_iter()
        .flatten()
        .find_map(|value| match value {
            Value::String(reference) if !reference.is_empty() => Some(reference.clone()),
            Value::Number(reference) => Some(reference.to_string()),
            _ => None,
        })
}

/// Processes one webhook delivery.
///
/// The raw body is persisted unconditionally as an audit trail. The status
/// transition is forward-only: an already-confirmed order just gets a
/// duplicate-ping note, which is what makes at-least-once delivery safe.
#[instrument(skip_all)]
pub async fn incoming_webhook(
    store: &dyn OrderStore,
    body: Value,
) -> Result<WebhookAck, ApiErrorResponse> {
    if !body.is_object() {
        return Err(ApiErrorResponse::InvalidJson);
    }

    let reference =
        extract_payment_reference(&body).ok_or(ApiErrorResponse::MissingReference)?;

    let order = store
        .find_by_payment_reference(&reference)
        .await
        .map_err(|_| {
            tracing::warn!(%reference, "webhook matched no order");
            ApiErrorResponse::OrderNotFound {
                reference: Some(reference.clone()),
            }
        })?;

    let already_confirmed = order.status == OrderStatus::PaymentConfirmed;
    let update = OrderUpdate {
        status: (!already_confirmed).then_some(OrderStatus::PaymentConfirmed),
        metadata: vec![(consts::META_LAST_WEBHOOK.to_string(), body)],
        notes: vec![if already_confirmed {
            format!("Duplicate payment webhook received (reference {reference})")
        } else {
            format!("Payment confirmed by webhook (reference {reference})")
        }],
    };

    let updated = store
        .update_order(order.order_id(), update)
        .await
        .map_err(|_| ApiErrorResponse::InternalServerError)?;

    tracing::info!(
        order_id = updated.order_id(),
        %reference,
        already_confirmed,
        "webhook processed"
    );
    Ok(WebhookAck {
        ok: true,
        reference,
        order_id: updated.order_id(),
        status: updated.status,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reference_extraction_tries_the_known_shapes_in_order() {
        let top_level = json!({"paymentReference": "MNK-abc"});
        let nested = json!({"Data": {"PaymentReference": "MNK-abc"}});
        let bare = json!({"reference": "MNK-abc"});
        for body in [top_level, nested, bare] {
            assert_eq!(
                extract_payment_reference(&body).as_deref(),
                Some("MNK-abc"),
                "{body}"
            );
        }
    }

    #[test]
    fn earlier_shapes_take_precedence() {
        let body = json!({
            "paymentReference": "first",
            "Data": {"PaymentReference": "second"},
            "reference": "third",
        });
        assert_eq!(extract_payment_reference(&body).as_deref(), Some("first"));
    }

    #[test]
    fn empty_values_are_skipped_not_matched() {
        let body = json!({"paymentReference": "", "reference": "MNK-abc"});
        assert_eq!(extract_payment_reference(&body).as_deref(), Some("MNK-abc"));
    }

    #[test]
    fn numeric_references_are_cast_to_string() {
        let body = json!({"paymentReference": 42});
        assert_eq!(extract_payment_reference(&body).as_deref(), Some("42"));
    }

    #[test]
    fn absent_or_unusable_references_yield_none() {
        for body in [
            json!({}),
            json!({"Data": {}}),
            json!({"paymentReference": true}),
            json!({"paymentReference": {"nested": "MNK-abc"}}),
        ] {
            assert_eq!(extract_payment_reference(&body), None, "{body}");
        }
    }
}

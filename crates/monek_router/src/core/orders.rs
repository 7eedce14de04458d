//! Order intake: the host commerce system pushes snapshots here so the
//! checkout and webhook paths have something to act on.

use monek_connector::types::OrderSnapshot;

use crate::{
    db::{OrderStore, StorageError},
    errors::ApiErrorResponse,
    types::OrderResponse,
};

pub async fn create_order(
    store: &dyn OrderStore,
    snapshot: OrderSnapshot,
) -> Result<OrderResponse, ApiErrorResponse> {
    if snapshot.order_key.is_empty() {
        return Err(ApiErrorResponse::MissingRequiredField {
            field_name: "order_key",
        });
    }
    if snapshot.currency.len() != 3 {
        return Err(ApiErrorResponse::MissingRequiredField {
            field_name: "currency",
        });
    }

    let order = store
        .insert_order(snapshot)
        .await
        .map_err(|error| match error {
            StorageError::DuplicateOrder(_) => ApiErrorResponse::DuplicateOrder,
            _ => ApiErrorResponse::InternalServerError,
        })?;

    tracing::info!(order_id = order.order_id(), "order registered");
    Ok(OrderResponse::from(&order))
}

pub async fn retrieve_order(
    store: &dyn OrderStore,
    order_id: u64,
) -> Result<OrderResponse, ApiErrorResponse> {
    let order = store
        .find_order(order_id)
        .await
        .map_err(|_| ApiErrorResponse::OrderNotFound { reference: None })?;
    Ok(OrderResponse::from(&order))
}

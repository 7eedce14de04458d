use actix_web::web;
use monek_connector::types::OrderSnapshot;
use tracing::instrument;

use crate::{
    core::orders,
    errors::ApiErrorResponse,
    routes::app::AppState,
    types::OrderResponse,
};

#[instrument(skip_all, fields(order_id = snapshot.order_id))]
pub async fn create(
    state: web::Data<AppState>,
    snapshot: web::Json<OrderSnapshot>,
) -> Result<web::Json<OrderResponse>, ApiErrorResponse> {
    orders::create_order(state.store.as_ref(), snapshot.into_inner())
        .await
        .map(web::Json)
}

#[instrument(skip_all, fields(order_id = *path))]
pub async fn retrieve(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> Result<web::Json<OrderResponse>, ApiErrorResponse> {
    orders::retrieve_order(state.store.as_ref(), path.into_inner())
        .await
        .map(web::Json)
}

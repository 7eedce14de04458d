use actix_web::web;
use tracing::instrument;

use crate::{
    core::webhooks,
    errors::ApiErrorResponse,
    routes::app::AppState,
    types::WebhookAck,
};

/// The body is taken as raw bytes so an unparsable delivery maps to the
/// service's own 400 shape instead of the framework default.
#[instrument(skip_all)]
pub async fn receive(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<web::Json<WebhookAck>, ApiErrorResponse> {
    let body: serde_json::Value =
        serde_json::from_slice(&body).map_err(|_| ApiErrorResponse::InvalidJson)?;

    webhooks::incoming_webhook(state.store.as_ref(), body)
        .await
        .map(web::Json)
}

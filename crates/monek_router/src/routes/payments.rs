use actix_web::web;
use tracing::instrument;

use crate::{
    core::payments,
    errors::ApiErrorResponse,
    routes::app::AppState,
    types::{CheckoutRequest, CheckoutResponse},
};

#[instrument(skip_all)]
pub async fn complete(
    state: web::Data<AppState>,
    request: web::Json<CheckoutRequest>,
) -> Result<web::Json<CheckoutResponse>, ApiErrorResponse> {
    payments::complete_payment(&state, request.into_inner())
        .await
        .map(web::Json)
}

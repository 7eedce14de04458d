use tracing::instrument;

#[instrument(skip_all)]
pub async fn health() -> impl actix_web::Responder {
    tracing::debug!("health was called");
    actix_web::HttpResponse::Ok().body("health is good")
}

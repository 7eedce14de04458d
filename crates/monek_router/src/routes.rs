pub mod app;
pub mod health;
pub mod orders;
pub mod payments;
pub mod webhooks;

use actix_web::web;

pub use self::app::AppState;

/// Registers every route; used by the binary and by integration tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health::health)))
        .service(
            web::scope("/orders")
                .service(web::resource("").route(web::post().to(orders::create)))
                .service(web::resource("/{order_id}").route(web::get().to(orders::retrieve))),
        )
        .service(
            web::scope("/payments")
                .service(web::resource("/complete").route(web::post().to(payments::complete))),
        )
        .service(web::resource("/webhook").route(web::post().to(webhooks::receive)));
}

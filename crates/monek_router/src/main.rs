use actix_web::{web, App, HttpServer};
use monek_router::{errors::ApplicationError, logger, routes, AppState, Settings};
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> Result<(), ApplicationError> {
    let settings = Settings::new()?;
    logger::setup(&settings.log);

    let state = AppState::new(&settings)?;
    let bind_address = (settings.server.host.clone(), settings.server.port);
    tracing::info!(
        host = %settings.server.host,
        port = settings.server.port,
        mode = ?settings.monek.completion_mode,
        "starting monek_router"
    );

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await?;

    Ok(())
}

use crate::app::routes::{configure, AppState};
use crate::config::AppConfig;
use crate::utils::error::Result;
use actix_web::{web, App, HttpServer};

/// Binds the configured address and serves until shutdown.
pub async fn run(config: AppConfig) -> Result<()> {
    let state = web::Data::new(AppState::from_config(&config)?);
    let api_prefix = config.api_prefix.clone();

    tracing::info!(
        "Listening on {}:{} (routes under {}, uploads in {})",
        config.host,
        config.port,
        api_prefix,
        config.upload_folder
    );

    HttpServer::new(move || {
        let state = state.clone();
        let api_prefix = api_prefix.clone();
        App::new().configure(move |cfg| configure(cfg, state, &api_prefix))
    })
    .bind(config.bind_address())?
    .run()
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

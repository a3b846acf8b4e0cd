use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing::info;

use am_api::{config::load_config, create_app, telemetry::init_tracing, AppState, Collaborators};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = load_config().context("loading configuration")?;
    init_tracing(&config.logging);

    info!(environment = %config.environment, "Starting AutoMarket API server");
    if config.auth.jwt.is_using_default_secret() {
        if config.environment.is_production() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        tracing::warn!("Using the default JWT secret; set JWT_SECRET before deploying");
    }

    let collaborators = Collaborators::from_config(&config)
        .await
        .context("connecting backends")?;
    let state = web::Data::new(AppState::new(&config, collaborators));

    let bind_address = config.server.bind_address();
    info!(address = %bind_address, workers = config.server.workers, "Binding HTTP server");

    let cors = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    let mut server = HttpServer::new(move || create_app(state.clone(), &cors, max_payload_size))
        .keep_alive(std::time::Duration::from_secs(config.server.keep_alive));
    // 0 keeps actix's default of one worker per core
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("binding {}", bind_address))?
        .run()
        .await
        .context("running HTTP server")?;

    info!("Server stopped");
    Ok(())
}

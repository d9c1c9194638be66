mod app_state;
mod extractors;
mod handlers;
mod http_errors;
mod status;

use crate::{
    api::Api,
    config::Config,
    database::Database,
    secrets::{EnvelopeEncryptor, SystemRandom},
    server::app_state::AppState,
};
use actix_web::{App, HttpServer, middleware, web};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
pub async fn run(config: Config, http_port: u16) -> Result<(), anyhow::Error> {
    let pool = PgPoolOptions::new()
        .connect(&config.db.connection_url())
        .await
        .with_context(|| "Cannot connect to the database.")?;
    let db = Database::create(pool).await?;

    // Both the master key and the JWT secret are required: the server is
    // useless without them, so fail before binding rather than on the
    // first request.
    let master_key = config
        .security
        .master_key
        .as_deref()
        .with_context(|| "Master key is not configured.")?;
    let master_key = hex::decode(master_key).with_context(|| "Master key is not valid hex.")?;
    let encryptor = EnvelopeEncryptor::new(master_key, Arc::new(SystemRandom))?;

    if config.security.jwt_secret.is_none() {
        anyhow::bail!("JWT secret is not configured.");
    }

    info!(
        "Lockbox is being served through public URL {}.",
        config.public_url
    );

    let state = web::Data::new(AppState::new(
        config.clone(),
        Api::new(config, db, encryptor),
    ));
    let http_server_url = format!("0.0.0.0:{http_port}");
    let http_server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(middleware::Compat::new(middleware::Compress::default()))
            .wrap(middleware::NormalizePath::trim())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/status", web::get().to(handlers::status_get))
                    .route("/signup", web::post().to(handlers::security_signup))
                    .route("/signin", web::post().to(handlers::security_signin))
                    .service(
                        web::scope("/secrets")
                            .route("", web::post().to(handlers::secrets_create))
                            .route("", web::get().to(handlers::secrets_export))
                            .route("/{secret_id}", web::patch().to(handlers::secrets_update))
                            .route("/{secret_id}", web::delete().to(handlers::secrets_delete)),
                    ),
            )
    });

    let http_server = http_server
        .bind(&http_server_url)
        .with_context(|| format!("Failed to bind to {}.", &http_server_url))?;

    info!("Lockbox API server is available at http://{http_server_url}");

    http_server
        .run()
        .await
        .with_context(|| "Failed to run Lockbox API server.")
}

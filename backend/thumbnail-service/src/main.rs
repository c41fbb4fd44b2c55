/// Thumbnail Service - HTTP Server
///
/// Serves list/get/delete over the thumbnail record table.
use actix_web::{middleware as actix_middleware, web, App, HttpServer};
use anyhow::Context;
use std::sync::Arc;
use thumbnail_service::db::DynamoRecordStore;
use thumbnail_service::handlers;
use thumbnail_service::services::RecordService;
use thumbnail_service::Config;
use tracing::info;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;

    let record_store = Arc::new(DynamoRecordStore::from_config(&config).await);
    let record_service = RecordService::new(record_store, config.table.list_max_pages);

    let http_bind_address = format!("{}:{}", config.app.host, config.app.port);
    info!(
        address = %http_bind_address,
        table = %config.table.name,
        "Thumbnail service starting HTTP server"
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(record_service.clone()))
            .wrap(actix_middleware::Logger::default())
            .configure(handlers::configure)
    })
    .bind(&http_bind_address)
    .with_context(|| format!("Failed to bind {http_bind_address}"))?
    .run()
    .await
    .context("HTTP server error")?;

    info!("Thumbnail service shutting down");
    Ok(())
}

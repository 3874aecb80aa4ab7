use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use social_media_api::config::{AppConfig, StoreKind};
use social_media_api::database::connection::get_db_client;
use social_media_api::routes::build_router;
use social_media_api::services::cloudinary::CloudinaryService;
use social_media_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = AppConfig::from_env().context("failed to load configuration")?;
    let app_state = initialize_app_state(&config).await?;

    let app = build_router(app_state);
    start_server(app, &config).await
}

async fn initialize_app_state(config: &AppConfig) -> anyhow::Result<AppState> {
    match config.store {
        StoreKind::Mongo => {
            let db = get_db_client(config)
                .await
                .context("failed to connect to MongoDB")?;
            tracing::info!("MongoDB stores and Cloudinary service initialized");
            Ok(AppState::with_mongo(db, config))
        }
        StoreKind::Memory => {
            tracing::warn!("using in-memory stores; data is lost on restart");
            let media = Arc::new(CloudinaryService::new(&config.cloudinary));
            Ok(AppState::in_memory(media, &config.jwt_secret).with_body_limit(config.max_body_bytes))
        }
    }
}

async fn start_server(app: axum::Router, config: &AppConfig) -> anyhow::Result<()> {
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {}", addr))?;

    tracing::info!("Server starting on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

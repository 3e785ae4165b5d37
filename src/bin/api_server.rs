// src/bin/api_server.rs

use axum::http::HeaderValue;
use monster_catalog::infra::{config, database};
use monster_catalog::transport;
use monster_catalog::{AssetLoader, CatalogService, PgAbilityNames, PgMonsterRows};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("monster_catalog=info,api_server=info,tower_http=info")),
        )
        .init();

    // --- Database ---
    info!("connecting to database");
    let pool = database::connect_from_env().await?;
    database::check_connection(&pool).await?;

    // --- Service ---
    let asset_root = config::asset_root();
    if !asset_root.is_dir() {
        warn!(root = %asset_root.display(), "asset root is not a directory; images will be path-only");
    }
    let catalog = CatalogService::new(
        Arc::new(PgMonsterRows::new(pool.clone())),
        Arc::new(PgAbilityNames::new(pool)),
        AssetLoader::new(asset_root),
    );
    let app_state = transport::http::AppState {
        catalog: Arc::new(catalog),
    };

    // --- API Server ---
    let cors = match config::cors_allowed_origin() {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any),
    };
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);

    let bind_addr = config::bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "API server listening (Swagger UI at /swagger-ui)");

    tokio::select! {
        result = axum::serve(listener, app) => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown signal received");
        }
    }

    Ok(())
}

use std::net::SocketAddr;

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::AppConfig;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

/// Connect, migrate, ensure the admin account and optionally seed sample rows.
pub async fn prepare_database(cfg: &AppConfig) -> anyhow::Result<sea_orm::DatabaseConnection> {
    let db = models::db::connect_with_config(&models::db::DatabaseConfig::from(&cfg.database)).await?;
    models::db::migrate(&db).await?;
    if service::bootstrap::ensure_admin(&db, &cfg.auth.admin_password).await? {
        info!("created default admin account");
    }
    if cfg.seed.sample_data {
        service::bootstrap::seed_sample_data(&db).await?;
    }
    Ok(db)
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    common::env::ensure_env(&cfg.server.static_dir, cfg.database.sqlite_file())
        .await
        .map_err(|e| StartupError::Runtime(e.to_string()))?;

    let db = prepare_database(&cfg).await?;
    let state = AppState::new(db, cfg.auth.login_token.clone());
    let app: Router = routes::build_router(state, build_cors(), &cfg.server.static_dir);

    let addr = bind_addr(&cfg)?;
    info!(%addr, static_dir = %cfg.server.static_dir, "starting cemetery server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    info!("server stopped");
    Ok(())
}

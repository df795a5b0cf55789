use std::{env, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_default;
use dotenvy::dotenv;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::{employees::EmployeeStore, runtime};

use crate::routes;

/// Initialize logging via shared common utils
fn init_logging() {
    init_logging_default();
}

fn build_cors() -> CorsLayer {
    // The original frontend is served cross-origin during development.
    CorsLayer::very_permissive()
}

/// Storage layout from configs with fallback to the fixed defaults.
fn load_storage() -> configs::StorageConfig {
    configs::load_default()
        .map(|cfg| cfg.storage)
        .unwrap_or_default()
}

/// Load host/port from configs or env vars, with sensible fallbacks
fn load_bind_addr() -> anyhow::Result<SocketAddr> {
    let (host, port) = match configs::load_default() {
        Ok(cfg) => {
            let s = cfg.server;
            (s.host, s.port)
        }
        Err(_) => {
            let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
            let port = env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse::<u16>().ok())
                .unwrap_or(8000);
            (host, port)
        }
    };
    Ok(format!("{}:{}", host, port).parse()?)
}

/// Public entry: build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    dotenv().ok();
    init_logging();

    let storage = load_storage();
    runtime::ensure_env(&storage.frontend_dir, &storage.data_dir).await?;

    let data_file = common::env::data_file_path(&storage.data_dir, &storage.data_file);
    let store = EmployeeStore::new(data_file.clone()).await?;
    info!(path = %data_file.display(), "employee backing file ready");

    let cors = build_cors();
    let app: Router = routes::build_router(Arc::clone(&store), cors, &storage.frontend_dir);

    let addr = load_bind_addr()?;
    info!(%addr, "starting employee store service");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

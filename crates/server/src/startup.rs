use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use common::utils::logging::init_logging_from_env;
use configs::{AppConfig, DatabaseConfig, ServerConfig, StoreBackend};
use dotenvy::dotenv;
use service::{InMemoryStudentRepository, MongoStudentRepository, StudentRepository, StudentService};
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Connect the configured store. The handle lives as long as the returned repository.
pub async fn build_repository(cfg: &DatabaseConfig) -> Result<Arc<dyn StudentRepository>, StartupError> {
    match cfg.backend {
        StoreBackend::Memory => {
            warn!("using in-memory student store; records are lost on exit");
            Ok(Arc::new(InMemoryStudentRepository::new()))
        }
        StoreBackend::Mongodb => {
            let db = models::db::connect_with_config(cfg)
                .await
                .map_err(|e| StartupError::Runtime(format!("cannot reach mongodb: {e}")))?;
            Ok(Arc::new(MongoStudentRepository::from_database(&db, &cfg.collection)))
        }
    }
}

pub fn build_app(cfg: &AppConfig, repo: Arc<dyn StudentRepository>) -> Router {
    let state = ServerState::new(StudentService::new(repo));
    routes::build_router(state, build_cors(), &cfg.server.base_path)
}

/// Public entry: build the app and run the HTTP server until the process exits.
pub async fn run() -> anyhow::Result<()> {
    run_with_shutdown(std::future::pending()).await
}

/// Same as [`run`], draining in-flight requests once `shutdown` resolves.
pub async fn run_with_shutdown<F>(shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    dotenv().ok();
    init_logging_from_env();

    let cfg = AppConfig::load_and_validate().map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    let repo = build_repository(&cfg.database).await?;
    let app = build_app(&cfg, repo);

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, base_path = %cfg.server.base_path, backend = ?cfg.database.backend, "starting student records server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("server stopped");
    Ok(())
}

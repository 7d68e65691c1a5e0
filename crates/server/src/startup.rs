use std::{future::Future, sync::Arc};

use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use service::{customer::repo::build_dao, CustomerService};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes::{self, AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect to the database, apply migrations when configured and wire the service graph.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db_cfg = DatabaseConfig::from(&cfg.database);
    let db = connect_with_config(&db_cfg).await?;

    if cfg.database.auto_migrate {
        migration::Migrator::up(&db, None).await?;
        info!(event = "migrations_applied", "database schema up to date");
    }

    let dao = build_dao(cfg.data_access, db);
    info!(data_access = ?cfg.data_access, "customer data access selected");
    let state = AppState::new(Arc::new(CustomerService::new(dao)));
    Ok(routes::build_router(state, build_cors()))
}

/// Serve `app` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!(%addr, "starting customer server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!(%addr, "customer server stopped");
    Ok(())
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;
    let addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(&addr).await?;
    serve(listener, app, async {
        let _ = tokio::signal::ctrl_c().await;
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    })
    .await
}

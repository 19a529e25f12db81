use std::{future::Future, sync::Arc};

use todo_configs::{AppConfig, StoreBackend, StoreConfig};
use todo_service::{runtime, FileStore, MemoryStore, TodoStore};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Construct the single store this process runs with.
pub async fn build_store(cfg: &StoreConfig) -> anyhow::Result<Arc<dyn TodoStore>> {
    let store: Arc<dyn TodoStore> = match cfg.backend {
        StoreBackend::Memory => MemoryStore::seeded(),
        StoreBackend::File => FileStore::open(&cfg.data_file).await?,
    };
    info!(backend = store.backend(), data_file = %cfg.data_file.display(), "todo store ready");
    Ok(store)
}

/// Build the app from `cfg` and serve it until `shutdown` resolves.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let data_file = match cfg.store.backend {
        StoreBackend::File => Some(cfg.store.data_file.as_path()),
        StoreBackend::Memory => None,
    };
    runtime::ensure_env(&cfg.server.frontend_dir, data_file).await?;

    let store = build_store(&cfg.store).await?;
    let app = routes::build_router(AppState::new(store), build_cors(), &cfg.server.frontend_dir);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr()).await?;
    let addr = listener.local_addr()?;
    info!(%addr, "starting todo server");
    axum::serve(listener, app).with_graceful_shutdown(shutdown).await?;
    info!("todo server stopped");
    Ok(())
}

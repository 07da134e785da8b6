pub mod api;
pub mod config;
pub mod error;
pub mod i18n;
pub mod logic;
pub mod model;
pub mod paths;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use error::{BoardActionError, SeedError};
pub use i18n::I18n;

// Export logic types
pub use logic::{
    action_kind_for, ActionKind, AvailableValuesCache, BoardActionService, BoardListService,
    StoreBoardListService, WorkPackageFilterValues,
};

// Export all model types
pub use model::*;

pub use paths::ApiV3Paths;

// Export store types
pub use store::{MemoryStore, Store};

use std::sync::Arc;

/// Build the application router over `store` as configured
pub fn build_app<S: Store + 'static>(store: Arc<S>, config: &crate::config::AppConfig) -> axum::Router {
    let paths = ApiV3Paths::new(&config.api.base_path);
    let state = api::AppState::new(store, paths.clone(), I18n::new(config.boards.locale.clone()));
    api::create_router(&paths).with_state(Arc::new(state))
}

/// Seed the store with whatever the configuration asks for
pub async fn prepare_store<S: Store + ?Sized>(store: &S, config: &crate::config::AppConfig) -> anyhow::Result<()> {
    let paths = ApiV3Paths::new(&config.api.base_path);

    if config.boards.load_default_data {
        match seed::load_default_data(store, &paths, &config.boards.locale).await {
            Ok(()) => {}
            Err(SeedError::AlreadyLoaded) => log::info!("Default data already loaded"),
            Err(e) => return Err(e.into()),
        }
    }
    if config.boards.load_demo_data {
        seed::load_demo_project(store, &paths).await?;
    }
    Ok(())
}

/// Load configuration, seed the store and serve until shutdown
pub async fn run_server() -> anyhow::Result<()> {
    use axum::serve;
    use tokio::net::TcpListener;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    log::info!("Work package boards server");

    let config = crate::config::AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}:{}, api={}, locale={}",
        config.server.host,
        config.server.port,
        config.api.base_path,
        config.boards.locale
    );

    let store = Arc::new(MemoryStore::new());
    prepare_store(&*store, &config).await?;

    let app = build_app(store, &config);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    log::info!("Listening on http://{}{}", bind_address, config.api.base_path);

    serve(listener, app).await?;

    Ok(())
}

pub mod app;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod infra;
pub mod logging;

use config::AppConfig;
use error::AppError;
use infra::{init_db, spawn_seed, DbPool, SeedReport};
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Everything the presentation layer needs after startup.
pub struct Startup {
    pub pool: Arc<DbPool>,
    /// Seeding runs in the background; `None` when disabled in config.
    pub seeding: Option<JoinHandle<Result<SeedReport, AppError>>>,
}

/// Open the journal described by `config`. Must be called inside a tokio runtime.
pub async fn start(config: &AppConfig) -> Result<Startup, AppError> {
    logging::init_from_str(&config.log_level);

    let db_path = config.db_path();
    log::info!("DB path: {:?}", db_path);

    let pool = tokio::task::spawn_blocking(move || init_db(&db_path))
        .await?
        .map_err(|e| {
            log::error!("DB init failed: {}", e);
            e
        })?;
    let pool = Arc::new(pool);

    let seeding = config.seed_defaults.then(|| spawn_seed(Arc::clone(&pool)));

    Ok(Startup { pool, seeding })
}

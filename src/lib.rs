pub mod assessment;
pub mod assistant;
pub mod clock;
pub mod config;
pub mod db;
pub mod feedback;
pub mod intent;
pub mod models;
pub mod records;
pub mod scheduler;
pub mod sessions;
pub mod transfer;
pub mod voice;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for host applications. Respects `RUST_LOG`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}

//! Startup helpers for the coaching server binary.

use std::path::PathBuf;
use std::process::ExitCode;

use crate::engine::CoachConfig;
use crate::server::{self, AppState};

/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "FITLIFE_PORT";
/// Environment variable overriding the `SQLite` database path.
pub const DB_PATH_ENV: &str = "FITLIFE_DB_PATH";

/// Run the server (used by the `fitlife-server` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` on graceful shutdown, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting FitLife coach v{}", env!("CARGO_PKG_VERSION"));

    let config = config_from_env();
    if let Err(e) = config.validate() {
        tracing::error!("Invalid configuration: {e}");
        return ExitCode::from(1);
    }
    tracing::info!(
        "Completion backend: {} ({})",
        config.completion.base_url,
        config.completion.model
    );
    tracing::info!("Database: {}", config.storage.sqlite_path.display());

    let port = get_port();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let result = rt.block_on(async {
        let state = AppState::new(config).await?;
        server::run_server(state, port).await
    });
    if let Err(e) = result {
        tracing::error!("Server error: {e}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Build the configuration from environment overrides on top of defaults.
#[must_use]
pub fn config_from_env() -> CoachConfig {
    let mut config = CoachConfig::default();
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        config.storage.sqlite_path = PathBuf::from(path);
    }
    config
}

/// Get configured server port.
#[must_use]
pub fn get_port() -> u16 {
    std::env::var(PORT_ENV)
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(server::DEFAULT_PORT)
}

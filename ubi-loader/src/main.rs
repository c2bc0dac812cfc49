//! UBI Loader Main Entry Point
//!
//! Recreates the UBI indices from the mapping file and bulk-loads the sample
//! documents. Exits non-zero on any fatal step; documents rejected individually
//! by the cluster do not change the exit status.

use dotenv::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use ubi_loader::{status, AppConfig, Dependencies, LoaderError};

/// Initialize tracing/logging.
///
/// Logs go to stderr so they never interleave with the status lines on stdout.
fn init_tracing() -> Result<(), LoaderError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ubi_loader=info,ubi_loader_repository=info"));

    let json_logs = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let result = if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| LoaderError::config(format!("Failed to initialize tracing: {}", e)))?;

    info!(
        service_name = "ubi-loader",
        service_version = env!("CARGO_PKG_VERSION"),
        json = json_logs,
        "Tracing initialized"
    );

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), LoaderError> {
    // Load environment variables from .env file
    dotenv().ok();

    init_tracing()?;

    status::started("Starting index creation and data loading...");

    // Configuration errors stop the run before any network call
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            status::failure(format!("Error: {}", e));
            return Err(e);
        }
    };

    status::connecting(format!(
        "Connecting to search cluster at: {}",
        config.connection.host
    ));

    let deps = match Dependencies::new(&config).await {
        Ok(deps) => {
            status::success(format!(
                "Successfully connected to search cluster at {}",
                config.connection.host
            ));
            deps
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            status::failure(format!("Error connecting to search cluster: {}", e));
            return Err(e);
        }
    };

    match deps.orchestrator.run().await {
        Ok(summary) => {
            info!(
                accepted = summary.accepted,
                failed = summary.failures.len(),
                "UBI loader completed successfully"
            );
            status::finished("Script completed successfully!");
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "UBI loader failed");
            status::failure(format!("Error: {}", e));
            Err(e)
        }
    }
}

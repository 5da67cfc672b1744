//! URL Redirector
//!
//! Resolves request paths to URLs and answers with a redirect.
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌────────────────────────────────────────────────┐
//!                       │                 URL REDIRECTOR                  │
//!                       │                                                 │
//!   Client Request      │  ┌─────────┐    ┌──────────────────────────┐    │
//!   ────────────────────┼─▶│  http   │───▶│      resolver chain      │    │
//!                       │  │ server  │    │                          │    │
//!                       │  └─────────┘    │  store → rules → static  │    │
//!                       │       ▲         └────────────┬─────────────┘    │
//!                       │       │              hit     │     miss         │
//!   303 See Other /     │       │         ┌────────────┴─────────────┐    │
//!   default greeting    │       └─────────│ redirect │ terminal route │    │
//!   ◀───────────────────┼─────────────────┴──────────┴────────────────┘    │
//!                       │                                                 │
//!                       │  config · lifecycle · observability             │
//!                       └────────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use url_redirector::config::{load_config, validate_config, ConfigError, ObservabilityConfig, RedirectorConfig};
use url_redirector::http::HttpServer;
use url_redirector::lifecycle::{self, Shutdown, Startup, StartupError};
use url_redirector::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "url-redirector")]
#[command(about = "Redirect request paths to URLs from a store, a rule file and built-in routes", long_about = None)]
struct Cli {
    /// A JSON or YAML rule file.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Optional TOML service configuration.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overriding the configuration.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(cli: &Cli) -> Result<RedirectorConfig, StartupError> {
    let mut config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => RedirectorConfig::default(),
    };

    if let Some(file) = &cli.file {
        config.rules.file = file.to_string_lossy().into_owned();
    }
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            // No configured level yet, so report through the default subscriber.
            logging::init_logging(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Configuration rejected");
            return Err(e.into());
        }
    };
    logging::init_logging(&config.observability);

    tracing::info!("url-redirector v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rules_file = %config.rules.file,
        store_path = %config.store.path,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    // The recorder must be in place before startup records the table sizes.
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(e) => {
                tracing::error!(
                    metrics_address = %config.observability.metrics_address,
                    error = %e,
                    "Failed to parse metrics address"
                );
            }
        }
    }

    let Startup { chain, store } = match lifecycle::assemble(&config) {
        Ok(startup) => startup,
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            return Err(e.into());
        }
    };

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    let server = HttpServer::new(&config, chain);
    let result = server.run(listener, shutdown.subscribe()).await;

    store.close();
    result?;

    tracing::info!("Shutdown complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_overrides_defaults() {
        let cli = Cli::try_parse_from(["url-redirector", "--file", "rules.json", "--bind", "127.0.0.1:9000"]).unwrap();
        let config = resolve_config(&cli).unwrap();
        assert_eq!(config.rules.file, "rules.json");
        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
    }

    #[test]
    fn test_invalid_override_is_a_config_error() {
        let cli = Cli::try_parse_from(["url-redirector", "--bind", "nowhere"]).unwrap();
        let err = resolve_config(&cli).unwrap_err();
        assert!(matches!(err, StartupError::Config(ConfigError::Validation(_))));
        assert!(err.to_string().contains("listener.bind_address"));
    }

    #[test]
    fn test_missing_config_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cli = Cli::try_parse_from(["url-redirector", "--config", path.to_str().unwrap()]).unwrap();
        assert!(matches!(resolve_config(&cli), Err(StartupError::Config(ConfigError::Io(_)))));
    }
}

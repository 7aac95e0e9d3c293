//! Request echo server (v1)
//!
//! Serves two HTML pages: one echoing the request's headers and URL fields
//! as JSON, one a fixed "Hello, World!" document.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request      ┌──────────────────────────────────────────────┐
//!     ────────────────────┼─▶ http server ─▶ mount ─▶ RequestView adapter │
//!                         │                              │                │
//!                         │                              ▼                │
//!     Client Response     │                        render (echo/hello)   │
//!     ◀───────────────────┼── HtmlPage ◀───────── template substitution  │
//!                         │                                               │
//!                         │  config · observability · security · lifecycle│
//!                         └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use request_echo::config::{load_config, validate_config, ConfigError, EchoConfig};
use request_echo::lifecycle::{self, signals, Shutdown};
use request_echo::observability::logging;

#[derive(Parser)]
#[command(name = "request-echo")]
#[command(about = "Serve request echo and hello pages", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults apply when omitted).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override listener.bind_address.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override observability.log_level.
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<EchoConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => EchoConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(level) = &self.log_level {
            config.observability.log_level = level.clone();
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    logging::init_logging(&config.observability);

    tracing::info!("request-echo v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_watcher(shutdown.clone());

    lifecycle::start(config, &shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

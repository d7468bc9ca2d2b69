//! # cartsync
//!
//! Command-line client for a remote shopping cart.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           cartsync CLI                                  │
//! │                                                                         │
//! │  argv ──► clap ──► ClientConfig ──► CartStore ──► stdout (table/JSON)  │
//! │                   (file + env +     (fetch, then                       │
//! │                    --api-path)       one operation)                     │
//! │                                                                         │
//! │  Logs go to stderr so `--json` output stays machine-readable.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod args;
mod commands;

use clap::Parser;
use tracing::Subscriber;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    commands::run(cli).await
}

/// Filter used when `RUST_LOG` is not set.
const DEFAULT_LOG_FILTER: &str = "warn,cartsync_client=info,reqwest=warn";

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show request URLs and statuses
/// - `RUST_LOG=cartsync_client=trace` - Trace the client crate only
/// - Default: warnings, plus client info such as placed orders
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    log_subscriber(filter).init();
}

/// Formats to stderr, filtered only by `filter`.
fn log_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync + 'static {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_default_filter_is_applied() {
        let subscriber = log_subscriber(EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing::subscriber::with_default(subscriber, || {
            assert!(!tracing::enabled!(target: "reqwest::connect", Level::DEBUG));
            assert!(!tracing::enabled!(target: "hyper_util::client", Level::TRACE));
            assert!(tracing::enabled!(target: "cartsync_client::store", Level::INFO));
            assert!(!tracing::enabled!(target: "cartsync_client::store", Level::DEBUG));
            assert!(tracing::enabled!(target: "hyper_util::client", Level::WARN));
        });
    }

    #[test]
    fn test_custom_filter_is_applied() {
        let subscriber = log_subscriber(EnvFilter::new("cartsync_client=trace"));

        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "cartsync_client::api", Level::TRACE));
            assert!(!tracing::enabled!(target: "reqwest::connect", Level::DEBUG));
        });
    }
}

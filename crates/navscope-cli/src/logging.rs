use std::env;
use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const LOG_ENV: &str = "NAVSCOPE_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    pub filter: String,
}

impl LoggingConfig {
    /// `NAVSCOPE_LOG`, then `RUST_LOG`, then `warn` (`debug` when verbose).
    pub fn from_env(verbose: bool) -> Self {
        Self::from_lookup(verbose, |key| env::var(key).ok())
    }

    pub fn from_lookup(verbose: bool, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let filter = [LOG_ENV, "RUST_LOG"]
            .into_iter()
            .filter_map(|key| lookup(key))
            .map(|value| value.trim().to_owned())
            .find(|value| !value.is_empty())
            .unwrap_or_else(|| String::from(if verbose { "debug" } else { "warn" }));

        Self { filter }
    }
}

/// Installs a stderr subscriber so stdout stays machine-readable.
pub fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    // A second initialisation (tests) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

//! Provider configuration read from the environment.
//!
//! | Variable | Default |
//! |----------|---------|
//! | `NAVSCOPE_MFAPI_BASE_URL` | `https://api.mfapi.in` |
//! | `NAVSCOPE_TIMEOUT_MS` | `10000` |
//!
//! Command-line flags override both.

use std::env;

pub const BASE_URL_ENV: &str = "NAVSCOPE_MFAPI_BASE_URL";
pub const TIMEOUT_ENV: &str = "NAVSCOPE_TIMEOUT_MS";
pub const DEFAULT_BASE_URL: &str = "https://api.mfapi.in";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset, blank or unparsable values keep defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup(BASE_URL_ENV)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_ms = lookup(TIMEOUT_ENV)
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|timeout| *timeout > 0)
            .unwrap_or(defaults.timeout_ms);

        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout_ms,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

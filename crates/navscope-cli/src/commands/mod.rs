mod details;
mod explore;
mod nav;
mod pages;
mod search;

use std::sync::Arc;
use std::time::Instant;

use navscope_core::{
    Envelope, EnvelopeError, EnvelopeMeta, FixtureProvider, MfapiAdapter, NavChart,
    ProviderConfig, ProviderError, ProviderId, SchemeExplorer, SchemeProvider,
};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::cli::{Cli, Command, ProviderSelector};
use crate::error::CliError;

pub struct CommandResult {
    pub data: Value,
    pub warnings: Vec<String>,
    pub errors: Vec<EnvelopeError>,
    pub chart: Option<NavChart>,
}

impl CommandResult {
    pub fn ok(data: Value) -> Self {
        Self {
            data,
            warnings: Vec::new(),
            errors: Vec::new(),
            chart: None,
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn with_provider_error(mut self, error: &ProviderError, provider: ProviderId) -> Self {
        self.errors.push(EnvelopeError::from_provider(error, provider));
        self
    }

    pub fn with_chart(mut self, chart: Option<NavChart>) -> Self {
        self.chart = chart;
        self
    }
}

/// The printed envelope plus the chart a table rendering draws.
pub struct CommandOutcome {
    pub envelope: Envelope<Value>,
    pub chart: Option<NavChart>,
}

pub async fn run(cli: &Cli) -> Result<CommandOutcome, CliError> {
    let (provider, mut warnings) = build_provider(cli)?;
    let provider_id = provider.id();
    let explorer = SchemeExplorer::new(provider);

    let started = Instant::now();
    let command_result = match &cli.command {
        Command::Search(args) => search::run(args, &explorer).await?,
        Command::Details(args) => details::run(args, &explorer).await?,
        Command::Nav(args) => nav::run(args, &explorer).await?,
        Command::Explore(args) => explore::run(args, &explorer).await?,
        Command::Pages(args) => pages::run(args)?,
    };
    let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    let CommandResult {
        data,
        warnings: command_warnings,
        errors,
        chart,
    } = command_result;
    warnings.extend(command_warnings);

    let mut meta = EnvelopeMeta::new(Uuid::new_v4().to_string(), provider_id, latency_ms)?;
    for warning in warnings {
        meta.push_warning(warning);
    }

    debug!(
        provider = %provider_id,
        latency_ms,
        errors = errors.len(),
        "command finished"
    );

    let envelope = Envelope::with_errors(meta, data, errors)?;
    Ok(CommandOutcome { envelope, chart })
}

/// Picks the provider from the global flags, returning warnings for flags it ignores.
fn build_provider(cli: &Cli) -> Result<(Arc<dyn SchemeProvider>, Vec<String>), CliError> {
    let mut warnings = Vec::new();

    if let Some(path) = &cli.fixture {
        warn_ignored_http_flags(cli, &mut warnings);
        let provider = FixtureProvider::from_path(path)?;
        return Ok((Arc::new(provider), warnings));
    }

    match cli.provider {
        ProviderSelector::Fixture => {
            warn_ignored_http_flags(cli, &mut warnings);
            Ok((Arc::new(FixtureProvider::demo()?), warnings))
        }
        ProviderSelector::Mfapi => {
            let config = provider_config(cli, ProviderConfig::from_env());
            debug!(base_url = %config.base_url, timeout_ms = config.timeout_ms, "using mfapi");
            Ok((Arc::new(MfapiAdapter::new(config)), warnings))
        }
    }
}

fn provider_config(cli: &Cli, mut config: ProviderConfig) -> ProviderConfig {
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.trim());
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }
    config
}

fn warn_ignored_http_flags(cli: &Cli, warnings: &mut Vec<String>) {
    if cli.base_url.is_some() {
        warnings.push(String::from("--base-url is ignored by the fixture provider"));
    }
    if cli.timeout_ms.is_some() {
        warnings.push(String::from("--timeout-ms is ignored by the fixture provider"));
    }
}

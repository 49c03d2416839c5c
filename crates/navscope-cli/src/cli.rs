//! CLI argument definitions for navscope.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `search` | Find schemes whose name contains a query |
//! | `details` | Show the seven-field summary of a scheme |
//! | `nav` | Show the sanitized NAV history of a scheme |
//! | `explore` | Search, pick a match and show its details and history |
//! | `pages` | Show the informational pages |
//!
//! # Global Options
//!
//! | Option | Default | Description |
//! |--------|---------|-------------|
//! | `--format` | `json` | Output format (json, table) |
//! | `--pretty` | `false` | Pretty-print JSON output |
//! | `--strict` | `false` | Treat warnings as errors |
//! | `--provider` | `mfapi` | Scheme data provider |
//! | `--fixture` | | Fixture document to serve instead of mfapi |
//! | `--base-url` | env / `https://api.mfapi.in` | mfapi base URL |
//! | `--timeout-ms` | env / `10000` | Request timeout in ms |
//! | `--verbose` | `false` | Debug logging on stderr |
//!
//! # Examples
//!
//! ```bash
//! navscope search bluechip
//! navscope nav 119551 --chart --format table
//! navscope explore "large cap" --select 119551 --pretty
//! navscope --provider fixture explore growth
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use navscope_core::{Page, ProviderId};

/// Mutual fund scheme explorer.
///
/// Searches the scheme directory, shows scheme details and charts the NAV
/// history of a selected scheme. Every command prints a JSON envelope.
#[derive(Debug, Parser)]
#[command(name = "navscope", author, version, about = "Mutual fund scheme explorer")]
pub struct Cli {
    /// Output format for results.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Pretty-print JSON output with indentation.
    #[arg(long, global = true, default_value_t = false)]
    pub pretty: bool,

    /// Treat warnings and errors as failures (exit code 5).
    #[arg(long, global = true, default_value_t = false)]
    pub strict: bool,

    /// Scheme data provider.
    #[arg(long, global = true, value_enum, default_value_t = ProviderSelector::Mfapi)]
    pub provider: ProviderSelector,

    /// Serve schemes from a fixture document; implies `--provider fixture`.
    #[arg(long, global = true)]
    pub fixture: Option<PathBuf>,

    /// mfapi base URL, overriding NAVSCOPE_MFAPI_BASE_URL.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Request timeout in milliseconds, overriding NAVSCOPE_TIMEOUT_MS.
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,

    /// Log at debug level unless NAVSCOPE_LOG or RUST_LOG say otherwise.
    #[arg(long, short, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Single JSON object output.
    Json,
    /// Plain-text tables for terminal display.
    Table,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProviderSelector {
    /// The public mfapi.in API.
    Mfapi,
    /// The bundled demo data set, or the `--fixture` document.
    Fixture,
}

impl ProviderSelector {
    pub const fn provider_id(self) -> ProviderId {
        match self {
            Self::Mfapi => ProviderId::Mfapi,
            Self::Fixture => ProviderId::Fixture,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Find schemes whose name contains the query, ignoring case.
    ///
    ///   navscope search "bluechip"
    Search(SearchArgs),

    /// Show fund house, type, category, code, name, start date and NAV.
    ///
    ///   navscope details 119551
    Details(SchemeArgs),

    /// Show the NAV history, oldest first, with malformed entries dropped.
    ///
    ///   navscope nav 119551 --chart --format table
    Nav(NavArgs),

    /// Search, select one match and show its details and NAV history.
    ///
    /// The first match is selected unless `--select` names another one.
    ///
    ///   navscope explore "large cap" --select 119551
    Explore(ExploreArgs),

    /// Show an informational page, or all of them.
    Pages(PagesArgs),
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-form, case-insensitive substring of the scheme name.
    pub query: String,
}

#[derive(Debug, Args)]
pub struct SchemeArgs {
    /// Scheme code as listed by `search`.
    pub code: String,
}

#[derive(Debug, Args)]
pub struct NavArgs {
    /// Scheme code as listed by `search`.
    pub code: String,

    /// Attach chart data (JSON) or draw a line chart (table).
    #[arg(long, default_value_t = false)]
    pub chart: bool,
}

#[derive(Debug, Args)]
pub struct ExploreArgs {
    /// Free-form, case-insensitive substring of the scheme name.
    pub query: String,

    /// Scheme code to select among the matches.
    #[arg(long)]
    pub select: Option<String>,

    /// Attach chart data (JSON) or draw a line chart (table).
    #[arg(long, default_value_t = false)]
    pub chart: bool,
}

#[derive(Debug, Args)]
pub struct PagesArgs {
    /// investment, blog or insurance. All pages when omitted.
    pub page: Option<Page>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "navscope",
            "nav",
            "119551",
            "--chart",
            "--format",
            "table",
            "--provider",
            "fixture",
        ])
        .expect("valid arguments");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.provider, ProviderSelector::Fixture);
        assert!(matches!(cli.command, Command::Nav(NavArgs { chart: true, .. })));
    }

    #[test]
    fn unknown_page_is_rejected() {
        let result = Cli::try_parse_from(["navscope", "pages", "login"]);
        assert!(result.is_err());
    }
}

use navscope_core::{SchemeCode, SchemeDetail, SchemeExplorer, SearchOutcome};
use serde::Serialize;

use crate::cli::ExploreArgs;
use crate::error::CliError;

use super::nav::{history_view, NavResponseData};
use super::search::{match_rows, no_matches_warning, parse_query, MatchRow};
use super::CommandResult;

#[derive(Debug, Serialize)]
struct ExploreResponseData {
    query: String,
    matches: Vec<MatchRow>,
    selected: Option<SelectedData>,
}

#[derive(Debug, Serialize)]
struct SelectedData {
    scheme_code: String,
    /// `None` when the fetch failed; the failure is in `errors`.
    detail: Option<SchemeDetail>,
    nav: Option<NavResponseData>,
}

pub async fn run(args: &ExploreArgs, explorer: &SchemeExplorer) -> Result<CommandResult, CliError> {
    let query = parse_query(&args.query)?;
    let requested = args
        .select
        .as_deref()
        .map(SchemeCode::parse)
        .transpose()?;

    let exploration = match explorer.explore(query.clone(), requested.as_ref()).await {
        Ok(exploration) => exploration,
        Err(error) => {
            let data = serde_json::to_value(ExploreResponseData {
                query: query.as_str().to_owned(),
                matches: Vec::new(),
                selected: None,
            })?;
            return Ok(CommandResult::ok(data).with_provider_error(&error, explorer.provider_id()));
        }
    };

    let mut warnings = Vec::new();
    let matches = match &exploration.search {
        SearchOutcome::Matches(directory) => match_rows(directory),
        SearchOutcome::NoMatches => {
            warnings.push(no_matches_warning(&exploration.query));
            Vec::new()
        }
    };

    let mut chart = None;
    let mut errors = Vec::new();
    let selected = match exploration.selected {
        Some(selected) => {
            if let Some(requested) = requested.as_ref().filter(|code| **code != selected.code) {
                warnings.push(format!(
                    "scheme {requested} is not among the matches for '{}'; showing {}",
                    exploration.query, selected.code
                ));
            }

            let detail = match selected.detail {
                Ok(detail) => Some(detail),
                Err(error) => {
                    errors.push(error);
                    None
                }
            };
            let nav = match &selected.history {
                Ok(outcome) => {
                    let view = history_view(&selected.code, outcome, args.chart);
                    warnings.extend(view.warnings);
                    chart = view.chart;
                    Some(view.data)
                }
                Err(error) => {
                    errors.push(error.clone());
                    None
                }
            };

            Some(SelectedData {
                scheme_code: selected.code.to_string(),
                detail,
                nav,
            })
        }
        None => None,
    };

    let data = serde_json::to_value(ExploreResponseData {
        query: exploration.query.as_str().to_owned(),
        matches,
        selected,
    })?;

    let provider = explorer.provider_id();
    Ok(errors.iter().fold(
        CommandResult::ok(data).with_warnings(warnings).with_chart(chart),
        |result, error| result.with_provider_error(error, provider),
    ))
}

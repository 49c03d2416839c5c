use navscope_core::{
    NavChart, NavDate, NavHistoryOutcome, NavPoint, SchemeCode, SchemeExplorer,
};
use serde::Serialize;

use crate::cli::NavArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
pub(super) struct NavResponseData {
    scheme_code: String,
    received: usize,
    dropped: usize,
    points: Vec<NavPoint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    chart: Option<ChartSummary>,
}

/// Chart bounds; the points themselves are already in `points`.
#[derive(Debug, Serialize)]
struct ChartSummary {
    start: NavDate,
    end: NavDate,
    min: f64,
    max: f64,
}

impl From<&NavChart> for ChartSummary {
    fn from(chart: &NavChart) -> Self {
        Self {
            start: chart.start,
            end: chart.end,
            min: chart.min,
            max: chart.max,
        }
    }
}

pub(super) struct HistoryView {
    pub data: NavResponseData,
    pub warnings: Vec<String>,
    pub chart: Option<NavChart>,
}

pub(super) fn history_view(
    code: &SchemeCode,
    outcome: &NavHistoryOutcome,
    with_chart: bool,
) -> HistoryView {
    let mut warnings = Vec::new();

    let points = match outcome {
        NavHistoryOutcome::Series(sanitized) => {
            if sanitized.dropped > 0 {
                warnings.push(format!(
                    "dropped {} of {} NAV entries for scheme {code} with a malformed date or value",
                    sanitized.dropped, sanitized.received
                ));
            }
            sanitized.series.points().to_vec()
        }
        NavHistoryOutcome::NoValidHistory(empty) if empty.provider_returned_nothing() => {
            warnings.push(format!("no NAV history available for scheme {code}"));
            Vec::new()
        }
        NavHistoryOutcome::NoValidHistory(empty) => {
            warnings.push(format!(
                "no valid NAV history for scheme {code}: all {} entries were malformed",
                empty.received
            ));
            Vec::new()
        }
    };

    let chart = with_chart
        .then(|| outcome.series().and_then(NavChart::from_series))
        .flatten();

    HistoryView {
        data: NavResponseData {
            scheme_code: code.to_string(),
            received: outcome.received(),
            dropped: outcome.dropped(),
            points,
            chart: chart.as_ref().map(ChartSummary::from),
        },
        warnings,
        chart,
    }
}

pub async fn run(args: &NavArgs, explorer: &SchemeExplorer) -> Result<CommandResult, CliError> {
    let code = SchemeCode::parse(&args.code)?;

    match explorer.nav_history(&code).await {
        Ok(outcome) => {
            let view = history_view(&code, &outcome, args.chart);
            let data = serde_json::to_value(view.data)?;
            Ok(CommandResult::ok(data)
                .with_warnings(view.warnings)
                .with_chart(view.chart))
        }
        Err(error) => {
            let data = serde_json::json!({
                "scheme_code": code.to_string(),
                "received": 0,
                "dropped": 0,
                "points": [],
            });
            Ok(CommandResult::ok(data).with_provider_error(&error, explorer.provider_id()))
        }
    }
}

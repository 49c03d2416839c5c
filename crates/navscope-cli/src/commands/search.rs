use navscope_core::{SchemeDirectory, SchemeExplorer, SchemeQuery, SearchOutcome};
use serde::Serialize;
use serde_json::Value;

use crate::cli::SearchArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct SearchResponseData {
    query: String,
    matches: Vec<MatchRow>,
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct MatchRow {
    scheme_code: String,
    scheme_name: String,
}

pub(super) fn match_rows(directory: &SchemeDirectory) -> Vec<MatchRow> {
    directory
        .iter()
        .map(|(code, name)| MatchRow {
            scheme_code: code.to_string(),
            scheme_name: name.to_owned(),
        })
        .collect()
}

pub(super) fn parse_query(input: &str) -> Result<SchemeQuery, CliError> {
    SchemeQuery::parse(input)
        .ok_or_else(|| CliError::Command(String::from("query must not be empty")))
}

pub(super) fn no_matches_warning(query: &SchemeQuery) -> String {
    format!("no schemes match '{query}'")
}

pub async fn run(args: &SearchArgs, explorer: &SchemeExplorer) -> Result<CommandResult, CliError> {
    let query = parse_query(&args.query)?;

    match explorer.search(&query).await {
        Ok(SearchOutcome::Matches(directory)) => {
            let data = response_data(&query, match_rows(&directory))?;
            Ok(CommandResult::ok(data))
        }
        Ok(SearchOutcome::NoMatches) => {
            let data = response_data(&query, Vec::new())?;
            Ok(CommandResult::ok(data).with_warning(no_matches_warning(&query)))
        }
        Err(error) => {
            let data = response_data(&query, Vec::new())?;
            Ok(CommandResult::ok(data).with_provider_error(&error, explorer.provider_id()))
        }
    }
}

fn response_data(query: &SchemeQuery, matches: Vec<MatchRow>) -> Result<Value, CliError> {
    let data = SearchResponseData {
        query: query.as_str().to_owned(),
        matches,
    };
    Ok(serde_json::to_value(data)?)
}

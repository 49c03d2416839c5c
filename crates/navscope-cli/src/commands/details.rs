use navscope_core::{SchemeCode, SchemeDetail, SchemeExplorer};
use serde::Serialize;

use crate::cli::SchemeArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct DetailsResponseData {
    scheme_code: String,
    detail: Option<SchemeDetail>,
}

pub async fn run(args: &SchemeArgs, explorer: &SchemeExplorer) -> Result<CommandResult, CliError> {
    let code = SchemeCode::parse(&args.code)?;

    let (detail, error) = match explorer.details(&code).await {
        Ok(detail) => (Some(detail), None),
        Err(error) => (None, Some(error)),
    };

    let data = serde_json::to_value(DetailsResponseData {
        scheme_code: code.to_string(),
        detail,
    })?;

    let command_result = CommandResult::ok(data);
    Ok(match error {
        Some(error) => command_result.with_provider_error(&error, explorer.provider_id()),
        None => command_result,
    })
}

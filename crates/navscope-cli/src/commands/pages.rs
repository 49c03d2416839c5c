use navscope_core::Page;
use serde::Serialize;

use crate::cli::PagesArgs;
use crate::error::CliError;

use super::CommandResult;

#[derive(Debug, Serialize)]
struct PageData {
    page: Page,
    title: &'static str,
    subtitle: &'static str,
    body: &'static str,
}

impl From<Page> for PageData {
    fn from(page: Page) -> Self {
        Self {
            page,
            title: page.title(),
            subtitle: page.subtitle(),
            body: page.body(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PagesResponseData {
    pages: Vec<PageData>,
}

pub fn run(args: &PagesArgs) -> Result<CommandResult, CliError> {
    let pages = match args.page {
        Some(page) => vec![PageData::from(page)],
        None => Page::ALL.into_iter().map(PageData::from).collect(),
    };

    let data = serde_json::to_value(PagesResponseData { pages })?;
    Ok(CommandResult::ok(data))
}

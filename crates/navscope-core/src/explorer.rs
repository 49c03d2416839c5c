//! Request-scoped orchestration of provider calls and preparation stages.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::pipeline::{
    match_schemes, project_detail, sanitize_nav_history, NavHistoryOutcome, SchemeQuery,
};
use crate::provider::{ProviderError, SchemeProvider};
use crate::{ProviderId, SchemeCode, SchemeDetail, SchemeDirectory};

/// Result of a directory search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Matches(SchemeDirectory),
    NoMatches,
}

impl SearchOutcome {
    pub fn matches(&self) -> Option<&SchemeDirectory> {
        match self {
            Self::Matches(directory) => Some(directory),
            Self::NoMatches => None,
        }
    }
}

/// Details and history for the scheme picked out of the search matches.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedScheme {
    pub code: SchemeCode,
    /// Detail and history are fetched independently; either may fail alone.
    pub detail: Result<SchemeDetail, ProviderError>,
    pub history: Result<NavHistoryOutcome, ProviderError>,
}

/// Everything one search interaction produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Exploration {
    pub query: SchemeQuery,
    pub search: SearchOutcome,
    pub selected: Option<SelectedScheme>,
}

/// Runs the preparation stages against an injected provider.
#[derive(Clone)]
pub struct SchemeExplorer {
    provider: Arc<dyn SchemeProvider>,
}

impl SchemeExplorer {
    pub fn new(provider: Arc<dyn SchemeProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_id(&self) -> ProviderId {
        self.provider.id()
    }

    pub async fn search(&self, query: &SchemeQuery) -> Result<SearchOutcome, ProviderError> {
        let directory = self.provider.list_schemes().await.map_err(|error| {
            warn!(provider = %self.provider.id(), %error, "scheme directory fetch failed");
            error
        })?;

        let matched = match_schemes(&directory, query);
        debug!(
            query = %query,
            directory = directory.len(),
            matched = matched.len(),
            "matched schemes"
        );

        if matched.is_empty() {
            return Ok(SearchOutcome::NoMatches);
        }
        Ok(SearchOutcome::Matches(matched))
    }

    pub async fn details(&self, code: &SchemeCode) -> Result<SchemeDetail, ProviderError> {
        let raw = self.provider.scheme_details(code).await.map_err(|error| {
            warn!(provider = %self.provider.id(), %code, %error, "scheme detail fetch failed");
            error
        })?;

        debug!(%code, fields = raw.len(), "projecting scheme detail");
        Ok(project_detail(&raw))
    }

    pub async fn nav_history(&self, code: &SchemeCode) -> Result<NavHistoryOutcome, ProviderError> {
        let raw = self.provider.historical_nav(code).await.map_err(|error| {
            warn!(provider = %self.provider.id(), %code, %error, "nav history fetch failed");
            error
        })?;

        let outcome = sanitize_nav_history(&raw);
        debug!(
            %code,
            received = outcome.received(),
            dropped = outcome.dropped(),
            "sanitized nav history"
        );
        Ok(outcome)
    }

    /// Search, then load details and history for `selected` if it is among the
    /// matches, otherwise for the first match.
    ///
    /// # Errors
    ///
    /// Fails only when the directory fetch fails. Detail and history failures
    /// are carried in [`SelectedScheme`] next to the search outcome.
    pub async fn explore(
        &self,
        query: SchemeQuery,
        selected: Option<&SchemeCode>,
    ) -> Result<Exploration, ProviderError> {
        let search = self.search(&query).await?;

        let code = search.matches().and_then(|matches| {
            selected
                .filter(|code| matches.contains(code))
                .or_else(|| matches.first().map(|(code, _)| code))
                .cloned()
        });

        let selected = match code {
            Some(code) => {
                let detail = self.details(&code).await;
                let history = self.nav_history(&code).await;
                Some(SelectedScheme {
                    code,
                    detail,
                    history,
                })
            }
            None => None,
        };

        Ok(Exploration {
            query,
            search,
            selected,
        })
    }
}

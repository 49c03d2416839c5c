use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::provider::{ProviderError, ProviderFuture, SchemeProvider};
use crate::{
    CoreError, ProviderId, RawNavHistory, RawSchemeDetail, SchemeCode, SchemeDirectory,
};

const DEMO_FIXTURE: &str = include_str!("../../fixtures/demo.json");

/// In-memory provider for tests and offline use.
///
/// A code listed in the directory but without a detail record answers with
/// its code and name only; a known code without history answers with an empty
/// history. Codes unknown everywhere are `not_found`.
#[derive(Debug, Clone, Default)]
pub struct FixtureProvider {
    directory: SchemeDirectory,
    details: HashMap<SchemeCode, RawSchemeDetail>,
    history: HashMap<SchemeCode, RawNavHistory>,
    failure: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FixtureDocument {
    #[serde(default)]
    schemes: BTreeMap<String, String>,
    #[serde(default)]
    details: BTreeMap<String, RawSchemeDetail>,
    #[serde(default)]
    nav_history: BTreeMap<String, Vec<(String, String)>>,
}

impl FixtureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose every call fails as unavailable with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// The bundled demo data set used by `--provider fixture`.
    pub fn demo() -> Result<Self, CoreError> {
        Self::from_json(DEMO_FIXTURE)
    }

    pub fn from_json(document: &str) -> Result<Self, CoreError> {
        let document: FixtureDocument = serde_json::from_str(document)?;
        let mut provider = Self::new();

        for (code, name) in document.schemes {
            provider.directory.insert(SchemeCode::parse(&code)?, name);
        }
        for (code, detail) in document.details {
            provider.details.insert(SchemeCode::parse(&code)?, detail);
        }
        for (code, entries) in document.nav_history {
            provider
                .history
                .insert(SchemeCode::parse(&code)?, entries.into_iter().collect());
        }

        Ok(provider)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_json(&document)
    }

    pub fn with_scheme(mut self, code: SchemeCode, name: impl Into<String>) -> Self {
        self.directory.insert(code, name);
        self
    }

    pub fn with_detail(mut self, code: SchemeCode, detail: RawSchemeDetail) -> Self {
        self.details.insert(code, detail);
        self
    }

    pub fn with_history(mut self, code: SchemeCode, history: RawNavHistory) -> Self {
        self.history.insert(code, history);
        self
    }

    fn check_failure(&self) -> Result<(), ProviderError> {
        match &self.failure {
            Some(message) => Err(ProviderError::unavailable(message.clone())),
            None => Ok(()),
        }
    }

    fn is_known(&self, code: &SchemeCode) -> bool {
        self.directory.contains(code)
            || self.details.contains_key(code)
            || self.history.contains_key(code)
    }

    fn lookup_detail(&self, code: &SchemeCode) -> Result<RawSchemeDetail, ProviderError> {
        self.check_failure()?;

        if let Some(detail) = self.details.get(code) {
            return Ok(detail.clone());
        }

        let name = self
            .directory
            .get(code)
            .ok_or_else(|| ProviderError::not_found(code))?;

        let mut detail = RawSchemeDetail::new();
        detail.insert("scheme_code", Value::String(code.to_string()));
        detail.insert("scheme_name", Value::String(name.to_owned()));
        Ok(detail)
    }

    fn lookup_history(&self, code: &SchemeCode) -> Result<RawNavHistory, ProviderError> {
        self.check_failure()?;

        if !self.is_known(code) {
            return Err(ProviderError::not_found(code));
        }
        Ok(self.history.get(code).cloned().unwrap_or_default())
    }
}

impl SchemeProvider for FixtureProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Fixture
    }

    fn list_schemes(&self) -> ProviderFuture<'_, SchemeDirectory> {
        let result = self.check_failure().map(|()| self.directory.clone());
        Box::pin(async move { result })
    }

    fn scheme_details<'a>(&'a self, code: &'a SchemeCode) -> ProviderFuture<'a, RawSchemeDetail> {
        Box::pin(async move { self.lookup_detail(code) })
    }

    fn historical_nav<'a>(&'a self, code: &'a SchemeCode) -> ProviderFuture<'a, RawNavHistory> {
        Box::pin(async move { self.lookup_history(code) })
    }
}

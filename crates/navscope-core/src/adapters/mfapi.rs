use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::http_client::{HttpClient, HttpRequest, ReqwestHttpClient};
use crate::provider::{ProviderError, ProviderFuture, SchemeProvider};
use crate::provider_policy::ProviderPolicy;
use crate::throttling::RequestQuota;
use crate::{ProviderId, RawNavEntry, RawNavHistory, RawSchemeDetail, SchemeCode, SchemeDirectory};

/// Adapter for the public mfapi.in scheme and NAV API.
///
/// Details and history come from the same `/mf/{code}` document. The NAV rows
/// of the last detail fetch are held for one `historical_nav` call on the same
/// code, so an explore costs one upstream request and one quota slot.
#[derive(Clone)]
pub struct MfapiAdapter {
    http_client: Arc<dyn HttpClient>,
    config: ProviderConfig,
    quota: RequestQuota,
    pending_history: Arc<Mutex<PendingHistory>>,
}

type PendingHistory = Option<(SchemeCode, Vec<MfapiNavRow>)>;

impl MfapiAdapter {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: ProviderConfig) -> Self {
        Self {
            http_client,
            config,
            quota: RequestQuota::from_policy(&ProviderPolicy::mfapi_default()),
            pending_history: Arc::new(Mutex::new(None)),
        }
    }

    pub fn with_quota(mut self, quota: RequestQuota) -> Self {
        self.quota = quota;
        self
    }

    pub fn directory_url(&self) -> String {
        format!("{}/mf", self.config.base_url)
    }

    pub fn scheme_url(&self, code: &SchemeCode) -> String {
        format!(
            "{}/mf/{}",
            self.config.base_url,
            urlencoding::encode(code.as_str())
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        code: Option<&SchemeCode>,
    ) -> Result<T, ProviderError> {
        if let Err(wait) = self.quota.acquire() {
            return Err(ProviderError::rate_limited(format!(
                "mfapi request quota exhausted; retry in {:.2}s",
                wait.as_secs_f64()
            )));
        }

        debug!(%url, "mfapi request");
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.config.timeout_ms);

        let response = self.http_client.execute(request).await.map_err(|error| {
            ProviderError::unavailable(format!("mfapi transport error: {}", error.message()))
        })?;

        if response.status == 404 {
            if let Some(code) = code {
                return Err(ProviderError::not_found(code));
            }
        }

        if !response.is_success() {
            return Err(ProviderError::unavailable(format!(
                "mfapi returned status {}",
                response.status
            )));
        }

        serde_json::from_str(&response.body).map_err(|error| {
            ProviderError::invalid_response(format!("failed to parse mfapi response: {error}"))
        })
    }

    async fn fetch_directory(&self) -> Result<SchemeDirectory, ProviderError> {
        let listings: Vec<MfapiListing> = self.get_json(self.directory_url(), None).await?;
        let total = listings.len();

        let directory = listings
            .into_iter()
            .filter_map(|listing| {
                let code = SchemeCode::parse(&value_text(listing.scheme_code)).ok()?;
                Some((code, listing.scheme_name))
            })
            .collect::<SchemeDirectory>();

        debug!(
            total,
            skipped = total - directory.len(),
            "mfapi scheme directory"
        );
        Ok(directory)
    }

    async fn fetch_scheme(&self, code: &SchemeCode) -> Result<MfapiScheme, ProviderError> {
        let scheme: MfapiScheme = self.get_json(self.scheme_url(code), Some(code)).await?;
        if scheme.meta.is_empty() {
            return Err(ProviderError::not_found(code));
        }
        Ok(scheme)
    }

    async fn fetch_detail(&self, code: &SchemeCode) -> Result<RawSchemeDetail, ProviderError> {
        let scheme = self.fetch_scheme(code).await?;
        *self.pending_history() = Some((code.clone(), scheme.data.clone()));
        Ok(scheme.into_detail())
    }

    async fn fetch_history(&self, code: &SchemeCode) -> Result<RawNavHistory, ProviderError> {
        if let Some(rows) = self.take_pending_history(code) {
            debug!(%code, rows = rows.len(), "reusing nav rows from detail fetch");
            return Ok(history_from_rows(rows));
        }

        let scheme = self.fetch_scheme(code).await?;
        Ok(history_from_rows(scheme.data))
    }

    fn pending_history(&self) -> MutexGuard<'_, PendingHistory> {
        self.pending_history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Rows held for `code` are handed out once; rows for another code are discarded.
    fn take_pending_history(&self, code: &SchemeCode) -> Option<Vec<MfapiNavRow>> {
        self.pending_history()
            .take()
            .filter(|(pending, _)| pending == code)
            .map(|(_, rows)| rows)
    }
}

impl SchemeProvider for MfapiAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::Mfapi
    }

    fn list_schemes(&self) -> ProviderFuture<'_, SchemeDirectory> {
        Box::pin(self.fetch_directory())
    }

    fn scheme_details<'a>(&'a self, code: &'a SchemeCode) -> ProviderFuture<'a, RawSchemeDetail> {
        Box::pin(self.fetch_detail(code))
    }

    fn historical_nav<'a>(&'a self, code: &'a SchemeCode) -> ProviderFuture<'a, RawNavHistory> {
        Box::pin(self.fetch_history(code))
    }
}

#[derive(Debug, Deserialize)]
struct MfapiListing {
    #[serde(rename = "schemeCode")]
    scheme_code: Value,
    #[serde(rename = "schemeName", default)]
    scheme_name: String,
}

#[derive(Debug, Deserialize)]
struct MfapiScheme {
    #[serde(default)]
    meta: Map<String, Value>,
    #[serde(default)]
    data: Vec<MfapiNavRow>,
}

#[derive(Debug, Clone, Deserialize)]
struct MfapiNavRow {
    #[serde(default)]
    date: Value,
    #[serde(default)]
    nav: Value,
}

impl MfapiScheme {
    /// `meta` plus the oldest date as `scheme_start_date` and the latest NAV as `nav`.
    fn into_detail(self) -> RawSchemeDetail {
        let start_date = self.data.last().map(|row| row.date.clone());
        let latest_nav = self.data.first().map(|row| row.nav.clone());

        let mut detail = self.meta.into_iter().collect::<RawSchemeDetail>();
        if let Some(date) = start_date.filter(|value| !value.is_null()) {
            if detail.get("scheme_start_date").is_none() {
                detail.insert("scheme_start_date", date);
            }
        }
        if let Some(nav) = latest_nav.filter(|value| !value.is_null()) {
            if detail.get("nav").is_none() {
                detail.insert("nav", nav);
            }
        }
        detail
    }
}

fn history_from_rows(rows: Vec<MfapiNavRow>) -> RawNavHistory {
    RawNavHistory::new(
        rows.into_iter()
            .map(|row| RawNavEntry::new(value_text(row.date), value_text(row.nav)))
            .collect(),
    )
}

/// Strings verbatim, other scalars as JSON text, `null` as empty.
fn value_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::http_client::{HttpError, HttpResponse, StaticHttpClient};
    use crate::provider::ProviderErrorKind;

    const BASE: &str = "https://mfapi.test";

    fn adapter(client: StaticHttpClient) -> MfapiAdapter {
        MfapiAdapter::with_http_client(
            Arc::new(client),
            ProviderConfig::default().with_base_url(BASE),
        )
    }

    fn code(value: &str) -> SchemeCode {
        SchemeCode::parse(value).expect("valid code")
    }

    const SCHEME_BODY: &str = r#"{
        "meta": {
            "fund_house": "XYZ Mutual Fund",
            "scheme_type": "Open Ended Schemes",
            "scheme_category": "Equity Scheme - Large Cap Fund",
            "scheme_code": 119551,
            "scheme_name": "XYZ Bluechip Fund - Direct Plan - Growth"
        },
        "data": [
            {"date": "03-01-2023", "nav": "12.2000"},
            {"date": "02-01-2023", "nav": "not-a-number"},
            {"date": "01-01-2013", "nav": "10.0000"}
        ],
        "status": "SUCCESS"
    }"#;

    #[tokio::test]
    async fn directory_accepts_numeric_and_text_codes() {
        let client = StaticHttpClient::new().with_response(
            format!("{BASE}/mf"),
            HttpResponse::ok_json(
                r#"[
                    {"schemeCode": 100001, "schemeName": "Alpha Growth Fund"},
                    {"schemeCode": "100002", "schemeName": "Beta Bond Fund"},
                    {"schemeCode": "", "schemeName": "Broken Listing"}
                ]"#,
            ),
        );

        let directory = adapter(client).list_schemes().await.expect("directory");
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.get(&code("100001")), Some("Alpha Growth Fund"));
        assert_eq!(directory.get(&code("100002")), Some("Beta Bond Fund"));
    }

    #[tokio::test]
    async fn detail_adds_start_date_and_latest_nav() {
        let client = StaticHttpClient::new()
            .with_response(format!("{BASE}/mf/119551"), HttpResponse::ok_json(SCHEME_BODY));

        let detail = adapter(client)
            .scheme_details(&code("119551"))
            .await
            .expect("detail");

        assert_eq!(detail.get("fund_house"), Some(&Value::from("XYZ Mutual Fund")));
        assert_eq!(detail.get("scheme_start_date"), Some(&Value::from("01-01-2013")));
        assert_eq!(detail.get("nav"), Some(&Value::from("12.2000")));
    }

    #[tokio::test]
    async fn history_keeps_provider_order_and_raw_text() {
        let client = StaticHttpClient::new()
            .with_response(format!("{BASE}/mf/119551"), HttpResponse::ok_json(SCHEME_BODY));

        let history = adapter(client)
            .historical_nav(&code("119551"))
            .await
            .expect("history");

        assert_eq!(history.len(), 3);
        assert_eq!(history.entries()[0], RawNavEntry::new("03-01-2023", "12.2000"));
        assert_eq!(history.entries()[1].nav, "not-a-number");
    }

    #[tokio::test]
    async fn empty_meta_is_unknown_scheme() {
        let client = StaticHttpClient::new().with_response(
            format!("{BASE}/mf/999999"),
            HttpResponse::ok_json(r#"{"meta": {}, "data": [], "status": "SUCCESS"}"#),
        );

        let error = adapter(client)
            .historical_nav(&code("999999"))
            .await
            .expect_err("unknown scheme");
        assert_eq!(error.kind(), ProviderErrorKind::NotFound);
    }

    #[tokio::test]
    async fn http_404_for_scheme_is_not_found_but_for_directory_is_unavailable() {
        let provider = adapter(StaticHttpClient::new());

        let error = provider
            .scheme_details(&code("123"))
            .await
            .expect_err("404");
        assert_eq!(error.kind(), ProviderErrorKind::NotFound);

        let error = provider.list_schemes().await.expect_err("404");
        assert_eq!(error.kind(), ProviderErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn transport_and_decode_failures_are_classified() {
        let client = StaticHttpClient::new()
            .with_error(format!("{BASE}/mf"), HttpError::new("connection failed: refused"))
            .with_response(format!("{BASE}/mf/1"), HttpResponse::ok_json("<html>"));
        let provider = adapter(client);

        let error = provider.list_schemes().await.expect_err("transport");
        assert_eq!(error.kind(), ProviderErrorKind::Unavailable);
        assert!(error.message().contains("connection failed: refused"));

        let error = provider
            .scheme_details(&code("1"))
            .await
            .expect_err("decode");
        assert_eq!(error.kind(), ProviderErrorKind::InvalidResponse);
    }

    #[tokio::test]
    async fn exhausted_quota_fails_fast_without_calling_upstream() {
        let client = Arc::new(
            StaticHttpClient::new().with_response(format!("{BASE}/mf"), HttpResponse::ok_json("[]")),
        );
        let provider = MfapiAdapter::with_http_client(
            client.clone(),
            ProviderConfig::default().with_base_url(BASE),
        )
        .with_quota(RequestQuota::new(Duration::from_secs(60), 1));

        provider.list_schemes().await.expect("first call fits");
        let error = provider.list_schemes().await.expect_err("quota spent");
        assert_eq!(error.kind(), ProviderErrorKind::RateLimited);
        assert_eq!(client.requests().len(), 1);
    }

    #[tokio::test]
    async fn history_after_details_reuses_the_same_response() {
        let client = Arc::new(
            StaticHttpClient::new()
                .with_response(format!("{BASE}/mf/119551"), HttpResponse::ok_json(SCHEME_BODY)),
        );
        let provider = MfapiAdapter::with_http_client(
            client.clone(),
            ProviderConfig::default().with_base_url(BASE),
        );

        provider.scheme_details(&code("119551")).await.expect("detail");
        let history = provider
            .historical_nav(&code("119551"))
            .await
            .expect("history");

        assert_eq!(history.len(), 3);
        assert_eq!(client.requests().len(), 1);

        provider
            .historical_nav(&code("119551"))
            .await
            .expect("history again");
        assert_eq!(client.requests().len(), 2);
    }

    #[tokio::test]
    async fn held_rows_are_not_served_for_another_code() {
        let client = Arc::new(
            StaticHttpClient::new()
                .with_response(format!("{BASE}/mf/119551"), HttpResponse::ok_json(SCHEME_BODY))
                .with_response(
                    format!("{BASE}/mf/100004"),
                    HttpResponse::ok_json(r#"{"meta": {"scheme_code": 100004}, "data": []}"#),
                ),
        );
        let provider = MfapiAdapter::with_http_client(
            client.clone(),
            ProviderConfig::default().with_base_url(BASE),
        );

        provider.scheme_details(&code("119551")).await.expect("detail");
        let history = provider
            .historical_nav(&code("100004"))
            .await
            .expect("history");

        assert!(history.is_empty());
        assert_eq!(client.requests().len(), 2);
    }

    #[test]
    fn scheme_codes_are_percent_encoded() {
        let provider = adapter(StaticHttpClient::new());
        assert_eq!(
            provider.scheme_url(&code("a/b")),
            format!("{BASE}/mf/a%2Fb")
        );
    }
}

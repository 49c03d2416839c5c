//! Contract every `SchemeProvider` honours, checked against each adapter.

use std::sync::Arc;

use navscope_core::{
    FixtureProvider, HttpResponse, MfapiAdapter, ProviderConfig, ProviderErrorKind, ProviderId,
    SchemeCode, SchemeProvider, StaticHttpClient,
};
use serde_json::Value;

const BASE: &str = "https://mfapi.test";

#[derive(Clone)]
struct ProviderCase {
    id: ProviderId,
    provider: Arc<dyn SchemeProvider>,
}

fn code(value: &str) -> SchemeCode {
    SchemeCode::parse(value).expect("valid code")
}

fn mfapi_case() -> ProviderCase {
    let client = StaticHttpClient::new()
        .with_response(
            format!("{BASE}/mf"),
            HttpResponse::ok_json(
                r#"[
                    {"schemeCode": 100001, "schemeName": "Alpha Growth Fund - Direct Plan - Growth"},
                    {"schemeCode": 100004, "schemeName": "Gamma Flexi Cap Fund - Direct Plan - Growth"}
                ]"#,
            ),
        )
        .with_response(
            format!("{BASE}/mf/100001"),
            HttpResponse::ok_json(
                r#"{
                    "meta": {
                        "fund_house": "Alpha Mutual Fund",
                        "scheme_type": "Open Ended Schemes",
                        "scheme_category": "Equity Scheme - Large Cap Fund",
                        "scheme_code": 100001,
                        "scheme_name": "Alpha Growth Fund - Direct Plan - Growth"
                    },
                    "data": [
                        {"date": "03-01-2023", "nav": "44.8125"},
                        {"date": "02-01-2023", "nav": "44.6608"}
                    ],
                    "status": "SUCCESS"
                }"#,
            ),
        )
        .with_response(
            format!("{BASE}/mf/100004"),
            HttpResponse::ok_json(
                r#"{
                    "meta": {"scheme_code": 100004, "scheme_name": "Gamma Flexi Cap Fund - Direct Plan - Growth"},
                    "data": [],
                    "status": "SUCCESS"
                }"#,
            ),
        )
        .with_response(
            format!("{BASE}/mf/404404"),
            HttpResponse::ok_json(r#"{"meta": {}, "data": []}"#),
        );

    ProviderCase {
        id: ProviderId::Mfapi,
        provider: Arc::new(MfapiAdapter::with_http_client(
            Arc::new(client),
            ProviderConfig::default().with_base_url(BASE),
        )),
    }
}

fn provider_cases() -> Vec<ProviderCase> {
    vec![
        ProviderCase {
            id: ProviderId::Fixture,
            provider: Arc::new(FixtureProvider::demo().expect("demo fixture")),
        },
        mfapi_case(),
    ]
}

#[tokio::test]
async fn providers_report_their_id() {
    for case in provider_cases() {
        assert_eq!(case.provider.id(), case.id);
    }
}

#[tokio::test]
async fn directory_lists_known_schemes() {
    for case in provider_cases() {
        let directory = case
            .provider
            .list_schemes()
            .await
            .unwrap_or_else(|error| panic!("{}: directory failed: {error}", case.id));

        assert!(!directory.is_empty(), "{}: directory is empty", case.id);
        assert_eq!(
            directory.get(&code("100001")),
            Some("Alpha Growth Fund - Direct Plan - Growth"),
            "{}",
            case.id
        );
    }
}

#[tokio::test]
async fn details_carry_fund_house_and_code() {
    for case in provider_cases() {
        let detail = case
            .provider
            .scheme_details(&code("100001"))
            .await
            .unwrap_or_else(|error| panic!("{}: details failed: {error}", case.id));

        assert_eq!(
            detail.get("fund_house"),
            Some(&Value::from("Alpha Mutual Fund")),
            "{}",
            case.id
        );
        assert!(detail.get("scheme_code").is_some(), "{}", case.id);
    }
}

#[tokio::test]
async fn history_entries_are_raw_text() {
    for case in provider_cases() {
        let history = case
            .provider
            .historical_nav(&code("100001"))
            .await
            .unwrap_or_else(|error| panic!("{}: history failed: {error}", case.id));

        assert!(!history.is_empty(), "{}", case.id);
        assert!(
            history.entries().iter().any(|entry| entry.date == "03-01-2023"),
            "{}",
            case.id
        );
    }
}

#[tokio::test]
async fn empty_history_is_a_valid_answer() {
    for case in provider_cases() {
        let history = case
            .provider
            .historical_nav(&code("100004"))
            .await
            .unwrap_or_else(|error| panic!("{}: empty history must not fail: {error}", case.id));

        assert!(history.is_empty(), "{}", case.id);
    }
}

#[tokio::test]
async fn unknown_codes_are_not_found() {
    for case in provider_cases() {
        let detail_error = case
            .provider
            .scheme_details(&code("404404"))
            .await
            .expect_err("unknown code");
        let history_error = case
            .provider
            .historical_nav(&code("404404"))
            .await
            .expect_err("unknown code");

        assert_eq!(detail_error.kind(), ProviderErrorKind::NotFound, "{}", case.id);
        assert_eq!(history_error.kind(), ProviderErrorKind::NotFound, "{}", case.id);
    }
}

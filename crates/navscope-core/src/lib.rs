//! Core contracts for navscope.
//!
//! This crate contains:
//! - Scheme and NAV domain models and validation
//! - The provider contract and its mfapi/fixture adapters
//! - The matcher, projector and sanitizer preparation stages
//! - Response envelope and structured errors

pub mod adapters;
pub mod chart;
pub mod config;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod explorer;
pub mod http_client;
pub mod pages;
pub mod pipeline;
pub mod provider;
pub mod provider_policy;
pub mod source;
pub mod throttling;

pub use adapters::{FixtureProvider, MfapiAdapter};
pub use chart::NavChart;
pub use config::ProviderConfig;
pub use domain::{
    parse_nav_value, NavDate, NavPoint, NavSeries, RawNavEntry, RawNavHistory, RawSchemeDetail,
    SchemeCode, SchemeDetail, SchemeDirectory, UtcDateTime,
};
pub use envelope::{Envelope, EnvelopeError, EnvelopeMeta, SCHEMA_VERSION};
pub use error::{CoreError, ValidationError};
pub use explorer::{Exploration, SchemeExplorer, SearchOutcome, SelectedScheme};
pub use http_client::{
    HttpClient, HttpError, HttpRequest, HttpResponse, ReqwestHttpClient, StaticHttpClient,
};
pub use pages::Page;
pub use pipeline::{
    match_schemes, project_detail, sanitize_nav_history, NavHistoryOutcome, NoValidHistory,
    SanitizedNav, SchemeQuery,
};
pub use provider::{ProviderError, ProviderErrorKind, ProviderFuture, SchemeProvider};
pub use provider_policy::ProviderPolicy;
pub use source::ProviderId;
pub use throttling::RequestQuota;

//! Scheme provider contract and its error type.
//!
//! Every adapter implements [`SchemeProvider`]. The three calls mirror what a
//! scheme explorer needs from its data source:
//!
//! | Call | Returns |
//! |------|---------|
//! | [`list_schemes`](SchemeProvider::list_schemes) | [`SchemeDirectory`] |
//! | [`scheme_details`](SchemeProvider::scheme_details) | [`RawSchemeDetail`] |
//! | [`historical_nav`](SchemeProvider::historical_nav) | [`RawNavHistory`] |
//!
//! An empty [`RawNavHistory`] is a valid answer; only an outright failure is
//! a [`ProviderError`].

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use crate::{ProviderId, RawNavHistory, RawSchemeDetail, SchemeCode, SchemeDirectory};

/// Provider-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    Unavailable,
    NotFound,
    RateLimited,
    InvalidResponse,
    InvalidRequest,
}

/// Recoverable failure of a provider call. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    kind: ProviderErrorKind,
    message: String,
}

impl ProviderError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::Unavailable, message)
    }

    pub fn not_found(code: &SchemeCode) -> Self {
        Self::new(
            ProviderErrorKind::NotFound,
            format!("scheme code '{code}' is not known to the provider"),
        )
    }

    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::RateLimited, message)
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidResponse, message)
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorKind::InvalidRequest, message)
    }

    fn new(kind: ProviderErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub const fn kind(&self) -> ProviderErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            ProviderErrorKind::Unavailable => "provider.unavailable",
            ProviderErrorKind::NotFound => "provider.not_found",
            ProviderErrorKind::RateLimited => "provider.rate_limited",
            ProviderErrorKind::InvalidResponse => "provider.invalid_response",
            ProviderErrorKind::InvalidRequest => "provider.invalid_request",
        }
    }
}

impl Display for ProviderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for ProviderError {}

pub type ProviderFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ProviderError>> + Send + 'a>>;

/// Source of scheme and NAV data.
///
/// Implementations must be `Send + Sync`; the explorer holds them behind an
/// `Arc<dyn SchemeProvider>` so tests can substitute a fake.
pub trait SchemeProvider: Send + Sync {
    /// Returns the provider identifier reported in envelopes.
    fn id(&self) -> ProviderId;

    /// Fetches the full scheme directory.
    fn list_schemes(&self) -> ProviderFuture<'_, SchemeDirectory>;

    /// Fetches the raw detail record for one scheme.
    ///
    /// # Errors
    ///
    /// [`ProviderErrorKind::NotFound`] for unknown codes, otherwise any
    /// transport or decoding failure.
    fn scheme_details<'a>(&'a self, code: &'a SchemeCode) -> ProviderFuture<'a, RawSchemeDetail>;

    /// Fetches the raw date/NAV history for one scheme.
    fn historical_nav<'a>(&'a self, code: &'a SchemeCode) -> ProviderFuture<'a, RawNavHistory>;
}

//! Provider adapters.
//!
//! - [`MfapiAdapter`] talks to the public mfapi.in HTTP API.
//! - [`FixtureProvider`] serves an in-memory data set for tests and offline use.

mod fixture;
mod mfapi;

pub use fixture::FixtureProvider;
pub use mfapi::MfapiAdapter;

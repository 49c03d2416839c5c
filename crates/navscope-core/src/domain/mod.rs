//! # Domain Models
//!
//! Request-scoped types for scheme lookup and NAV history.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SchemeCode`] | Validated scheme identifier |
//! | [`SchemeDirectory`] | Scheme code to scheme name snapshot |
//! | [`RawSchemeDetail`] | Unvalidated provider detail record |
//! | [`SchemeDetail`] | Seven-field display schema |
//! | [`RawNavHistory`] | Unvalidated date/NAV entries |
//! | [`NavDate`] | `DD-MM-YYYY` calendar date |
//! | [`NavPoint`] / [`NavSeries`] | Validated, date-ordered NAV history |
//! | [`UtcDateTime`] | UTC timestamp for envelopes |
//!
//! Nothing here is cached or shared between requests.

mod nav;
mod scheme;
mod timestamp;

pub use nav::{parse_nav_value, NavDate, NavPoint, NavSeries, RawNavEntry, RawNavHistory};
pub use scheme::{RawSchemeDetail, SchemeCode, SchemeDetail, SchemeDirectory};
pub use timestamp::UtcDateTime;

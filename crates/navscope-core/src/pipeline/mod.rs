//! The three stateless preparation stages run for each user action.
//!
//! - [`match_schemes`] filters a directory by a case-insensitive name query.
//! - [`project_detail`] maps a raw detail record onto the display schema.
//! - [`sanitize_nav_history`] turns raw date/NAV strings into an ordered series.
//!
//! None of them touch a provider; [`crate::SchemeExplorer`] does the fetching.

mod matcher;
mod projector;
mod sanitizer;

pub use matcher::{match_schemes, SchemeQuery};
pub use projector::project_detail;
pub use sanitizer::{sanitize_nav_history, NavHistoryOutcome, NoValidHistory, SanitizedNav};

use serde::Serialize;

use crate::{parse_nav_value, NavDate, NavPoint, NavSeries, RawNavEntry, RawNavHistory};

/// A non-empty sanitized series and how many raw entries were discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SanitizedNav {
    pub series: NavSeries,
    pub received: usize,
    pub dropped: usize,
}

/// No entry survived sanitization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NoValidHistory {
    pub received: usize,
    pub dropped: usize,
}

impl NoValidHistory {
    /// True when the provider sent no entries at all, as opposed to only malformed ones.
    pub const fn provider_returned_nothing(&self) -> bool {
        self.received == 0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavHistoryOutcome {
    Series(SanitizedNav),
    NoValidHistory(NoValidHistory),
}

impl NavHistoryOutcome {
    pub fn series(&self) -> Option<&NavSeries> {
        match self {
            Self::Series(sanitized) => Some(&sanitized.series),
            Self::NoValidHistory(_) => None,
        }
    }

    pub const fn received(&self) -> usize {
        match self {
            Self::Series(sanitized) => sanitized.received,
            Self::NoValidHistory(empty) => empty.received,
        }
    }

    pub const fn dropped(&self) -> usize {
        match self {
            Self::Series(sanitized) => sanitized.dropped,
            Self::NoValidHistory(empty) => empty.dropped,
        }
    }
}

/// Parses one raw entry; `None` when either the date or the value is malformed.
fn parse_entry(entry: &RawNavEntry) -> Option<NavPoint> {
    let date = NavDate::parse(&entry.date).ok()?;
    let value = parse_nav_value(&entry.nav).ok()?;
    Some(NavPoint::new(date, value))
}

/// Keeps the entries whose date and value both parse, ordered by date.
pub fn sanitize_nav_history(raw: &RawNavHistory) -> NavHistoryOutcome {
    let points = raw.entries().iter().filter_map(parse_entry).collect::<Vec<_>>();

    let received = raw.len();
    let dropped = received - points.len();

    if points.is_empty() {
        return NavHistoryOutcome::NoValidHistory(NoValidHistory { received, dropped });
    }

    NavHistoryOutcome::Series(SanitizedNav {
        series: NavSeries::from_unsorted(points),
        received,
        dropped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_malformed_entries_and_sorts() {
        let raw: RawNavHistory = [
            ("03-01-2023", "12.2"),
            ("bad-date", "11.0"),
            ("01-01-2023", "10.5"),
            ("02-01-2023", "not-a-number"),
        ]
        .into_iter()
        .collect();

        let NavHistoryOutcome::Series(sanitized) = sanitize_nav_history(&raw) else {
            panic!("two entries are valid");
        };

        let dates = sanitized
            .series
            .iter()
            .map(|point| point.date.to_string())
            .collect::<Vec<_>>();
        assert_eq!(dates, vec!["01-01-2023", "03-01-2023"]);
        assert_eq!(sanitized.received, 4);
        assert_eq!(sanitized.dropped, 2);
    }

    #[test]
    fn empty_input_is_no_valid_history_from_empty_provider() {
        let outcome = sanitize_nav_history(&RawNavHistory::default());
        let NavHistoryOutcome::NoValidHistory(empty) = outcome else {
            panic!("nothing to keep");
        };
        assert!(empty.provider_returned_nothing());
        assert_eq!(empty.dropped, 0);
    }

    #[test]
    fn all_malformed_is_distinguishable_from_empty_provider() {
        let raw: RawNavHistory = [("2023-01-01", "10.0"), ("01-01-2023", "")]
            .into_iter()
            .collect();

        let NavHistoryOutcome::NoValidHistory(empty) = sanitize_nav_history(&raw) else {
            panic!("nothing is valid");
        };
        assert!(!empty.provider_returned_nothing());
        assert_eq!(empty.dropped, 2);
    }

    #[test]
    fn duplicate_dates_pass_through() {
        let raw: RawNavHistory = [("01-01-2023", "10.0"), ("01-01-2023", "10.1")]
            .into_iter()
            .collect();

        let outcome = sanitize_nav_history(&raw);
        let series = outcome.series().expect("both entries are valid");
        assert_eq!(series.len(), 2);
        assert_eq!(series.points()[0].value, 10.0);
        assert_eq!(series.points()[1].value, 10.1);
        assert_eq!(outcome.dropped(), 0);
    }
}

use std::fmt::{Display, Formatter};

use crate::SchemeDirectory;

/// Search text exactly as typed. A blank query means no search was performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeQuery {
    text: String,
    folded: String,
}

impl SchemeQuery {
    /// Returns `None` for empty or whitespace-only input. Other input is kept
    /// untrimmed; surrounding spaces take part in matching.
    pub fn parse(input: &str) -> Option<Self> {
        if input.trim().is_empty() {
            return None;
        }

        Some(Self {
            text: input.to_owned(),
            folded: input.to_lowercase(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.folded)
    }
}

impl Display for SchemeQuery {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

/// Keeps the entries whose scheme name contains the query, ignoring case.
pub fn match_schemes(directory: &SchemeDirectory, query: &SchemeQuery) -> SchemeDirectory {
    directory
        .iter()
        .filter(|(_, name)| query.matches(name))
        .map(|(code, name)| (code.clone(), name.to_owned()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SchemeCode;

    fn directory() -> SchemeDirectory {
        [
            ("100001", "Alpha Growth Fund"),
            ("100002", "Beta Bond Fund"),
            ("100003", "ALPHA Liquid Fund"),
        ]
        .into_iter()
        .map(|(code, name)| (SchemeCode::parse(code).expect("valid"), name.to_owned()))
        .collect()
    }

    #[test]
    fn blank_query_is_no_search() {
        assert!(SchemeQuery::parse("").is_none());
        assert!(SchemeQuery::parse("   ").is_none());
    }

    #[test]
    fn matches_case_insensitively() {
        let query = SchemeQuery::parse("alpha").expect("non-empty");
        let matched = match_schemes(&directory(), &query);

        let codes = matched.codes().map(SchemeCode::as_str).collect::<Vec<_>>();
        assert_eq!(codes, vec!["100001", "100003"]);
    }

    #[test]
    fn matched_entries_are_unaltered() {
        let source = directory();
        let query = SchemeQuery::parse("BOND").expect("non-empty");
        let matched = match_schemes(&source, &query);

        for (code, name) in matched.iter() {
            assert_eq!(source.get(code), Some(name));
        }
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn folds_non_ascii_case() {
        let source: SchemeDirectory = [(
            SchemeCode::parse("200001").expect("valid"),
            String::from("ÉQUITÉ Fund"),
        )]
        .into_iter()
        .collect();

        let query = SchemeQuery::parse("équité").expect("non-empty");
        assert_eq!(match_schemes(&source, &query).len(), 1);
    }

    #[test]
    fn surrounding_spaces_are_part_of_the_query() {
        let source: SchemeDirectory = [
            (SchemeCode::parse("1").expect("valid"), String::from("Alpha Growth Fund")),
            (SchemeCode::parse("2").expect("valid"), String::from("Beta Fund - Growth")),
        ]
        .into_iter()
        .collect();

        let query = SchemeQuery::parse("Fund ").expect("non-empty");
        assert_eq!(query.as_str(), "Fund ");

        let matched = match_schemes(&source, &query);
        let codes = matched.codes().map(SchemeCode::as_str).collect::<Vec<_>>();
        assert_eq!(codes, vec!["2"]);
        for (_, name) in matched.iter() {
            assert!(name.to_lowercase().contains("fund "));
        }
    }

    #[test]
    fn no_match_yields_empty_directory() {
        let query = SchemeQuery::parse("gamma").expect("non-empty");
        assert!(match_schemes(&directory(), &query).is_empty());
    }
}

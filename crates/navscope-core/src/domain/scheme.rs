use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ValidationError;

/// Provider-assigned scheme identifier, e.g. `"119551"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SchemeCode(String);

impl SchemeCode {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptySchemeCode);
        }

        if trimmed.chars().any(char::is_whitespace) {
            return Err(ValidationError::SchemeCodeWhitespace {
                value: trimmed.to_owned(),
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SchemeCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for SchemeCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for SchemeCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<SchemeCode> for String {
    fn from(value: SchemeCode) -> Self {
        value.0
    }
}

/// Snapshot of scheme code to scheme name, fetched fresh per query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SchemeDirectory(BTreeMap<SchemeCode, String>);

impl SchemeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry; a repeated code keeps the latest name.
    pub fn insert(&mut self, code: SchemeCode, name: impl Into<String>) {
        self.0.insert(code, name.into());
    }

    pub fn get(&self, code: &SchemeCode) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    pub fn contains(&self, code: &SchemeCode) -> bool {
        self.0.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<(&SchemeCode, &str)> {
        self.0
            .iter()
            .next()
            .map(|(code, name)| (code, name.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SchemeCode, &str)> {
        self.0.iter().map(|(code, name)| (code, name.as_str()))
    }

    pub fn codes(&self) -> impl Iterator<Item = &SchemeCode> {
        self.0.keys()
    }
}

impl FromIterator<(SchemeCode, String)> for SchemeDirectory {
    fn from_iter<I: IntoIterator<Item = (SchemeCode, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for SchemeDirectory {
    type Item = (SchemeCode, String);
    type IntoIter = btree_map::IntoIter<SchemeCode, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Unordered field name to value record as returned by a provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawSchemeDetail(BTreeMap<String, Value>);

impl RawSchemeDetail {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for RawSchemeDetail {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value))
                .collect(),
        )
    }
}

/// Display schema for one scheme; every field is populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemeDetail {
    pub fund_house: String,
    pub scheme_type: String,
    pub scheme_category: String,
    pub scheme_code: String,
    pub scheme_name: String,
    pub scheme_start_date: String,
    pub nav_value: String,
}

impl SchemeDetail {
    /// Fallback for any field absent from the raw record.
    pub const NOT_AVAILABLE: &'static str = "N/A";

    pub const LABELS: [&'static str; 7] = [
        "Fund House",
        "Scheme Type",
        "Scheme Category",
        "Scheme Code",
        "Scheme Name",
        "Scheme Start Date",
        "NAV Value",
    ];

    /// Label/value pairs in presentation order.
    pub fn rows(&self) -> [(&'static str, &str); 7] {
        let [fund_house, scheme_type, scheme_category, scheme_code, scheme_name, start_date, nav] =
            Self::LABELS;
        [
            (fund_house, self.fund_house.as_str()),
            (scheme_type, self.scheme_type.as_str()),
            (scheme_category, self.scheme_category.as_str()),
            (scheme_code, self.scheme_code.as_str()),
            (scheme_name, self.scheme_name.as_str()),
            (start_date, self.scheme_start_date.as_str()),
            (nav, self.nav_value.as_str()),
        ]
    }
}

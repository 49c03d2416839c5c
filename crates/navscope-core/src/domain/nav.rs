use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::Date;

use crate::ValidationError;

/// Provider wire format: zero-padded day, zero-padded month, four-digit year.
const PROVIDER_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[day]-[month]-[year]");
const ISO_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Calendar date of a NAV observation.
///
/// Parsed only from the exact `DD-MM-YYYY` shape; displayed the same way and
/// serialized as ISO `YYYY-MM-DD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NavDate(Date);

impl NavDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidNavDate {
            value: input.to_owned(),
        };

        if !has_provider_shape(input) {
            return Err(invalid());
        }

        Date::parse(input, PROVIDER_FORMAT)
            .map(Self)
            .map_err(|_| invalid())
    }

    pub const fn into_inner(self) -> Date {
        self.0
    }

    pub fn format_iso(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

// Rejects single-digit days/months and signed or short years before the calendar check.
fn has_provider_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            2 | 5 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

impl Display for NavDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}-{:02}-{:04}",
            self.0.day(),
            u8::from(self.0.month()),
            self.0.year()
        )
    }
}

impl FromStr for NavDate {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl Serialize for NavDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.format_iso())
    }
}

impl<'de> Deserialize<'de> for NavDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Date::parse(&value, ISO_FORMAT)
            .map(Self)
            .map_err(D::Error::custom)
    }
}

/// Parses a provider NAV string into a finite number.
///
/// Surrounding whitespace is ignored; empty, non-numeric, `NaN` and infinite
/// values are rejected.
pub fn parse_nav_value(input: &str) -> Result<f64, ValidationError> {
    let invalid = || ValidationError::InvalidNavValue {
        value: input.to_owned(),
    };

    let value = input.trim().parse::<f64>().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }

    Ok(value)
}

/// One validated NAV observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NavPoint {
    pub date: NavDate,
    #[serde(rename = "nav")]
    pub value: f64,
}

impl NavPoint {
    pub const fn new(date: NavDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// NAV points in non-decreasing date order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NavSeries(Vec<NavPoint>);

impl NavSeries {
    /// Orders points by date; points sharing a date keep their input order.
    pub fn from_unsorted(mut points: Vec<NavPoint>) -> Self {
        points.sort_by_key(|point| point.date);
        Self(points)
    }

    pub fn points(&self) -> &[NavPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn first(&self) -> Option<&NavPoint> {
        self.0.first()
    }

    pub fn last(&self) -> Option<&NavPoint> {
        self.0.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NavPoint> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a NavSeries {
    type Item = &'a NavPoint;
    type IntoIter = std::slice::Iter<'a, NavPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Unvalidated date/NAV pair exactly as a provider delivered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNavEntry {
    pub date: String,
    pub nav: String,
}

impl RawNavEntry {
    pub fn new(date: impl Into<String>, nav: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            nav: nav.into(),
        }
    }
}

/// Provider NAV history in provider order; duplicate dates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawNavHistory(Vec<RawNavEntry>);

impl RawNavHistory {
    pub fn new(entries: Vec<RawNavEntry>) -> Self {
        Self(entries)
    }

    pub fn entries(&self) -> &[RawNavEntry] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<D, N> FromIterator<(D, N)> for RawNavHistory
where
    D: Into<String>,
    N: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (D, N)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(date, nav)| RawNavEntry::new(date, nav))
                .collect(),
        )
    }
}

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;

use crate::ValidationError;

/// Informational pages that have no data behind them yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Investment,
    Blog,
    Insurance,
}

impl Page {
    pub const ALL: [Self; 3] = [Self::Investment, Self::Blog, Self::Insurance];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Investment => "investment",
            Self::Blog => "blog",
            Self::Insurance => "insurance",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::Investment => "Investment Dashboard",
            Self::Blog => "Investment Blog",
            Self::Insurance => "Insurance Details",
        }
    }

    pub const fn subtitle(self) -> &'static str {
        match self {
            Self::Investment => "Track and Manage Investments",
            Self::Blog => "Latest Articles and Insights",
            Self::Insurance => "Explore and Manage Insurance Policies",
        }
    }

    pub const fn body(self) -> &'static str {
        match self {
            Self::Investment => {
                "This section can be expanded to include features like tracking investment \
                 portfolios, analyzing growth, and making recommendations."
            }
            Self::Blog => {
                "Coming soon: A blog platform with articles on investment strategies, mutual \
                 fund tips, and financial planning."
            }
            Self::Insurance => {
                "This section is under development. It will include features for comparing \
                 insurance policies, calculating premiums, and tracking your insurance portfolio."
            }
        }
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "investment" => Ok(Self::Investment),
            "blog" => Ok(Self::Blog),
            "insurance" | "insurance-details" => Ok(Self::Insurance),
            other => Err(ValidationError::InvalidPage {
                value: other.to_owned(),
            }),
        }
    }
}

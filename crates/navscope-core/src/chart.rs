use serde::Serialize;

use crate::{NavDate, NavPoint, NavSeries};

/// Line-chart data for a NAV series. The core prepares it; renderers only draw.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavChart {
    pub points: Vec<NavPoint>,
    pub start: NavDate,
    pub end: NavDate,
    pub min: f64,
    pub max: f64,
}

impl NavChart {
    /// `None` for an empty series.
    pub fn from_series(series: &NavSeries) -> Option<Self> {
        let start = series.first()?.date;
        let end = series.last()?.date;

        let (min, max) = series
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), point| {
                (min.min(point.value), max.max(point.value))
            });

        Some(Self {
            points: series.points().to_vec(),
            start,
            end,
            min,
            max,
        })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Splits the points into `buckets` consecutive groups and keeps the last
    /// value of each non-empty group, preserving order.
    pub fn downsample(&self, buckets: usize) -> Vec<f64> {
        if buckets == 0 {
            return Vec::new();
        }

        if self.points.len() <= buckets {
            return self.points.iter().map(|point| point.value).collect();
        }

        (0..buckets)
            .filter_map(|bucket| {
                let end = (bucket + 1) * self.points.len() / buckets;
                end.checked_sub(1)
                    .and_then(|index| self.points.get(index))
                    .map(|point| point.value)
            })
            .collect()
    }
}

use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Precision of the dates a source schema carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateGranularity {
    Month,
    Year,
}

impl DateGranularity {
    /// `chrono` pattern used for tooltips and axis labels.
    #[must_use]
    pub fn label_pattern(self) -> &'static str {
        match self {
            Self::Month => "%b %Y",
            Self::Year => "%Y",
        }
    }
}

/// Calendar point with month+year or year-only precision.
///
/// Ordering is chronological; a year-only point sorts before any month of the
/// same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TemporalPoint {
    year: i32,
    month: Option<u32>,
}

impl TemporalPoint {
    pub fn month(year: i32, month: u32) -> ChartResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(ChartError::InvalidData(format!(
                "invalid calendar month {year}-{month}"
            )));
        }
        Ok(Self {
            year,
            month: Some(month),
        })
    }

    pub fn year(year: i32) -> ChartResult<Self> {
        if NaiveDate::from_ymd_opt(year, 1, 1).is_none() {
            return Err(ChartError::InvalidData(format!("invalid calendar year {year}")));
        }
        Ok(Self { year, month: None })
    }

    /// Parses "Month Year" text with a `chrono` pattern such as `%B %Y`.
    ///
    /// Returns `None` for anything that does not resolve to a calendar month.
    #[must_use]
    pub fn parse_month_year(text: &str, pattern: &str) -> Option<Self> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        // chrono needs a day to build a date; pin it to the first.
        let date =
            NaiveDate::parse_from_str(&format!("1 {text}"), &format!("%d {pattern}")).ok()?;
        Some(Self {
            year: date.year(),
            month: Some(date.month()),
        })
    }

    #[must_use]
    pub fn parse_year(text: &str) -> Option<Self> {
        let year = text.trim().parse::<i32>().ok()?;
        Self::year(year).ok()
    }

    #[must_use]
    pub fn year_value(self) -> i32 {
        self.year
    }

    #[must_use]
    pub fn month_value(self) -> Option<u32> {
        self.month
    }

    #[must_use]
    pub fn granularity(self) -> DateGranularity {
        match self.month {
            Some(_) => DateGranularity::Month,
            None => DateGranularity::Year,
        }
    }

    fn first_day(self) -> NaiveDate {
        // Constructors validate the calendar fields, so this cannot fall back
        // for values built through the public API.
        NaiveDate::from_ymd_opt(self.year, self.month.unwrap_or(1), 1).unwrap_or_default()
    }

    /// Unix seconds at midnight UTC on the first day of the period.
    ///
    /// This is the coordinate the time scale works in.
    #[must_use]
    pub fn axis_value(self) -> f64 {
        self.first_day()
            .and_hms_opt(0, 0, 0)
            .map_or(0.0, |dt| dt.and_utc().timestamp() as f64)
    }

    /// Point `count` periods later at this point's own precision.
    #[must_use]
    pub fn advance(self, count: u32) -> Self {
        match self.month {
            Some(month) => {
                let index = i64::from(self.year) * 12 + i64::from(month - 1) + i64::from(count);
                Self {
                    year: index.div_euclid(12) as i32,
                    month: Some(index.rem_euclid(12) as u32 + 1),
                }
            }
            None => Self {
                year: self.year + count as i32,
                month: None,
            },
        }
    }

    /// Formats the point with its own precision (`Jan 2021` or `2021`).
    #[must_use]
    pub fn label(self) -> String {
        self.first_day()
            .format(self.granularity().label_pattern())
            .to_string()
    }
}

impl fmt::Display for TemporalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

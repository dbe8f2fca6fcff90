use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A weekday calendar date on which the market is nominally open.
///
/// Holiday-naive: any Monday–Friday is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct TradingDay(NaiveDate);

impl TradingDay {
    pub fn new(date: NaiveDate) -> Result<Self, String> {
        if !is_weekday(date) {
            return Err(format!("{date} falls on a weekend ({})", date.weekday()));
        }
        Ok(TradingDay(date))
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Compact `YYYYMMDD` key used for cache and report file names.
    pub fn compact(&self) -> String {
        self.0.format("%Y%m%d").to_string()
    }
}

pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

impl TryFrom<NaiveDate> for TradingDay {
    type Error = String;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        TradingDay::new(date)
    }
}

impl From<TradingDay> for NaiveDate {
    fn from(day: TradingDay) -> Self {
        day.0
    }
}

impl fmt::Display for TradingDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for TradingDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map_err(|e| format!("Invalid date '{s}': {e}. Use YYYY-MM-DD"))?;
        TradingDay::new(date)
    }
}

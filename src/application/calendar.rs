//! Trading calendar: maps "the last N sessions" to concrete dates.

use chrono::NaiveDate;

use crate::domain::values::trading_day::{is_weekday, TradingDay};

/// Upper bound on a lookback window, roughly forty years of sessions.
pub const MAX_LOOKBACK_DAYS: usize = 10_000;

/// The `n` most recent weekdays strictly before `reference`, ascending.
///
/// Weekends are skipped; weekday market holidays are not, so a holiday
/// shows up here and later as a failed fetch. The walk stops at the
/// earliest representable date, so an oversized `n` yields fewer days.
pub fn recent_trading_days(n: usize, reference: NaiveDate) -> Vec<TradingDay> {
    let mut days = Vec::new();
    let mut cursor = reference.pred_opt();

    while let Some(current) = cursor {
        if days.len() >= n {
            break;
        }
        if is_weekday(current) {
            if let Ok(day) = TradingDay::new(current) {
                days.push(day);
            }
        }
        cursor = current.pred_opt();
    }

    days.reverse();
    days
}

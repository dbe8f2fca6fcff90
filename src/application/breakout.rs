//! Breakout analyzer: finds symbols whose latest delivery quantity spikes
//! above a multiple of their trailing average.
//!
//! The trailing average for a symbol is the mean of every non-missing
//! delivery quantity in the window, the latest day included. Symbols with
//! no usable quantities get no average and drop out of the join. The latest
//! day's records are then joined to the averages by symbol, filtered with a
//! strict `>` against `threshold_multiple × average`, and ranked by ratio.

use std::collections::HashMap;

use crate::domain::entities::breakout::BreakoutCandidate;
use crate::domain::entities::daily_record::{DailyRecord, DailyRecordSet};
use crate::domain::values::ratio::Ratio;
use crate::domain::values::trading_day::TradingDay;
use crate::domain::values::universe::Universe;

pub const DEFAULT_THRESHOLD_MULTIPLE: f64 = 3.0;

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Mean delivered quantity per symbol over non-missing values.
pub fn average_delivered<'a>(
    records: impl IntoIterator<Item = &'a DailyRecord>,
) -> HashMap<&'a str, f64> {
    let mut acc: HashMap<&str, Accumulator> = HashMap::new();
    for record in records {
        if let Some(qty) = record.delivered_quantity {
            let entry = acc.entry(record.symbol.as_str()).or_default();
            entry.sum += qty;
            entry.count += 1;
        }
    }
    acc.into_iter()
        .filter_map(|(symbol, a)| a.mean().map(|m| (symbol, m)))
        .collect()
}

/// Rank breakout candidates whose spike falls on `latest`. A window with
/// no records for `latest` yields nothing.
pub fn find_breakouts(
    sets: &[DailyRecordSet],
    latest: TradingDay,
    universe: &Universe,
    threshold_multiple: f64,
) -> Vec<BreakoutCandidate> {
    let eligible: Vec<&DailyRecord> = sets
        .iter()
        .flat_map(|s| s.records.iter())
        .filter(|r| universe.contains(&r.symbol))
        .collect();

    let averages = average_delivered(eligible.iter().copied());

    let mut candidates: Vec<BreakoutCandidate> = eligible
        .iter()
        .filter(|r| r.date == latest)
        .filter_map(|r| {
            let qty = r.delivered_quantity?;
            let avg = *averages.get(r.symbol.as_str())?;
            (qty > threshold_multiple * avg).then(|| BreakoutCandidate {
                symbol: r.symbol.clone(),
                latest_delivered_quantity: qty,
                trailing_average_delivered_quantity: avg,
                ratio: Ratio::compute(qty, avg),
            })
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.ratio
            .rank_cmp(&b.ratio)
            .then_with(|| a.symbol.cmp(&b.symbol))
            .then_with(|| {
                b.latest_delivered_quantity
                    .partial_cmp(&a.latest_delivered_quantity)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    });

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: TradingDay, symbol: &str, qty: Option<f64>) -> DailyRecord {
        DailyRecord {
            date,
            symbol: symbol.to_string(),
            delivered_quantity: qty,
            total_traded_quantity: None,
            passthrough: vec![],
        }
    }

    #[test]
    fn test_average_skips_missing() {
        let day: TradingDay = "2024-06-07".parse().unwrap();
        let records = vec![
            record(day, "A", Some(10.0)),
            record(day, "A", None),
            record(day, "A", Some(20.0)),
            record(day, "B", None),
        ];
        let avgs = average_delivered(&records);
        assert_eq!(avgs.get("A"), Some(&15.0));
        assert!(!avgs.contains_key("B"));
    }

    #[test]
    fn test_empty_input() {
        let day: TradingDay = "2024-06-07".parse().unwrap();
        assert!(find_breakouts(&[], day, &Universe::new(["A"]), 3.0).is_empty());
    }

    #[test]
    fn test_latest_missing_quantity_excluded() {
        let d1: TradingDay = "2024-06-06".parse().unwrap();
        let d2: TradingDay = "2024-06-07".parse().unwrap();
        let sets = vec![
            DailyRecordSet::new(d1, vec![], vec![record(d1, "A", Some(10.0))]),
            DailyRecordSet::new(d2, vec![], vec![record(d2, "A", None)]),
        ];
        assert!(find_breakouts(&sets, d2, &Universe::new(["A"]), 3.0).is_empty());
    }

    #[test]
    fn test_stale_spike_ignored_when_latest_day_absent() {
        let d1: TradingDay = "2024-06-05".parse().unwrap();
        let d2: TradingDay = "2024-06-06".parse().unwrap();
        let d3: TradingDay = "2024-06-07".parse().unwrap();
        let sets = vec![
            DailyRecordSet::new(d1, vec![], vec![record(d1, "A", Some(10.0))]),
            DailyRecordSet::new(d2, vec![], vec![record(d2, "A", Some(900.0))]),
        ];
        assert!(find_breakouts(&sets, d3, &Universe::new(["A"]), 1.5).is_empty());
        assert_eq!(find_breakouts(&sets, d2, &Universe::new(["A"]), 1.5).len(), 1);
    }
}

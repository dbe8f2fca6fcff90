use crate::domain::values::ratio::Ratio;
use crate::domain::values::trading_day::TradingDay;
use serde::Serialize;

/// A symbol whose latest delivery quantity exceeded the threshold multiple
/// of its trailing average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BreakoutCandidate {
    pub symbol: String,
    pub latest_delivered_quantity: f64,
    pub trailing_average_delivered_quantity: f64,
    pub ratio: Ratio,
}

/// A ranked candidate list ready for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct BreakoutReport {
    /// The spike day; also names the output file.
    pub latest_day: TradingDay,
    /// How many trading days actually contributed data.
    pub days_with_data: usize,
    pub threshold_multiple: f64,
    pub candidates: Vec<BreakoutCandidate>,
}

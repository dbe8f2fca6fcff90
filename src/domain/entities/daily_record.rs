use crate::domain::values::trading_day::TradingDay;
use serde::Serialize;

/// One symbol's trading record for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    /// Always the date the record was fetched under.
    pub date: TradingDay,
    pub symbol: String,
    /// `DELIV_QTY`; `None` when the raw cell was not a number.
    pub delivered_quantity: Option<f64>,
    /// `TTL_TRD_QNTY`; `None` when the raw cell was not a number.
    pub total_traded_quantity: Option<f64>,
    /// Remaining columns, aligned with [`DailyRecordSet::passthrough_columns`].
    pub passthrough: Vec<String>,
}

/// All records for a single trading day. One cache entry per set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecordSet {
    pub date: TradingDay,
    /// Normalized names of the columns carried through untouched.
    pub passthrough_columns: Vec<String>,
    pub records: Vec<DailyRecord>,
}

impl DailyRecordSet {
    pub fn new(date: TradingDay, passthrough_columns: Vec<String>, records: Vec<DailyRecord>) -> Self {
        Self {
            date,
            passthrough_columns,
            records,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Where a record set came from on this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordSource {
    Cache,
    Provider,
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::Cache => write!(f, "cache"),
            RecordSource::Provider => write!(f, "provider"),
        }
    }
}

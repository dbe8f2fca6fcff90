//! Shared test helpers.
#![allow(dead_code)]

use async_trait::async_trait;
use deliveryscan::config::ScanConfig;
use deliveryscan::domain::entities::raw_table::RawTable;
use deliveryscan::domain::error::DomainError;
use deliveryscan::domain::ports::record_provider::DailyRecordProvider;
use deliveryscan::domain::ports::universe_provider::UniverseProvider;
use deliveryscan::domain::values::trading_day::TradingDay;
use deliveryscan::domain::values::universe::Universe;
use deliveryscan::DeliveryScan;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub fn day(s: &str) -> TradingDay {
    s.parse().unwrap()
}

/// Bhavdata-style table: SYMBOL, SERIES, DELIV_QTY, TTL_TRD_QNTY.
pub fn table(rows: &[(&str, &str)]) -> RawTable {
    RawTable::new(
        vec![
            "SYMBOL".into(),
            " SERIES".into(),
            " DELIV_QTY".into(),
            " TTL_TRD_QNTY".into(),
        ],
        rows.iter()
            .map(|(symbol, qty)| {
                vec![
                    symbol.to_string(),
                    " EQ".to_string(),
                    format!(" {qty}"),
                    " 100000".to_string(),
                ]
            })
            .collect(),
    )
}

pub struct FakeUniverse {
    symbols: Option<Vec<String>>,
}

impl FakeUniverse {
    pub fn new(symbols: &[&str]) -> Self {
        Self {
            symbols: Some(symbols.iter().map(|s| s.to_string()).collect()),
        }
    }

    pub fn unavailable() -> Self {
        Self { symbols: None }
    }
}

#[async_trait]
impl UniverseProvider for FakeUniverse {
    fn name(&self) -> &str {
        "fake_universe"
    }

    async fn fetch_universe(&self) -> Result<Universe, DomainError> {
        match &self.symbols {
            Some(s) => Ok(Universe::new(s)),
            None => Err(DomainError::ProviderUnavailable("offline".into())),
        }
    }
}

/// Serves canned tables by date; unknown dates fail like a 404. Records
/// every request.
#[derive(Default)]
pub struct FakeRecords {
    tables: HashMap<TradingDay, RawTable>,
    calls: Mutex<Vec<TradingDay>>,
}

impl FakeRecords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_day(mut self, date: TradingDay, table: RawTable) -> Self {
        self.tables.insert(date, table);
        self
    }

    pub fn calls(&self) -> Vec<TradingDay> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DailyRecordProvider for FakeRecords {
    fn name(&self) -> &str {
        "fake_records"
    }

    async fn fetch_day(&self, date: TradingDay) -> Result<RawTable, DomainError> {
        self.calls.lock().unwrap().push(date);
        self.tables
            .get(&date)
            .cloned()
            .ok_or_else(|| DomainError::fetch_failed(date.date(), "HTTP 404"))
    }
}

pub fn test_config(data_dir: &Path, lookback_days: usize) -> ScanConfig {
    ScanConfig {
        data_dir: data_dir.to_path_buf(),
        lookback_days,
        request_delay_ms: 0,
        hyperlinks: false,
        ..ScanConfig::default()
    }
}

pub fn setup(
    data_dir: &Path,
    lookback_days: usize,
    universe: FakeUniverse,
    records: Arc<FakeRecords>,
) -> DeliveryScan {
    DeliveryScan::with_providers(test_config(data_dir, lookback_days), Arc::new(universe), records)
        .unwrap()
}

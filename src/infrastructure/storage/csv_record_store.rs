//! Per-day CSV record store.
//!
//! Layout: `{dir}/{YYYYMMDD}.csv`, one file per trading day, with columns
//! `DATE, SYMBOL, DELIV_QTY, TTL_TRD_QNTY` followed by the passthrough
//! columns in their original order. Missing quantities are empty cells.
//!
//! Writes are atomic (write `.tmp`, rename into place) and an existing entry
//! is never overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::application::normalize::{
    parse_quantity, DATE_COLUMN, DELIVERED_COLUMN, SYMBOL_COLUMN, TRADED_COLUMN,
};
use crate::domain::entities::daily_record::{DailyRecord, DailyRecordSet};
use crate::domain::error::DomainError;
use crate::domain::ports::record_store::RecordStore;
use crate::domain::values::trading_day::TradingDay;

const FIXED_COLUMNS: [&str; 4] = [DATE_COLUMN, SYMBOL_COLUMN, DELIVERED_COLUMN, TRADED_COLUMN];

pub struct CsvRecordStore {
    dir: PathBuf,
}

impl CsvRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, date: TradingDay) -> PathBuf {
        self.dir.join(format!("{}.csv", date.compact()))
    }

    fn encode(set: &DailyRecordSet) -> Result<Vec<u8>, DomainError> {
        let err = |e: csv::Error| DomainError::Cache(format!("CSV encode: {e}"));
        let mut wtr = csv::Writer::from_writer(vec![]);

        let mut header: Vec<&str> = FIXED_COLUMNS.to_vec();
        header.extend(set.passthrough_columns.iter().map(String::as_str));
        wtr.write_record(&header).map_err(err)?;

        for r in &set.records {
            let mut row = vec![
                r.date.to_string(),
                r.symbol.clone(),
                format_quantity(r.delivered_quantity),
                format_quantity(r.total_traded_quantity),
            ];
            row.extend(r.passthrough.iter().cloned());
            wtr.write_record(&row).map_err(err)?;
        }

        wtr.into_inner()
            .map_err(|e| DomainError::Cache(format!("CSV flush: {e}")))
    }

    fn decode(date: TradingDay, path: &Path) -> Result<DailyRecordSet, DomainError> {
        let err = |e: csv::Error| DomainError::Cache(format!("{}: {e}", path.display()));
        let mut rdr = csv::Reader::from_path(path).map_err(err)?;

        let headers: Vec<String> = rdr.headers().map_err(err)?.iter().map(String::from).collect();
        let fixed: Vec<usize> = FIXED_COLUMNS
            .iter()
            .map(|name| {
                headers.iter().position(|h| h == name).ok_or_else(|| {
                    DomainError::Cache(format!("{}: missing {name} column", path.display()))
                })
            })
            .collect::<Result<_, _>>()?;
        let passthrough_idx: Vec<usize> = (0..headers.len()).filter(|i| !fixed.contains(i)).collect();

        let mut records = Vec::new();
        for row in rdr.records() {
            let row = row.map_err(err)?;
            let cell = |i: usize| row.get(i).unwrap_or("");

            let stored = cell(fixed[0]);
            let record_date = NaiveDate::parse_from_str(stored, "%Y-%m-%d")
                .map_err(|e| DomainError::Cache(format!("bad DATE '{stored}': {e}")))
                .and_then(|d| TradingDay::new(d).map_err(DomainError::Cache))?;
            if record_date != date {
                return Err(DomainError::Cache(format!(
                    "{}: row dated {record_date}, expected {date}",
                    path.display()
                )));
            }

            records.push(DailyRecord {
                date: record_date,
                symbol: cell(fixed[1]).to_string(),
                delivered_quantity: parse_quantity(cell(fixed[2])),
                total_traded_quantity: parse_quantity(cell(fixed[3])),
                passthrough: passthrough_idx.iter().map(|i| cell(*i).to_string()).collect(),
            });
        }

        let passthrough_columns = passthrough_idx.iter().map(|i| headers[*i].clone()).collect();
        Ok(DailyRecordSet::new(date, passthrough_columns, records))
    }
}

fn format_quantity(q: Option<f64>) -> String {
    q.map(|v| v.to_string()).unwrap_or_default()
}

impl RecordStore for CsvRecordStore {
    fn load(&self, date: TradingDay) -> Result<Option<DailyRecordSet>, DomainError> {
        let path = self.path_for(date);
        if !path.exists() {
            return Ok(None);
        }
        Self::decode(date, &path).map(Some)
    }

    fn save(&self, set: &DailyRecordSet) -> Result<(), DomainError> {
        let path = self.path_for(set.date);
        if path.exists() {
            tracing::debug!(path = %path.display(), "cache entry exists, not overwriting");
            return Ok(());
        }

        fs::create_dir_all(&self.dir)
            .map_err(|e| DomainError::Cache(format!("failed to create dir: {e}")))?;

        let bytes = Self::encode(set)?;
        let tmp_path = path.with_extension("csv.tmp");
        fs::write(&tmp_path, bytes)
            .map_err(|e| DomainError::Cache(format!("write {}: {e}", tmp_path.display())))?;

        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DomainError::Cache(format!("atomic rename failed: {e}"))
        })
    }
}

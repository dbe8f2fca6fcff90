//! Normalization of raw provider tables into typed daily records.
//!
//! Header names are trimmed, uppercased and have spaces replaced with
//! underscores. The two quantity columns are coerced to numbers; any cell
//! that is not a finite non-negative number becomes `None`. Every record is
//! stamped with the requested date, and a raw `DATE` column is dropped in
//! favour of the stamp.

use crate::domain::entities::daily_record::{DailyRecord, DailyRecordSet};
use crate::domain::entities::raw_table::RawTable;
use crate::domain::error::DomainError;
use crate::domain::values::trading_day::TradingDay;

pub const DATE_COLUMN: &str = "DATE";
pub const SYMBOL_COLUMN: &str = "SYMBOL";
pub const DELIVERED_COLUMN: &str = "DELIV_QTY";
pub const TRADED_COLUMN: &str = "TTL_TRD_QNTY";

pub fn normalize_header(header: &str) -> String {
    header.trim().to_uppercase().replace(' ', "_")
}

/// Parse a quantity cell. Blank, `-`, `N/A` and other junk map to `None`.
pub fn parse_quantity(cell: &str) -> Option<f64> {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Convert a raw table fetched for `date` into a normalized record set.
pub fn normalize_table(date: TradingDay, table: &RawTable) -> Result<DailyRecordSet, DomainError> {
    let headers: Vec<String> = table.headers.iter().map(|h| normalize_header(h)).collect();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| DomainError::fetch_failed(date.date(), format!("missing {name} column")))
    };
    let symbol_idx = column(SYMBOL_COLUMN)?;
    let delivered_idx = column(DELIVERED_COLUMN)?;
    let traded_idx = column(TRADED_COLUMN)?;

    let passthrough_idx: Vec<usize> = (0..headers.len())
        .filter(|i| {
            ![symbol_idx, delivered_idx, traded_idx].contains(i) && headers[*i] != DATE_COLUMN
        })
        .collect();
    let passthrough_columns = passthrough_idx.iter().map(|i| headers[*i].clone()).collect();

    let records = table
        .rows
        .iter()
        .filter_map(|row| {
            let cell = |i: usize| row.get(i).map(|c| c.trim()).unwrap_or("");
            let symbol = cell(symbol_idx);
            if symbol.is_empty() {
                return None;
            }
            Some(DailyRecord {
                date,
                symbol: symbol.to_string(),
                delivered_quantity: parse_quantity(cell(delivered_idx)),
                total_traded_quantity: parse_quantity(cell(traded_idx)),
                passthrough: passthrough_idx.iter().map(|i| cell(*i).to_string()).collect(),
            })
        })
        .collect();

    Ok(DailyRecordSet::new(date, passthrough_columns, records))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> TradingDay {
        "2024-06-07".parse().unwrap()
    }

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header(" deliv qty "), "DELIV_QTY");
        assert_eq!(normalize_header("TTL_TRD_QNTY"), "TTL_TRD_QNTY");
    }

    #[test]
    fn test_parse_quantity_junk_is_missing() {
        assert_eq!(parse_quantity(" 1200 "), Some(1200.0));
        assert_eq!(parse_quantity("N/A"), None);
        assert_eq!(parse_quantity(""), None);
        assert_eq!(parse_quantity(" -"), None);
        assert_eq!(parse_quantity("-5"), None);
        assert_eq!(parse_quantity("NaN"), None);
    }

    #[test]
    fn test_normalizes_headers_and_values() {
        let raw = table(
            &["Symbol", " Series", "Deliv Qty", " TTL_TRD_QNTY"],
            &[&["ABC", " EQ", " 500", "1000"], &["XYZ", " EQ", "N/A", ""]],
        );
        let set = normalize_table(day(), &raw).unwrap();
        assert_eq!(set.passthrough_columns, vec!["SERIES".to_string()]);
        assert_eq!(set.records.len(), 2);
        assert_eq!(set.records[0].delivered_quantity, Some(500.0));
        assert_eq!(set.records[0].passthrough, vec!["EQ".to_string()]);
        assert_eq!(set.records[1].delivered_quantity, None);
        assert_eq!(set.records[1].total_traded_quantity, None);
    }

    #[test]
    fn test_requested_date_overrides_payload_date() {
        let raw = table(
            &["SYMBOL", "DATE", "DELIV_QTY", "TTL_TRD_QNTY"],
            &[&["ABC", "1999-01-01", "1", "2"]],
        );
        let set = normalize_table(day(), &raw).unwrap();
        assert_eq!(set.records[0].date, day());
        assert!(set.passthrough_columns.is_empty());
    }

    #[test]
    fn test_missing_required_column_fails_for_date() {
        let raw = table(&["SYMBOL", "TTL_TRD_QNTY"], &[&["ABC", "1"]]);
        let err = normalize_table(day(), &raw).unwrap_err();
        assert!(matches!(err, DomainError::FetchFailed { .. }));
    }

    #[test]
    fn test_blank_symbol_rows_skipped() {
        let raw = table(
            &["SYMBOL", "DELIV_QTY", "TTL_TRD_QNTY"],
            &[&["", "1", "2"], &["ABC", "3"]],
        );
        let set = normalize_table(day(), &raw).unwrap();
        assert_eq!(set.records.len(), 1);
        assert_eq!(set.records[0].total_traded_quantity, None);
    }
}

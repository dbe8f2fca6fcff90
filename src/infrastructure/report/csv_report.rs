//! CSV breakout report.
//!
//! Written to `{dir}/del_breakout_{YYYYMMDD}.csv`, named after the spike
//! day. The symbol column can be rendered as a spreadsheet `HYPERLINK`
//! formula pointing at a charting page.

use std::fs;
use std::path::PathBuf;

use crate::domain::entities::breakout::{BreakoutCandidate, BreakoutReport};
use crate::domain::error::DomainError;
use crate::domain::ports::report_sink::ReportSink;
use crate::domain::values::trading_day::TradingDay;

pub const TRADINGVIEW_CHART_BASE: &str = "https://www.tradingview.com/chart/?symbol=NSE:";

pub struct CsvReportSink {
    dir: PathBuf,
    /// Prefix for chart links; `None` writes plain symbols.
    chart_url_base: Option<String>,
}

impl CsvReportSink {
    pub fn new(dir: impl Into<PathBuf>, chart_url_base: Option<String>) -> Self {
        Self {
            dir: dir.into(),
            chart_url_base,
        }
    }

    pub fn path_for(&self, latest_day: TradingDay) -> PathBuf {
        self.dir
            .join(format!("del_breakout_{}.csv", latest_day.compact()))
    }

    fn symbol_cell(&self, symbol: &str) -> String {
        match &self.chart_url_base {
            Some(base) => format!("=HYPERLINK(\"{base}{symbol}\", \"{symbol}\")"),
            None => symbol.to_string(),
        }
    }

    pub fn render_csv(&self, report: &BreakoutReport) -> Result<String, DomainError> {
        let err = |e: csv::Error| DomainError::Report(e.to_string());
        let mut wtr = csv::Writer::from_writer(vec![]);

        let avg_header = format!("AVG_{}_DELIV_QTY", report.days_with_data);
        wtr.write_record(["SYMBOL", "DELIV_QTY", avg_header.as_str(), "RATIO"])
            .map_err(err)?;

        for c in &report.candidates {
            wtr.write_record(self.row(c)).map_err(err)?;
        }

        let data = wtr
            .into_inner()
            .map_err(|e| DomainError::Report(format!("CSV flush: {e}")))?;
        String::from_utf8(data).map_err(|e| DomainError::Report(e.to_string()))
    }

    fn row(&self, c: &BreakoutCandidate) -> [String; 4] {
        [
            self.symbol_cell(&c.symbol),
            c.latest_delivered_quantity.to_string(),
            format!("{:.2}", c.trailing_average_delivered_quantity),
            c.ratio.to_string(),
        ]
    }
}

impl ReportSink for CsvReportSink {
    fn render(&self, report: &BreakoutReport) -> Result<PathBuf, DomainError> {
        if report.candidates.is_empty() {
            return Err(DomainError::Report("refusing to write an empty report".into()));
        }

        let csv = self.render_csv(report)?;
        fs::create_dir_all(&self.dir)
            .map_err(|e| DomainError::Report(format!("failed to create dir: {e}")))?;

        let path = self.path_for(report.latest_day);
        let tmp_path = path.with_extension("csv.tmp");
        fs::write(&tmp_path, csv)
            .map_err(|e| DomainError::Report(format!("write {}: {e}", tmp_path.display())))?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            DomainError::Report(format!("atomic rename failed: {e}"))
        })?;

        Ok(path)
    }
}

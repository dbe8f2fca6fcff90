//! Scan use case. A full run fetches the universe, picks the calendar days,
//! loads per-day records, analyzes breakouts and writes the report.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;

use crate::application::breakout::find_breakouts;
use crate::application::calendar::{recent_trading_days, MAX_LOOKBACK_DAYS};
use crate::application::record_cache::DailyRecordCache;
use crate::domain::entities::breakout::BreakoutReport;
use crate::domain::entities::daily_record::{DailyRecordSet, RecordSource};
use crate::domain::error::DomainError;
use crate::domain::ports::report_sink::ReportSink;
use crate::domain::ports::universe_provider::UniverseProvider;
use crate::domain::values::trading_day::TradingDay;

/// Parameters of a single scan.
#[derive(Debug, Clone)]
pub struct ScanParams {
    pub reference_date: NaiveDate,
    pub lookback_days: usize,
    pub threshold_multiple: f64,
}

/// How a scan ended.
#[derive(Debug, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ScanOutcome {
    /// None of the requested days produced data.
    NoData { requested_days: usize },
    /// Data was assembled but nothing crossed the threshold.
    NoBreakouts {
        latest_day: TradingDay,
        days_with_data: usize,
        universe_size: usize,
    },
    /// A report was written.
    Reported { path: PathBuf, report: BreakoutReport },
}

pub struct ScanUseCase {
    universe_provider: Arc<dyn UniverseProvider>,
    cache: Arc<DailyRecordCache>,
    sink: Arc<dyn ReportSink>,
    request_delay: Duration,
}

impl ScanUseCase {
    pub fn new(
        universe_provider: Arc<dyn UniverseProvider>,
        cache: Arc<DailyRecordCache>,
        sink: Arc<dyn ReportSink>,
        request_delay: Duration,
    ) -> Self {
        Self {
            universe_provider,
            cache,
            sink,
            request_delay,
        }
    }

    pub async fn execute(&self, params: &ScanParams) -> Result<ScanOutcome, DomainError> {
        if params.lookback_days == 0 || params.lookback_days > MAX_LOOKBACK_DAYS {
            return Err(DomainError::InvalidInput(format!(
                "lookback must be between 1 and {MAX_LOOKBACK_DAYS} trading days, got {}",
                params.lookback_days
            )));
        }
        if params.threshold_multiple.is_nan() || params.threshold_multiple <= 0.0 {
            return Err(DomainError::InvalidInput(format!(
                "threshold multiple must be positive, got {}",
                params.threshold_multiple
            )));
        }

        let universe = self.universe_provider.fetch_universe().await?;
        tracing::info!(
            provider = self.universe_provider.name(),
            symbols = universe.len(),
            "universe loaded"
        );

        let days = recent_trading_days(params.lookback_days, params.reference_date);
        let Some(&latest) = days.last() else {
            return Ok(ScanOutcome::NoData { requested_days: 0 });
        };
        let sets = self.collect(&days).await;

        if sets.is_empty() {
            return Ok(ScanOutcome::NoData {
                requested_days: days.len(),
            });
        }
        if !sets.iter().any(|s| s.date == latest) {
            tracing::warn!(date = %latest, "no data for the most recent trading day");
        }
        if sets.len() < days.len() {
            tracing::warn!(
                requested = days.len(),
                available = sets.len(),
                "trailing average covers fewer sessions than requested"
            );
        }

        let candidates = find_breakouts(&sets, latest, &universe, params.threshold_multiple);
        if candidates.is_empty() {
            return Ok(ScanOutcome::NoBreakouts {
                latest_day: latest,
                days_with_data: sets.len(),
                universe_size: universe.len(),
            });
        }

        let report = BreakoutReport {
            latest_day: latest,
            days_with_data: sets.len(),
            threshold_multiple: params.threshold_multiple,
            candidates,
        };
        let path = self.sink.render(&report)?;
        tracing::info!(path = %path.display(), candidates = report.candidates.len(), "report saved");

        Ok(ScanOutcome::Reported { path, report })
    }

    /// Fetch every day in order, one at a time. Failed days are skipped.
    async fn collect(&self, days: &[TradingDay]) -> Vec<DailyRecordSet> {
        let mut sets = Vec::with_capacity(days.len());
        for day in days {
            match self.cache.get_records(*day).await {
                Ok((set, source)) => {
                    sets.push(set);
                    if source == RecordSource::Provider && !self.request_delay.is_zero() {
                        tokio::time::sleep(self.request_delay).await;
                    }
                }
                Err(e) => {
                    tracing::warn!(date = %day, error = %e, "skipping date");
                }
            }
        }
        sets
    }
}

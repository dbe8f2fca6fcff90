//! Daily record cache: serves a day's records from the local store, or
//! fetches, normalizes and persists them on first request.

use std::sync::Arc;

use crate::application::normalize::normalize_table;
use crate::domain::entities::daily_record::{DailyRecordSet, RecordSource};
use crate::domain::error::DomainError;
use crate::domain::ports::record_provider::DailyRecordProvider;
use crate::domain::ports::record_store::RecordStore;
use crate::domain::values::trading_day::TradingDay;

pub struct DailyRecordCache {
    store: Arc<dyn RecordStore>,
    provider: Arc<dyn DailyRecordProvider>,
}

impl DailyRecordCache {
    pub fn new(store: Arc<dyn RecordStore>, provider: Arc<dyn DailyRecordProvider>) -> Self {
        Self { store, provider }
    }

    /// Records for `date` and where they came from.
    ///
    /// A stored entry is returned as-is and never refreshed. On a miss the
    /// provider is asked exactly once; a failed fetch leaves nothing behind
    /// so the next run tries again.
    pub async fn get_records(
        &self,
        date: TradingDay,
    ) -> Result<(DailyRecordSet, RecordSource), DomainError> {
        if let Some(set) = self.store.load(date)? {
            tracing::info!(%date, records = set.len(), "loaded from disk");
            return Ok((set, RecordSource::Cache));
        }

        tracing::info!(%date, provider = self.provider.name(), "downloading");
        let raw = self.provider.fetch_day(date).await?;
        let set = normalize_table(date, &raw)?;

        // Not fatal: an unsaved date is downloaded again next run.
        if let Err(e) = self.store.save(&set) {
            tracing::warn!(%date, error = %e, "failed to persist records");
        }

        Ok((set, RecordSource::Provider))
    }
}

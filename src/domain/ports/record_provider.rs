use async_trait::async_trait;

use crate::domain::entities::raw_table::RawTable;
use crate::domain::error::DomainError;
use crate::domain::values::trading_day::TradingDay;

/// Remote source of full-day per-symbol trading data.
#[async_trait]
pub trait DailyRecordProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch the raw table for exactly `date`. Any failure is reported as
    /// [`DomainError::FetchFailed`] for that date alone.
    async fn fetch_day(&self, date: TradingDay) -> Result<RawTable, DomainError>;
}

use crate::domain::entities::daily_record::DailyRecordSet;
use crate::domain::error::DomainError;
use crate::domain::values::trading_day::TradingDay;

/// Persistent per-day record storage. Entries are written once and never
/// updated.
pub trait RecordStore: Send + Sync {
    /// `Ok(None)` when nothing is stored for `date`.
    fn load(&self, date: TradingDay) -> Result<Option<DailyRecordSet>, DomainError>;

    /// Persist a complete set. Must be atomic: readers see either the whole
    /// entry or none of it.
    fn save(&self, set: &DailyRecordSet) -> Result<(), DomainError>;
}

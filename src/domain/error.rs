use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Fetch failed for {date}: {reason}")]
    FetchFailed { date: NaiveDate, reason: String },

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Report error: {0}")]
    Report(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl DomainError {
    pub fn fetch_failed(date: NaiveDate, reason: impl Into<String>) -> Self {
        DomainError::FetchFailed {
            date,
            reason: reason.into(),
        }
    }
}

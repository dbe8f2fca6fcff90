use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::entities::raw_table::RawTable;
use crate::domain::error::DomainError;
use crate::domain::ports::provider_session::SessionFactory;
use crate::domain::ports::record_provider::DailyRecordProvider;
use crate::domain::values::trading_day::TradingDay;
use crate::infrastructure::feeds::tabular::parse_csv_table;

pub const BHAVDATA_BASE_URL: &str = "https://archives.nseindia.com/products/content";

/// NSE full bhavcopy with delivery data (`sec_bhavdata_full_DDMMYYYY.csv`).
pub struct NseBhavdataProvider {
    sessions: Arc<dyn SessionFactory>,
    base_url: String,
}

impl NseBhavdataProvider {
    pub fn new(sessions: Arc<dyn SessionFactory>, base_url: impl Into<String>) -> Self {
        Self {
            sessions,
            base_url: base_url.into(),
        }
    }

    pub fn url_for(&self, date: TradingDay) -> String {
        format!(
            "{}/sec_bhavdata_full_{}.csv",
            self.base_url.trim_end_matches('/'),
            date.date().format("%d%m%Y")
        )
    }
}

#[async_trait]
impl DailyRecordProvider for NseBhavdataProvider {
    fn name(&self) -> &str {
        "nse_bhavdata"
    }

    async fn fetch_day(&self, date: TradingDay) -> Result<RawTable, DomainError> {
        let failed = |reason: String| DomainError::fetch_failed(date.date(), reason);

        // Every date gets its own session and handshake.
        let session = self.sessions.open().map_err(|e| failed(e.to_string()))?;
        session.establish().await.map_err(|e| failed(e.to_string()))?;
        let payload = session
            .fetch(&self.url_for(date))
            .await
            .map_err(|e| failed(e.to_string()))?;

        if !payload.is_success() {
            return Err(failed(format!("HTTP {}", payload.status)));
        }

        parse_csv_table(&payload.body).map_err(|e| failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::feeds::testing::StaticSessionFactory;

    fn day() -> TradingDay {
        "2024-06-07".parse().unwrap()
    }

    #[test]
    fn test_url_uses_ddmmyyyy() {
        let p = NseBhavdataProvider::new(
            Arc::new(StaticSessionFactory::new(200, "")),
            BHAVDATA_BASE_URL,
        );
        assert_eq!(
            p.url_for(day()),
            "https://archives.nseindia.com/products/content/sec_bhavdata_full_07062024.csv"
        );
    }

    #[tokio::test]
    async fn test_not_found_is_fetch_failed() {
        let p = NseBhavdataProvider::new(
            Arc::new(StaticSessionFactory::new(404, "Not Found")),
            "https://example.test",
        );
        match p.fetch_day(day()).await {
            Err(DomainError::FetchFailed { date, reason }) => {
                assert_eq!(date, day().date());
                assert!(reason.contains("404"));
            }
            other => panic!("expected FetchFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_success_returns_table() {
        let factory = Arc::new(StaticSessionFactory::new(
            200,
            "SYMBOL,DELIV_QTY,TTL_TRD_QNTY\nABC,10,20\n",
        ));
        let p = NseBhavdataProvider::new(factory.clone(), "https://example.test");
        let table = p.fetch_day(day()).await.unwrap();
        assert_eq!(table.rows, vec![vec!["ABC", "10", "20"]]);
        assert_eq!(factory.establish_count(), 1);
    }
}

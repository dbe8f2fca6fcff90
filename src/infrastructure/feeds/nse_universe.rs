use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::ports::provider_session::SessionFactory;
use crate::domain::ports::universe_provider::UniverseProvider;
use crate::domain::values::universe::Universe;
use crate::infrastructure::feeds::tabular::parse_csv_table;

pub const NIFTY_500_URL: &str = "https://archives.nseindia.com/content/indices/ind_nifty500list.csv";

/// Index constituent list published as CSV on the NSE archives.
pub struct NseUniverseProvider {
    sessions: Arc<dyn SessionFactory>,
    url: String,
}

impl NseUniverseProvider {
    pub fn new(sessions: Arc<dyn SessionFactory>, url: impl Into<String>) -> Self {
        Self {
            sessions,
            url: url.into(),
        }
    }

    pub fn nifty_500(sessions: Arc<dyn SessionFactory>) -> Self {
        Self::new(sessions, NIFTY_500_URL)
    }
}

#[async_trait]
impl UniverseProvider for NseUniverseProvider {
    fn name(&self) -> &str {
        "nse_index_list"
    }

    async fn fetch_universe(&self) -> Result<Universe, DomainError> {
        let unavailable = |msg: String| DomainError::ProviderUnavailable(msg);

        let session = self.sessions.open()?;
        session.establish().await?;
        let payload = session.fetch(&self.url).await?;

        if !payload.is_success() {
            return Err(unavailable(format!(
                "index list returned HTTP {}",
                payload.status
            )));
        }

        let table = parse_csv_table(&payload.body).map_err(|e| unavailable(e.to_string()))?;
        let idx = table
            .find_column("SYMBOL")
            .ok_or_else(|| unavailable("index list has no SYMBOL column".into()))?;

        let universe = Universe::new(table.rows.iter().filter_map(|row| row.get(idx)));
        if universe.is_empty() {
            return Err(unavailable("index list contains no symbols".into()));
        }
        Ok(universe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::feeds::testing::StaticSessionFactory;

    fn provider(status: u16, body: &str) -> (NseUniverseProvider, Arc<StaticSessionFactory>) {
        let factory = Arc::new(StaticSessionFactory::new(status, body));
        (
            NseUniverseProvider::new(factory.clone(), "https://example.test/list.csv"),
            factory,
        )
    }

    #[tokio::test]
    async fn test_symbol_column_found_case_insensitively() {
        let (p, factory) = provider(
            200,
            "Company Name,Industry, symbol ,Series\nReliance,Energy,RELIANCE,EQ\nTCS,IT,TCS,EQ\n",
        );
        let universe = p.fetch_universe().await.unwrap();
        assert_eq!(universe.len(), 2);
        assert!(universe.contains("RELIANCE"));
        assert_eq!(factory.establish_count(), 1);
        assert_eq!(factory.fetched_urls(), vec!["https://example.test/list.csv"]);
    }

    #[tokio::test]
    async fn test_http_failure_is_provider_unavailable() {
        let (p, _) = provider(503, "");
        let err = p.fetch_universe().await.unwrap_err();
        assert!(matches!(err, DomainError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_missing_symbol_column() {
        let (p, _) = provider(200, "Company Name,Industry\nReliance,Energy\n");
        let err = p.fetch_universe().await.unwrap_err();
        assert!(matches!(err, DomainError::ProviderUnavailable(_)));
    }
}

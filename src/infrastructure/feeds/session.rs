use std::time::Duration;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::ports::provider_session::{FetchedPayload, ProviderSession, SessionFactory};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                          AppleWebKit/537.36 (KHTML, like Gecko) \
                          Chrome/120.0.0.0 Safari/537.36";

/// Cookie-carrying HTTP session that visits the NSE landing page before
/// any archive request.
pub struct NseSession {
    client: reqwest::Client,
    landing_url: String,
    delay: Duration,
}

impl NseSession {
    pub fn new(landing_url: &str, delay: Duration, timeout: Duration) -> Result<Self, DomainError> {
        let mut headers = reqwest::header::HeaderMap::new();
        let referer = format!("{}/", landing_url.trim_end_matches('/'));
        headers.insert(
            reqwest::header::REFERER,
            reqwest::header::HeaderValue::from_str(&referer)
                .map_err(|e| DomainError::InvalidInput(format!("bad landing url: {e}")))?,
        );

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::ProviderUnavailable(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            landing_url: landing_url.to_string(),
            delay,
        })
    }
}

#[async_trait]
impl ProviderSession for NseSession {
    async fn establish(&self) -> Result<(), DomainError> {
        tracing::debug!(url = %self.landing_url, "priming session");
        // Only the cookies matter; the landing page status is ignored.
        self.client
            .get(&self.landing_url)
            .send()
            .await
            .map_err(|e| DomainError::ProviderUnavailable(e.to_string()))?;

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(())
    }

    async fn fetch(&self, url: &str) -> Result<FetchedPayload, DomainError> {
        tracing::debug!(%url, "fetching");
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::ProviderUnavailable(e.to_string()))?;

        let status = resp.status().as_u16();
        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::ProviderUnavailable(e.to_string()))?;

        Ok(FetchedPayload { status, body })
    }
}

/// Opens a fresh [`NseSession`] per provider request.
pub struct NseSessionFactory {
    landing_url: String,
    delay: Duration,
    timeout: Duration,
}

impl NseSessionFactory {
    pub fn new(landing_url: impl Into<String>, delay: Duration) -> Self {
        Self {
            landing_url: landing_url.into(),
            delay,
            timeout: Duration::from_secs(30),
        }
    }
}

impl SessionFactory for NseSessionFactory {
    fn open(&self) -> Result<Box<dyn ProviderSession>, DomainError> {
        Ok(Box::new(NseSession::new(
            &self.landing_url,
            self.delay,
            self.timeout,
        )?))
    }
}

//! Provider session port: the handshake a remote data source demands
//! before it will serve a resource.
//!
//! The NSE archives reject requests that do not carry cookies from a prior
//! visit to the landing page. That requirement is modelled as two steps:
//! [`ProviderSession::establish`] followed by any number of
//! [`ProviderSession::fetch`] calls. Swapping the handshake strategy only
//! needs a new [`SessionFactory`].

use async_trait::async_trait;

use crate::domain::error::DomainError;

/// Raw response to a scoped fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPayload {
    pub status: u16,
    pub body: String,
}

impl FetchedPayload {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait ProviderSession: Send + Sync {
    /// Prime the session (cookies, headers) and wait out the courtesy delay.
    async fn establish(&self) -> Result<(), DomainError>;

    /// Fetch one resource within the established session.
    ///
    /// Non-success HTTP statuses are returned as payloads, not errors;
    /// `Err` means the request could not be completed at all.
    async fn fetch(&self, url: &str) -> Result<FetchedPayload, DomainError>;
}

/// Opens fresh sessions. Each provider request gets its own session.
pub trait SessionFactory: Send + Sync {
    fn open(&self) -> Result<Box<dyn ProviderSession>, DomainError>;
}

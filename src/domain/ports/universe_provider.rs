use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::values::universe::Universe;

/// Source of the index constituent list.
#[async_trait]
pub trait UniverseProvider: Send + Sync {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Fetch the current constituents. Fails with
    /// [`DomainError::ProviderUnavailable`] when the source is unreachable
    /// or its payload cannot be read.
    async fn fetch_universe(&self) -> Result<Universe, DomainError>;
}

//! Trait abstraction for the HTTP client to enable mocking in tests

use super::client::ClientError;
use crate::state::{FormInput, OptionCatalog, Record};
use async_trait::async_trait;

/// Outbound operations against the configured endpoints
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// One best-effort read of the reference data
    async fn fetch_catalog(&self) -> Result<OptionCatalog, ClientError>;

    /// POST a validated form input; the echoed/augmented response body
    /// becomes the stored record
    async fn submit(&self, input: &FormInput) -> Result<Record, ClientError>;
}

//! Persistence collaborator
//!
//! The store talks to its backend through [`PersistenceApi`]; the real I/O
//! boundary (network or filesystem) lives behind these three operations.
//! [`FakeApi`] is the simulated backend: it validates inputs, serves the
//! built-in seed set, and sleeps a configurable fake latency to stand in
//! for real round-trips.

use std::time::Duration;

use thiserror::Error;

use crate::core::instance::{Instance, fake_instances};
use crate::core::schema::{self, InstanceDraft, SchemaError};

/// Failure surfaced by the persistence backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("rejected by backend: {0}")]
    Rejected(#[from] SchemaError),
    #[error("backend unavailable: {0}")]
    Unavailable(String),
}

/// The three operations the store needs from a backend.
///
/// Returned drafts are untrusted: callers validate element-wise before
/// accepting a batch.
pub trait PersistenceApi {
    async fn save_instance(&self, instance: &Instance) -> Result<(), ApiError>;
    async fn load_instances(&self) -> Result<Vec<InstanceDraft>, ApiError>;
    async fn delete_instance(&self, name: &str) -> Result<(), ApiError>;
}

/// Simulated backend. Replace with a real implementation once one exists.
#[derive(Debug, Clone)]
pub struct FakeApi {
    latency: Duration,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            latency: Duration::from_millis(75),
        }
    }

    /// Zero this out in tests.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    async fn round_trip(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl PersistenceApi for FakeApi {
    async fn save_instance(&self, instance: &Instance) -> Result<(), ApiError> {
        self.round_trip().await;
        // A real backend would reject malformed payloads; mirror that here.
        schema::parse_instance(&InstanceDraft::from(instance))?;
        tracing::debug!("saved instance '{}'", instance.name);
        Ok(())
    }

    async fn load_instances(&self) -> Result<Vec<InstanceDraft>, ApiError> {
        self.round_trip().await;
        Ok(fake_instances().iter().map(InstanceDraft::from).collect())
    }

    async fn delete_instance(&self, name: &str) -> Result<(), ApiError> {
        self.round_trip().await;
        schema::validate_name(name)?;
        tracing::debug!("deleted instance '{}'", name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api() -> FakeApi {
        FakeApi::with_latency(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_load_serves_seed_drafts() {
        let drafts = api().load_instances().await.unwrap();
        assert_eq!(drafts.len(), 4);
        assert_eq!(drafts[0].name, "Vanilla 1.20.4");
    }

    #[tokio::test]
    async fn test_delete_rejects_empty_name() {
        assert!(api().delete_instance("").await.is_err());
        assert!(api().delete_instance("Vanilla 1.20.4").await.is_ok());
    }

    #[tokio::test]
    async fn test_save_accepts_seed_instances() {
        for instance in fake_instances() {
            api().save_instance(&instance).await.unwrap();
        }
    }
}

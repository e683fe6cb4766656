//! Incident Store Port - Interface for the relational record store.
//!
//! The analysis flow reads an incident's message, waits on the inference
//! service, then writes the verdict back. All of that happens on one
//! connection held by an [`IncidentUnitOfWork`].
//!
//! # Release guarantee
//!
//! A unit of work owns its connection. Dropping it without calling
//! [`IncidentUnitOfWork::commit`] rolls back any pending write and hands the
//! connection back to the pool, so every early return in a handler releases
//! the connection without extra cleanup code.

use async_trait::async_trait;

use crate::domain::incident::{ClassificationResult, Incident, IncidentId};

/// Port for opening units of work and running read-only queries.
#[async_trait]
pub trait IncidentStore: Send + Sync {
    /// Acquires a connection and starts a unit of work on it.
    async fn begin(&self) -> Result<Box<dyn IncidentUnitOfWork>, StoreError>;

    /// Latest incidents, newest first.
    async fn list_recent(&self, limit: u32) -> Result<Vec<Incident>, StoreError>;
}

/// A scoped connection with a pending transaction.
#[async_trait]
pub trait IncidentUnitOfWork: Send {
    /// Reads the free-text message of an incident.
    ///
    /// Returns `Ok(None)` when no row has this id.
    async fn find_message(&mut self, id: IncidentId) -> Result<Option<String>, StoreError>;

    /// Stages the verdict into `impact_score` and `ai_analysis`.
    ///
    /// Fails with [`StoreError::NotFound`] if no row was updated.
    async fn record_analysis(
        &mut self,
        id: IncidentId,
        result: &ClassificationResult,
    ) -> Result<(), StoreError>;

    /// Commits staged writes durably and releases the connection.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}

/// Record store errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The targeted row does not exist.
    #[error("incident not found: {0}")]
    NotFound(IncidentId),

    /// Could not acquire a connection.
    #[error("connection failed: {0}")]
    Connection(String),

    /// A query or commit failed.
    #[error("query failed: {0}")]
    Query(String),
}

impl StoreError {
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query(message.into())
    }
}

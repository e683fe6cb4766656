//! In-memory implementation of IncidentStore.
//!
//! Mirrors the transactional behaviour of the Postgres adapter: writes are
//! staged on the unit of work and only become visible on commit. Used by
//! tests and by local runs without a database.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::incident::{ClassificationResult, Incident, IncidentId};
use crate::ports::{IncidentStore, IncidentUnitOfWork, StoreError};

#[derive(Debug, Default)]
struct State {
    incidents: BTreeMap<IncidentId, Incident>,
    open_units: usize,
    committed_writes: usize,
    fail_begin: Option<StoreError>,
    fail_commit: Option<StoreError>,
}

/// Thread-safe in-memory record store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIncidentStore {
    state: Arc<Mutex<State>>,
}

impl InMemoryIncidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an unanalyzed incident with only a message.
    ///
    /// Successive calls get increasing `created_at` values.
    pub fn insert_message(&self, id: IncidentId, message: impl Into<String>) {
        let mut state = self.lock();
        let offset = Duration::milliseconds(state.incidents.len() as i64);
        state.incidents.insert(
            id,
            Incident {
                id,
                kind: "Accident".to_string(),
                latitude: 1.3521,
                longitude: 103.8198,
                message: message.into(),
                impact_score: None,
                ai_analysis: None,
                created_at: Utc::now() + offset,
            },
        );
    }

    pub fn get(&self, id: IncidentId) -> Option<Incident> {
        self.lock().incidents.get(&id).cloned()
    }

    /// Units of work currently holding a "connection".
    pub fn open_units(&self) -> usize {
        self.lock().open_units
    }

    /// Number of analysis rows written by successful commits.
    pub fn committed_writes(&self) -> usize {
        self.lock().committed_writes
    }

    /// Makes the next `begin` fail with the given error.
    pub fn fail_next_begin(&self, error: StoreError) {
        self.lock().fail_begin = Some(error);
    }

    /// Makes the next `commit` fail with the given error.
    pub fn fail_next_commit(&self, error: StoreError) {
        self.lock().fail_commit = Some(error);
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IncidentStore for InMemoryIncidentStore {
    async fn begin(&self) -> Result<Box<dyn IncidentUnitOfWork>, StoreError> {
        let mut state = self.lock();
        if let Some(err) = state.fail_begin.take() {
            return Err(err);
        }
        state.open_units += 1;
        drop(state);

        Ok(Box::new(InMemoryUnitOfWork {
            state: Arc::clone(&self.state),
            pending: Vec::new(),
        }))
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Incident>, StoreError> {
        let mut incidents: Vec<Incident> = self.lock().incidents.values().cloned().collect();
        incidents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        incidents.truncate(limit as usize);
        Ok(incidents)
    }
}

struct InMemoryUnitOfWork {
    state: Arc<Mutex<State>>,
    pending: Vec<(IncidentId, ClassificationResult)>,
}

impl InMemoryUnitOfWork {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl IncidentUnitOfWork for InMemoryUnitOfWork {
    async fn find_message(&mut self, id: IncidentId) -> Result<Option<String>, StoreError> {
        Ok(self.lock().incidents.get(&id).map(|i| i.message.clone()))
    }

    async fn record_analysis(
        &mut self,
        id: IncidentId,
        result: &ClassificationResult,
    ) -> Result<(), StoreError> {
        if !self.lock().incidents.contains_key(&id) {
            return Err(StoreError::NotFound(id));
        }
        self.pending.push((id, result.clone()));
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), StoreError> {
        let pending = std::mem::take(&mut self.pending);
        let mut state = self.lock();
        if let Some(err) = state.fail_commit.take() {
            return Err(err);
        }
        for (id, result) in pending {
            if let Some(incident) = state.incidents.get_mut(&id) {
                incident.impact_score = Some(result.impact_score);
                incident.ai_analysis = Some(result.summary);
                state.committed_writes += 1;
            }
        }
        Ok(())
    }
}

impl Drop for InMemoryUnitOfWork {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.open_units = state.open_units.saturating_sub(1);
    }
}

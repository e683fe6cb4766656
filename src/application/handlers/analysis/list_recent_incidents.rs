//! ListRecentIncidentsHandler - Query handler for the latest incidents.

use std::sync::Arc;

use crate::domain::incident::Incident;
use crate::ports::{IncidentStore, StoreError};

/// Page size when the caller does not ask for one.
pub const DEFAULT_RECENT_LIMIT: u32 = 50;

/// Largest page a caller may request.
pub const MAX_RECENT_LIMIT: u32 = 200;

/// Query for the most recently ingested incidents.
#[derive(Debug, Clone, Default)]
pub struct ListRecentIncidentsQuery {
    pub limit: Option<u32>,
}

impl ListRecentIncidentsQuery {
    /// Effective limit, defaulted and clamped to `1..=MAX_RECENT_LIMIT`.
    pub fn effective_limit(&self) -> u32 {
        self.limit
            .unwrap_or(DEFAULT_RECENT_LIMIT)
            .clamp(1, MAX_RECENT_LIMIT)
    }
}

/// Handler for listing recent incidents.
pub struct ListRecentIncidentsHandler {
    store: Arc<dyn IncidentStore>,
}

impl ListRecentIncidentsHandler {
    pub fn new(store: Arc<dyn IncidentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: ListRecentIncidentsQuery) -> Result<Vec<Incident>, StoreError> {
        self.store.list_recent(query.effective_limit()).await
    }
}

//! PostgreSQL implementation of IncidentStore.
//!
//! Each unit of work wraps a `sqlx` transaction, which owns one pooled
//! connection. Dropping the transaction uncommitted rolls it back and returns
//! the connection to the pool.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};

use crate::domain::incident::{ClassificationResult, Incident, IncidentId};
use crate::ports::{IncidentStore, IncidentUnitOfWork, StoreError};

/// PostgreSQL implementation of IncidentStore.
#[derive(Clone)]
pub struct PostgresIncidentStore {
    pool: PgPool,
}

impl PostgresIncidentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl IncidentStore for PostgresIncidentStore {
    async fn begin(&self) -> Result<Box<dyn IncidentUnitOfWork>, StoreError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::connection(format!("Failed to begin transaction: {}", e)))?;

        Ok(Box::new(PostgresUnitOfWork { tx }))
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Incident>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, type, latitude, longitude, message, impact_score, ai_analysis, created_at
            FROM traffic_incidents
            ORDER BY created_at DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::query(format!("Failed to fetch recent incidents: {}", e)))?;

        rows.into_iter().map(row_to_incident).collect()
    }
}

struct PostgresUnitOfWork {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl IncidentUnitOfWork for PostgresUnitOfWork {
    async fn find_message(&mut self, id: IncidentId) -> Result<Option<String>, StoreError> {
        let row = sqlx::query_scalar::<_, Option<String>>(
            "SELECT message FROM traffic_incidents WHERE id = $1",
        )
        .bind(id.as_i32())
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| StoreError::query(format!("Failed to fetch incident message: {}", e)))?;

        message_from_row(id, row)
    }

    async fn record_analysis(
        &mut self,
        id: IncidentId,
        result: &ClassificationResult,
    ) -> Result<(), StoreError> {
        let outcome = sqlx::query(
            "UPDATE traffic_incidents SET impact_score = $1, ai_analysis = $2 WHERE id = $3",
        )
        .bind(result.impact_score)
        .bind(&result.summary)
        .bind(id.as_i32())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::query(format!("Failed to update incident analysis: {}", e)))?;

        if outcome.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }

        Ok(())
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx
            .commit()
            .await
            .map_err(|e| StoreError::query(format!("Failed to commit analysis: {}", e)))
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helper functions
// ════════════════════════════════════════════════════════════════════════════

/// Outer `None` is a missing row; inner `None` is a row whose `message` is NULL,
/// which upstream schemas without the NOT NULL constraint can hold.
fn message_from_row(
    id: IncidentId,
    row: Option<Option<String>>,
) -> Result<Option<String>, StoreError> {
    match row {
        None => Ok(None),
        Some(Some(message)) => Ok(Some(message)),
        Some(None) => Err(StoreError::query(format!(
            "Incident {} has no message text to analyze",
            id
        ))),
    }
}

fn row_to_incident(row: PgRow) -> Result<Incident, StoreError> {
    let raw_id: i32 = get(&row, "id")?;
    let id = IncidentId::new(raw_id).map_err(|e| StoreError::query(e.to_string()))?;
    let created_at: DateTime<Utc> = get(&row, "created_at")?;

    Ok(Incident {
        id,
        kind: get(&row, "type")?,
        latitude: get(&row, "latitude")?,
        longitude: get(&row, "longitude")?,
        message: get(&row, "message")?,
        impact_score: get(&row, "impact_score")?,
        ai_analysis: get(&row, "ai_analysis")?,
        created_at,
    })
}

fn get<'r, T>(row: &'r PgRow, column: &str) -> Result<T, StoreError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(column)
        .map_err(|e| StoreError::query(format!("Failed to read column {}: {}", column, e)))
}

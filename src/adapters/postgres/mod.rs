//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresIncidentStore` - Transactional incident reads and analysis writes
//! - `connect` / `run_migrations` - Pool construction and schema setup

mod incident_store;
mod pool;

pub use incident_store::PostgresIncidentStore;
pub use pool::{connect, connect_options, run_migrations};

//! Domain layer - Incident types and analysis rules.

pub mod incident;

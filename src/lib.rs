//! Incident Analyst - LLM impact scoring for traffic incidents
//!
//! Reads a stored incident message, asks a chat model for an impact score and
//! summary, and writes both back to the incident row inside one transaction.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;

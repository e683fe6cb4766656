//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - LLM providers (OpenAI, scripted mock)
//! - `http` - axum REST surface
//! - `memory` - In-memory incident store for tests and local runs
//! - `postgres` - sqlx-backed incident store

pub mod ai;
pub mod http;
pub mod memory;
pub mod postgres;

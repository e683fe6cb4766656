//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `IncidentStore` / `IncidentUnitOfWork` - Relational record store
//! - `AIProvider` - Language-model inference service

mod ai_provider;
mod incident_store;

pub use ai_provider::{
    AIError, AIProvider, CompletionRequest, CompletionResponse, FinishReason, Message,
    MessageRole, RequestMetadata, ResponseFormat, TokenUsage,
};
pub use incident_store::{IncidentStore, IncidentUnitOfWork, StoreError};

//! AI Provider Adapters.
//!
//! Implementations of the AIProvider port.
//!
//! ## Available Adapters
//!
//! - `OpenAIProvider` - OpenAI chat completions (GPT-4o by default)
//! - `MockAIProvider` - Scripted provider for tests and offline runs

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockAIProvider, MockResponse, MOCK_DEFAULT_CONTENT, MOCK_MODEL};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};

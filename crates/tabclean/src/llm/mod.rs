//! Optional LLM providers for cleaning suggestions.
//!
//! The LLM integration is optional; every feature works without it. A
//! provider only ever sees a [`DatasetSummary`] of column names, counts and
//! type tags.
//!
//! # Supported Providers
//!
//! - **OpenAI** - GPT models via API (requires `OPENAI_API_KEY`)
//! - **Mock** - deterministic output for tests
//!
//! # Example
//!
//! ```no_run
//! use tabclean::{OpenAIProvider, TabClean};
//!
//! let tabclean = TabClean::new().with_llm(OpenAIProvider::from_env().unwrap());
//! ```

mod mock;
mod openai;
mod prompts;
mod provider;

pub use mock::MockProvider;
pub use openai::OpenAIProvider;
pub use provider::{DatasetSummary, LlmConfig, LlmProvider};

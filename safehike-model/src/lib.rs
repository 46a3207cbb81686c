//! # safehike-model
//!
//! LLM provider integration for SafeHike. The production backend is the
//! Gemini REST API ([`gemini::GeminiModel`]): streaming generation, bounded
//! retry on transient failures, search grounding, and schema-constrained
//! structured output. [`mock::MockLlm`] scripts responses for tests.

pub mod gemini;
pub mod mock;
pub mod retry;

pub use gemini::{GeminiConfig, GeminiModel};
pub use mock::MockLlm;
pub use retry::{RetryConfig, execute_with_retry, is_retryable_model_error, is_retryable_status_code};

//! Gemini REST API backend.

mod client;
mod config;
mod convert;

pub use client::GeminiModel;
pub use config::{GEMINI_API_BASE, GeminiConfig};

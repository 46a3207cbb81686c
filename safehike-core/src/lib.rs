//! # safehike-core
//!
//! Core types for the SafeHike hiking-safety report service.
//!
//! ## Overview
//!
//! This crate provides the foundational abstractions the rest of the
//! workspace is built on:
//!
//! - [`Agent`] - The fundamental trait for all agents
//! - [`HikeState`] / [`StateDelta`] - The typed session record and its
//!   closed mutation vocabulary
//! - [`HikingReport`] / [`Risk`] - The structured report and the fixed
//!   five-risk policy table
//! - [`Tool`] - Function tools the planner exposes to the model
//! - [`Event`] - Streamed agent output carrying content and state deltas
//! - [`HikeError`] / [`Result`] - Unified error handling
//!
//! ## State management
//!
//! There is no open-ended key-value state. Every field an agent may read
//! or write is a named field of [`HikeState`], and every mutation is a
//! [`StateDelta`] variant. An agent that needs a new output must add a
//! field and a delta variant, which makes cross-agent data flow visible in
//! the type system.

pub mod agent;
pub mod context;
pub mod error;
pub mod event;
pub mod model;
pub mod report;
pub mod state;
pub mod tool;
pub mod types;

pub use agent::{Agent, EventStream};
pub use context::InvocationContext;
pub use error::{HikeError, Result};
pub use event::{Event, EventActions};
pub use model::{
    CitationMetadata, CitationSource, FinishReason, GenerateContentConfig, Llm, LlmRequest,
    LlmResponse, LlmResponseStream, UsageMetadata,
};
pub use report::{
    HikingReport, LinkItem, Risk, RiskAssessment, TrailInfo, WeatherDay, SERVICE_LINKS,
};
pub use state::{HikeState, ReportSlot, StateDelta};
pub use tool::{Tool, ToolOutcome};
pub use types::{Content, Part};

//! # safehike-runner
//!
//! Glue between an agent tree and durable sessions: the [`Runner`] loads
//! the session, seeds the invocation context with its state and history,
//! appends the user turn, then forwards the agent's events while persisting
//! each one.

mod runner;

pub use runner::Runner;

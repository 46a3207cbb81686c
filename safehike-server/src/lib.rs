//! # safehike-server
//!
//! The HTTP boundary. One run endpoint forwards conversational turns to the
//! planner agent and streams its events back as SSE; session routes manage
//! conversation lifetimes; everything sits behind CORS, timeout, body-limit
//! and trace layers.

pub mod config;
pub mod rest;

pub use config::{SecurityConfig, ServerConfig};
pub use rest::create_app;

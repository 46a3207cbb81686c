//! # safehike-session
//!
//! Session storage for SafeHike. A session owns the typed
//! [`safehike_core::HikeState`] record, the retained conversation history,
//! and the event log for one user conversation. State changes arrive only
//! as events carrying typed deltas ([`SessionService::append_event`]), so
//! the durable record is the replay of its log.

mod inmemory;
mod service;
mod session;

pub use inmemory::InMemorySessionService;
pub use service::{CreateRequest, DeleteRequest, GetRequest, SessionService};
pub use session::Session;

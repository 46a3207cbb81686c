use chrono::{DateTime, Utc};
use safehike_core::{Content, Event, HikeState};
use serde::{Deserialize, Serialize};

/// One user conversation: the typed state record, the retained history the
/// planner sees on later turns, and the full event log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub state: HikeState,
    /// Conversation history retained across turns, oldest first. Partial
    /// streaming chunks and pure delta events are not recorded here.
    pub history: Vec<Content>,
    pub events: Vec<Event>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            state: HikeState::default(),
            history: Vec::new(),
            events: Vec::new(),
            updated_at: Utc::now(),
        }
    }
}

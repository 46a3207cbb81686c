use crate::model::LlmResponse;
use crate::state::StateDelta;
use crate::types::Content;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One streamed interaction: a user turn, a model chunk, a tool result, or
/// a pure state mutation. Embeds [`LlmResponse`] so content and streaming
/// flags ride along with attribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub invocation_id: String,
    /// Agent name, or "user" for the inbound turn.
    pub author: String,
    #[serde(flatten)]
    pub llm_response: LlmResponse,
    pub actions: EventActions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventActions {
    /// Typed state mutations this event commits.
    pub deltas: Vec<StateDelta>,
    /// Set when the planner hands the turn off to the research workflow.
    pub start_research: bool,
}

impl Event {
    pub fn new(invocation_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            invocation_id: invocation_id.into(),
            author: String::new(),
            llm_response: LlmResponse::default(),
            actions: EventActions::default(),
        }
    }

    /// Event carrying a model response chunk.
    pub fn from_response(
        invocation_id: impl Into<String>,
        author: impl Into<String>,
        llm_response: LlmResponse,
    ) -> Self {
        let mut event = Self::new(invocation_id);
        event.author = author.into();
        event.llm_response = llm_response;
        event
    }

    /// Event committing state deltas without content.
    pub fn from_deltas(
        invocation_id: impl Into<String>,
        author: impl Into<String>,
        deltas: Vec<StateDelta>,
    ) -> Self {
        let mut event = Self::new(invocation_id);
        event.author = author.into();
        event.actions.deltas = deltas;
        event
    }

    pub fn content(&self) -> Option<&Content> {
        self.llm_response.content.as_ref()
    }

    pub fn set_content(&mut self, content: Content) {
        self.llm_response.content = Some(content);
    }
}

use crate::state::{HikeState, StateDelta};
use crate::types::Content;
use std::sync::{Arc, RwLock};

/// Everything an agent can see during one invocation: identity of the
/// turn, the user's message, the retained conversation history, and the
/// live session state.
///
/// The state is shared across the whole agent tree for the invocation.
/// Parallel pipeline members write disjoint fields (see
/// [`crate::ReportSlot`]), so concurrent commits cannot conflict.
pub struct InvocationContext {
    invocation_id: String,
    user_id: String,
    session_id: String,
    user_content: Content,
    history: Vec<Content>,
    state: Arc<RwLock<HikeState>>,
}

impl InvocationContext {
    pub fn new(
        invocation_id: impl Into<String>,
        user_id: impl Into<String>,
        session_id: impl Into<String>,
        user_content: Content,
    ) -> Self {
        Self {
            invocation_id: invocation_id.into(),
            user_id: user_id.into(),
            session_id: session_id.into(),
            user_content,
            history: Vec::new(),
            state: Arc::new(RwLock::new(HikeState::default())),
        }
    }

    pub fn with_history(mut self, history: Vec<Content>) -> Self {
        self.history = history;
        self
    }

    pub fn with_state(mut self, state: HikeState) -> Self {
        self.state = Arc::new(RwLock::new(state));
        self
    }

    pub fn invocation_id(&self) -> &str {
        &self.invocation_id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn user_content(&self) -> &Content {
        &self.user_content
    }

    /// Conversation history from prior turns, oldest first.
    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// A snapshot of the current session state.
    pub fn state(&self) -> HikeState {
        self.state.read().unwrap().clone()
    }

    /// Commit deltas to the live state. Agents call this when they emit a
    /// delta-carrying event, so later pipeline stages observe the write.
    pub fn apply(&self, deltas: &[StateDelta]) {
        if deltas.is_empty() {
            return;
        }
        self.state.write().unwrap().apply_all(deltas);
    }
}

use crate::{CreateRequest, DeleteRequest, GetRequest, Session, SessionService};
use async_trait::async_trait;
use safehike_core::{Event, HikeError, Result};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

pub struct InMemorySessionService {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl InMemorySessionService {
    pub fn new() -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())) }
    }

    fn key(user_id: &str, session_id: &str) -> String {
        format!("{}:{}", user_id, session_id)
    }

    /// Completed user/model text belongs in the retained history; partial
    /// streaming chunks and tool plumbing do not.
    fn retains_in_history(event: &Event) -> bool {
        if event.llm_response.partial {
            return false;
        }
        match event.content() {
            Some(content) => {
                (content.role == "user" || content.role == "model")
                    && !content.text().is_empty()
            }
            None => false,
        }
    }
}

impl Default for InMemorySessionService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionService for InMemorySessionService {
    async fn create(&self, req: CreateRequest) -> Result<Session> {
        let session_id = req.session_id.unwrap_or_else(|| Uuid::new_v4().to_string());
        let session = Session::new(session_id.clone(), req.user_id.clone());

        let mut sessions = self.sessions.write().unwrap();
        sessions.insert(Self::key(&req.user_id, &session_id), session.clone());

        Ok(session)
    }

    async fn get(&self, req: GetRequest) -> Result<Session> {
        let sessions = self.sessions.read().unwrap();
        sessions
            .get(&Self::key(&req.user_id, &req.session_id))
            .cloned()
            .ok_or_else(|| HikeError::Session("session not found".into()))
    }

    async fn delete(&self, req: DeleteRequest) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        sessions.remove(&Self::key(&req.user_id, &req.session_id));
        Ok(())
    }

    async fn append_event(&self, session_id: &str, event: Event) -> Result<()> {
        let mut sessions = self.sessions.write().unwrap();
        let session = sessions
            .values_mut()
            .find(|s| s.id == session_id)
            .ok_or_else(|| HikeError::Session("session not found".into()))?;

        session.state.apply_all(&event.actions.deltas);
        if Self::retains_in_history(&event) {
            if let Some(content) = event.content() {
                session.history.push(content.clone());
            }
        }
        session.updated_at = event.timestamp;
        session.events.push(event);

        Ok(())
    }
}

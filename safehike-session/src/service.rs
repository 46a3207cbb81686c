use crate::Session;
use async_trait::async_trait;
use safehike_core::{Event, Result};

#[derive(Debug, Clone)]
pub struct CreateRequest {
    pub user_id: String,
    /// Explicit id, or None to generate one.
    pub session_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GetRequest {
    pub user_id: String,
    pub session_id: String,
}

#[derive(Debug, Clone)]
pub struct DeleteRequest {
    pub user_id: String,
    pub session_id: String,
}

#[async_trait]
pub trait SessionService: Send + Sync {
    async fn create(&self, req: CreateRequest) -> Result<Session>;
    async fn get(&self, req: GetRequest) -> Result<Session>;
    async fn delete(&self, req: DeleteRequest) -> Result<()>;

    /// Record one event: append to the log, apply its deltas to the state
    /// record, and extend the retained history with completed content.
    async fn append_event(&self, session_id: &str, event: Event) -> Result<()>;
}

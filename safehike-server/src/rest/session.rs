use crate::ServerConfig;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use safehike_session::{CreateRequest, DeleteRequest, GetRequest, Session};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub user_id: String,
    pub session_id: Option<String>,
}

pub async fn create_session(
    State(config): State<ServerConfig>,
    Json(req): Json<CreateSessionRequest>,
) -> Result<Json<Session>, StatusCode> {
    config
        .session_service
        .create(CreateRequest { user_id: req.user_id, session_id: req.session_id })
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to create session");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

pub async fn get_session(
    State(config): State<ServerConfig>,
    Path((user_id, session_id)): Path<(String, String)>,
) -> Result<Json<Session>, StatusCode> {
    config
        .session_service
        .get(GetRequest { user_id, session_id })
        .await
        .map(Json)
        .map_err(|_| StatusCode::NOT_FOUND)
}

pub async fn delete_session(
    State(config): State<ServerConfig>,
    Path((user_id, session_id)): Path<(String, String)>,
) -> Result<StatusCode, StatusCode> {
    config
        .session_service
        .delete(DeleteRequest { user_id, session_id })
        .await
        .map(|_| StatusCode::NO_CONTENT)
        .map_err(|e| {
            tracing::error!(error = %e, "failed to delete session");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

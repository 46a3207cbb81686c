use crate::ServerConfig;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use safehike_core::Content;
use safehike_runner::Runner;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

#[derive(Serialize, Deserialize)]
pub struct RunRequest {
    pub new_message: String,
}

/// Forward one conversational turn to the planner and stream its events
/// back as SSE. Stream-level failures surface as `error` SSE events rather
/// than silently ending the stream.
pub async fn run_sse(
    State(config): State<ServerConfig>,
    Path((user_id, session_id)): Path<(String, String)>,
    Json(req): Json<RunRequest>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, StatusCode> {
    // Validate the session before starting a stream.
    config
        .session_service
        .get(safehike_session::GetRequest {
            user_id: user_id.clone(),
            session_id: session_id.clone(),
        })
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;

    let runner = Runner::new(config.agent.clone(), config.session_service.clone());
    let event_stream = runner
        .run(user_id, session_id, Content::new("user").with_text(&req.new_message))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "failed to start run");
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let sse_stream = stream::unfold(event_stream, |mut stream| async move {
        use futures::StreamExt;
        match stream.next().await {
            Some(Ok(event)) => {
                let json = serde_json::to_string(&event).ok()?;
                Some((Ok(Event::default().data(json)), stream))
            }
            Some(Err(e)) => {
                tracing::error!(error = %e, "run stream failed");
                let payload = serde_json::json!({ "error": e.to_string() }).to_string();
                Some((Ok(Event::default().event("error").data(payload)), stream))
            }
            None => None,
        }
    });

    Ok(Sse::new(sse_stream).keep_alive(KeepAlive::default()))
}

use async_stream::try_stream;
use futures::StreamExt;
use safehike_core::{Agent, Content, Event, EventStream, InvocationContext, Result};
use safehike_session::{GetRequest, SessionService};
use std::sync::Arc;
use uuid::Uuid;

pub struct Runner {
    agent: Arc<dyn Agent>,
    session_service: Arc<dyn SessionService>,
}

impl Runner {
    pub fn new(agent: Arc<dyn Agent>, session_service: Arc<dyn SessionService>) -> Self {
        Self { agent, session_service }
    }

    /// Run one conversational turn against an existing session.
    pub async fn run(
        &self,
        user_id: String,
        session_id: String,
        user_content: Content,
    ) -> Result<EventStream> {
        let agent = self.agent.clone();
        let session_service = self.session_service.clone();

        let s = try_stream! {
            let session = session_service
                .get(GetRequest { user_id: user_id.clone(), session_id: session_id.clone() })
                .await?;

            let invocation_id = format!("inv-{}", Uuid::new_v4());
            tracing::info!(
                invocation_id = %invocation_id,
                session_id = %session_id,
                agent = agent.name(),
                "starting invocation"
            );

            let ctx = Arc::new(
                InvocationContext::new(
                    invocation_id.clone(),
                    user_id,
                    session_id.clone(),
                    user_content.clone(),
                )
                .with_history(session.history)
                .with_state(session.state),
            );

            // Record the inbound turn before the agent runs, so the user
            // message is retained in history even if the turn fails.
            let mut user_event = Event::new(&invocation_id);
            user_event.author = "user".to_string();
            user_event.set_content(user_content);
            user_event.llm_response.turn_complete = true;
            session_service.append_event(&session_id, user_event).await?;

            let mut agent_stream = agent.run(ctx).await?;
            while let Some(item) = agent_stream.next().await {
                let event = item?;
                session_service.append_event(&session_id, event.clone()).await?;
                yield event;
            }
        };

        Ok(Box::pin(s))
    }
}

use crate::{Result, context::InvocationContext, event::Event};
use async_trait::async_trait;
use futures::stream::Stream;
use std::pin::Pin;
use std::sync::Arc;

pub type EventStream = Pin<Box<dyn Stream<Item = Result<Event>> + Send>>;

/// A unit of the pipeline: bound to a name and a description, it consumes
/// the invocation's state and streams events. Compositions (the parallel
/// research team, the sequential workflow) implement the same trait as the
/// leaf agents.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Content;
    use async_stream::stream;

    struct TestAgent {
        name: String,
    }

    #[async_trait]
    impl Agent for TestAgent {
        fn name(&self) -> &str {
            &self.name
        }

        fn description(&self) -> &str {
            "test agent"
        }

        async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream> {
            let invocation_id = ctx.invocation_id().to_string();
            let s = stream! {
                yield Ok(Event::new(invocation_id));
            };
            Ok(Box::pin(s))
        }
    }

    #[tokio::test]
    async fn test_agent_trait() {
        use futures::StreamExt;

        let agent = TestAgent { name: "test".to_string() };
        assert_eq!(agent.name(), "test");
        assert_eq!(agent.description(), "test agent");

        let ctx = Arc::new(InvocationContext::new(
            "inv-1",
            "user-1",
            "session-1",
            Content::new("user").with_text("hi"),
        ));
        let mut stream = agent.run(ctx).await.unwrap();
        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.invocation_id, "inv-1");
    }
}

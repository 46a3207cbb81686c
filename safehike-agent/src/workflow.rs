//! Explicit pipeline composition: a parallel group with join semantics and
//! a sequential workflow with drain-then-advance barriers.

use crate::{AggregatorAgent, ResearchAgent};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use futures::stream::select_all;
use safehike_core::{Agent, EventStream, InvocationContext, Llm, Result};
use std::sync::Arc;

/// Runs its members concurrently with no ordering guarantee between their
/// events. The merged stream ends only when every member stream is
/// exhausted — that exhaustion is the join: by then each member has
/// committed its report slot, and the slots are disjoint, so there is no
/// write-write conflict.
pub struct ResearchTeam {
    name: String,
    members: Vec<Arc<dyn Agent>>,
}

impl ResearchTeam {
    pub fn new(members: Vec<Arc<dyn Agent>>) -> Self {
        Self { name: "research_team".to_string(), members }
    }
}

#[async_trait]
impl Agent for ResearchTeam {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Concurrent weather, news and links research."
    }

    async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream> {
        let members = self.members.clone();

        let s = try_stream! {
            let mut streams = Vec::with_capacity(members.len());
            for member in &members {
                streams.push(member.run(ctx.clone()).await?);
            }

            let mut merged = select_all(streams);
            while let Some(item) = merged.next().await {
                yield item?;
            }
        };

        Ok(Box::pin(s))
    }
}

/// Runs its stages strictly in order. Each stage's stream is drained to
/// completion before the next stage starts, so every state delta committed
/// by stage N is observable by stage N+1.
pub struct HikingWorkflow {
    name: String,
    stages: Vec<Arc<dyn Agent>>,
}

impl HikingWorkflow {
    /// The production pipeline: research team → trail agent → aggregator.
    pub fn new(model: Arc<dyn Llm>) -> Self {
        let team = ResearchTeam::new(vec![
            Arc::new(ResearchAgent::weather(model.clone())),
            Arc::new(ResearchAgent::news(model.clone())),
            Arc::new(ResearchAgent::links(model.clone())),
        ]);

        Self::from_stages(vec![
            Arc::new(team),
            Arc::new(ResearchAgent::trail(model.clone())),
            Arc::new(AggregatorAgent::new(model)),
        ])
    }

    pub fn from_stages(stages: Vec<Arc<dyn Agent>>) -> Self {
        Self { name: "workflow".to_string(), stages }
    }
}

#[async_trait]
impl Agent for HikingWorkflow {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        "Sequential hiking research workflow."
    }

    async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream> {
        let stages = self.stages.clone();

        let s = try_stream! {
            for stage in &stages {
                tracing::debug!(stage = stage.name(), "starting workflow stage");
                let mut stream = stage.run(ctx.clone()).await?;
                while let Some(item) = stream.next().await {
                    yield item?;
                }
            }
        };

        Ok(Box::pin(s))
    }
}

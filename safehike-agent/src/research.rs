//! Research agents: one model call, one owned report slot.

use crate::instructions;
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use safehike_core::{
    Agent, Content, Event, EventStream, HikeState, InvocationContext, Llm, LlmRequest, ReportSlot,
    Result,
};
use std::sync::Arc;

pub type InstructionFn = fn(&HikeState) -> String;

/// A single research step: renders its instruction from the current state
/// snapshot, runs one (optionally search-grounded) model call, streams the
/// partial chunks through, and commits the full text to its report slot.
///
/// One type covers the weather, news, links and trail agents — they differ
/// only in instruction, slot, and search setting.
pub struct ResearchAgent {
    name: String,
    description: String,
    model: Arc<dyn Llm>,
    instruction: InstructionFn,
    slot: ReportSlot,
    search: bool,
}

impl ResearchAgent {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        model: Arc<dyn Llm>,
        instruction: InstructionFn,
        slot: ReportSlot,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            model,
            instruction,
            slot,
            search: false,
        }
    }

    pub fn with_search(mut self, enabled: bool) -> Self {
        self.search = enabled;
        self
    }

    /// Mountain weather forecast reporter.
    pub fn weather(model: Arc<dyn Llm>) -> Self {
        Self::new(
            "weather_agent",
            "A mountain weather forecasts report agent.",
            model,
            instructions::weather_instruction,
            ReportSlot::Weather,
        )
        .with_search(true)
    }

    /// Safety-relevant mountain news reporter.
    pub fn news(model: Arc<dyn Llm>) -> Self {
        Self::new(
            "news_agent",
            "A mountain news report agent.",
            model,
            instructions::news_instruction,
            ReportSlot::News,
        )
        .with_search(true)
    }

    /// Useful-links collector.
    pub fn links(model: Arc<dyn Llm>) -> Self {
        Self::new(
            "links_agent",
            "Hiking info links extractor.",
            model,
            instructions::links_instruction,
            ReportSlot::Links,
        )
        .with_search(true)
    }

    /// Trail researcher; its instruction embeds the committed weather and
    /// news reports, so it must run after the research team.
    pub fn trail(model: Arc<dyn Llm>) -> Self {
        Self::new(
            "trail_agent",
            "A mountain trail research agent.",
            model,
            instructions::trail_instruction,
            ReportSlot::Trail,
        )
        .with_search(true)
    }
}

#[async_trait]
impl Agent for ResearchAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream> {
        let name = self.name.clone();
        let model = self.model.clone();
        let instruction = self.instruction;
        let slot = self.slot;
        let search = self.search;

        let s = try_stream! {
            let state = ctx.state();
            let prompt = instruction(&state);
            tracing::debug!(agent = %name, search = search, "running research agent");

            let request = LlmRequest::new(
                model.name(),
                vec![Content::new("user").with_text(prompt)],
            )
            .with_google_search(search);

            let mut response_stream = model.generate_content(request, true).await?;

            let mut report = String::new();
            while let Some(chunk) = response_stream.next().await {
                let mut chunk = chunk?;
                if let Some(content) = &chunk.content {
                    report.push_str(&content.text());
                }
                // Forwarded chunks are always partial; the agent's durable
                // contribution is the slot delta, not conversational text.
                chunk.partial = true;
                chunk.turn_complete = false;
                yield Event::from_response(ctx.invocation_id(), &name, chunk);
            }

            // Commit before emitting, so the delta is visible to the next
            // pipeline stage as soon as this stream ends.
            let delta = slot.delta(report);
            ctx.apply(std::slice::from_ref(&delta));
            yield Event::from_deltas(ctx.invocation_id(), &name, vec![delta]);
        };

        Ok(Box::pin(s))
    }
}

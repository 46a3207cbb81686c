//! Terminal pipeline step: schema-constrained report synthesis.

use crate::instructions;
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use safehike_core::{
    Agent, Content, Event, EventStream, HikeError, HikingReport, InvocationContext, Llm,
    LlmRequest, LlmResponse, Result, StateDelta,
};
use std::sync::Arc;

const NAME: &str = "aggregator_agent";

/// Synthesizes the final report. The model is constrained by the
/// [`HikingReport`] response schema, so the closed risk vocabulary and the
/// report shape are enforced at parse time; the user-facing markdown is
/// rendered deterministically from the parsed record.
pub struct AggregatorAgent {
    model: Arc<dyn Llm>,
}

impl AggregatorAgent {
    pub fn new(model: Arc<dyn Llm>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl Agent for AggregatorAgent {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Hiking info aggregator."
    }

    async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream> {
        let model = self.model.clone();

        let s = try_stream! {
            let state = ctx.state();
            let prompt = instructions::aggregator_instruction(&state);
            tracing::debug!(agent = NAME, "running aggregator");

            let request = LlmRequest::new(
                model.name(),
                vec![Content::new("user").with_text(prompt)],
            )
            .with_response_schema(HikingReport::response_schema());

            let mut response_stream = model.generate_content(request, false).await?;

            let mut raw = String::new();
            while let Some(chunk) = response_stream.next().await {
                let chunk = chunk?;
                if let Some(content) = &chunk.content {
                    raw.push_str(&content.text());
                }
            }

            let report: HikingReport = serde_json::from_str(raw.trim()).map_err(|e| {
                HikeError::Model(format!("aggregator returned invalid report JSON: {}", e))
            })?;

            let markdown = report.render_markdown();
            let delta = StateDelta::HikingReport(report);
            ctx.apply(std::slice::from_ref(&delta));
            yield Event::from_deltas(ctx.invocation_id(), NAME, vec![delta]);

            // The rendered report is the turn's final content.
            yield Event::from_response(ctx.invocation_id(), NAME, LlmResponse::text(markdown));
        };

        Ok(Box::pin(s))
    }
}

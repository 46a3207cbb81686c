//! The user-facing planner agent.

use crate::instructions;
use crate::tools::{GetCurrentDateTool, SetHikingDatesTool, SetMountainTool, current_date_string};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use safehike_core::{
    Agent, Content, Event, EventStream, HikeError, InvocationContext, Llm, LlmRequest, Part,
    Result, StateDelta, Tool,
};
use serde_json::Value;
use std::sync::Arc;

/// Control tool the planner's model calls to hand the turn off to the
/// research workflow.
pub const START_RESEARCH_TOOL: &str = "start_research";

/// Conversational root agent. Each turn it resets the per-turn context
/// (`trail`, `current_date`), then runs a bounded tool-calling loop:
/// recording facts through the function tools, and on `start_research`
/// handing off to the workflow, whose aggregated report becomes the turn's
/// final content.
pub struct PlannerAgent {
    name: String,
    description: String,
    model: Arc<dyn Llm>,
    tools: Vec<Arc<dyn Tool>>,
    workflow: Arc<dyn Agent>,
    max_iterations: usize,
}

impl PlannerAgent {
    pub fn new(model: Arc<dyn Llm>, workflow: Arc<dyn Agent>) -> Self {
        Self {
            name: "planner".to_string(),
            description: "Safe Hike Planning Agent".to_string(),
            model,
            tools: vec![
                Arc::new(SetMountainTool),
                Arc::new(SetHikingDatesTool),
                Arc::new(GetCurrentDateTool),
            ],
            workflow,
            max_iterations: 10,
        }
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    fn tool_declarations(&self) -> Vec<Value> {
        let mut declarations: Vec<Value> = self.tools.iter().map(|t| t.declaration()).collect();
        declarations.push(serde_json::json!({
            "name": START_RESEARCH_TOOL,
            "description": "Hand off to the research workflow once the mountain and hiking \
                 dates are recorded. The workflow researches weather, news, trails and links, \
                 then compiles the final hiking report for the user."
        }));
        declarations
    }
}

#[async_trait]
impl Agent for PlannerAgent {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> &str {
        &self.description
    }

    async fn run(&self, ctx: Arc<InvocationContext>) -> Result<EventStream> {
        let name = self.name.clone();
        let model = self.model.clone();
        let tools = self.tools.clone();
        let workflow = self.workflow.clone();
        let max_iterations = self.max_iterations;
        let declarations = self.tool_declarations();

        let s = try_stream! {
            // Per-turn context reset: relative dates must resolve against
            // the real clock, and a trail preference from an earlier turn
            // must not leak into this one.
            let reset = vec![
                StateDelta::Trail(None),
                StateDelta::CurrentDate(current_date_string()),
            ];
            ctx.apply(&reset);
            yield Event::from_deltas(ctx.invocation_id(), &name, reset);

            let mut conversation =
                vec![Content::new("user").with_text(instructions::planner_instruction())];
            conversation.extend(ctx.history().iter().cloned());
            conversation.push(ctx.user_content().clone());

            let mut iteration = 0;
            loop {
                iteration += 1;
                if iteration > max_iterations {
                    Err::<(), _>(HikeError::Agent(format!(
                        "planner exceeded {} iterations",
                        max_iterations
                    )))?;
                }

                let request = LlmRequest::new(model.name(), conversation.clone())
                    .with_function_declarations(declarations.clone());
                let mut response_stream = model.generate_content(request, true).await?;

                let mut turn_content: Option<Content> = None;
                while let Some(chunk) = response_stream.next().await {
                    let mut chunk = chunk?;
                    if let Some(content) = chunk.content.clone() {
                        match &mut turn_content {
                            Some(acc) => acc.parts.extend(content.parts),
                            None => turn_content = Some(content),
                        }
                    }
                    chunk.partial = true;
                    chunk.turn_complete = false;
                    yield Event::from_response(ctx.invocation_id(), &name, chunk);
                }

                let content = match turn_content {
                    Some(content) => content,
                    None => break,
                };
                let calls = content.function_calls();

                if calls.is_empty() {
                    // Plain conversational reply: consolidate the streamed
                    // chunks into the turn's single durable content event.
                    let mut final_event = Event::new(ctx.invocation_id());
                    final_event.author = name.clone();
                    final_event.set_content(content);
                    final_event.llm_response.turn_complete = true;
                    yield final_event;
                    break;
                }

                conversation.push(content);

                let mut delegate = false;
                for (tool_name, args) in calls {
                    if tool_name == START_RESEARCH_TOOL {
                        delegate = true;
                        let mut handoff = Event::new(ctx.invocation_id());
                        handoff.author = name.clone();
                        handoff.actions.start_research = true;
                        yield handoff;
                        continue;
                    }

                    tracing::debug!(tool = %tool_name, "executing planner tool");
                    let (response, deltas) = match tools.iter().find(|t| t.name() == tool_name) {
                        Some(tool) => match tool.execute(args).await {
                            Ok(outcome) => (outcome.response, outcome.deltas),
                            // Argument errors go back to the model as the
                            // function response; they do not end the turn.
                            Err(e) => (serde_json::json!({ "error": e.to_string() }), Vec::new()),
                        },
                        None => (
                            serde_json::json!({ "error": format!("Tool {} not found", tool_name) }),
                            Vec::new(),
                        ),
                    };

                    ctx.apply(&deltas);

                    let function_content = Content {
                        role: "function".to_string(),
                        parts: vec![Part::function_response(tool_name.clone(), response)],
                    };

                    let mut tool_event = Event::new(ctx.invocation_id());
                    tool_event.author = name.clone();
                    tool_event.set_content(function_content.clone());
                    tool_event.actions.deltas = deltas;
                    yield tool_event;

                    conversation.push(function_content);
                }

                if delegate {
                    let mut workflow_stream = workflow.run(ctx.clone()).await?;
                    while let Some(item) = workflow_stream.next().await {
                        yield item?;
                    }
                    // The aggregator's rendered report is the final content
                    // of the turn; the planner takes no further model turn.
                    return;
                }
            }
        };

        Ok(Box::pin(s))
    }
}

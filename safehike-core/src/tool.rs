use crate::{Result, state::StateDelta};
use async_trait::async_trait;
use serde_json::Value;

/// What a tool execution produced: the JSON value fed back to the model as
/// the function response, plus the typed state mutations to commit.
#[derive(Debug, Clone)]
pub struct ToolOutcome {
    pub response: Value,
    pub deltas: Vec<StateDelta>,
}

impl ToolOutcome {
    /// The bare `{"status": "success"}` acknowledgment.
    pub fn success() -> Self {
        Self { response: serde_json::json!({ "status": "success" }), deltas: Vec::new() }
    }

    pub fn with_response(response: Value) -> Self {
        Self { response, deltas: Vec::new() }
    }

    pub fn with_delta(mut self, delta: StateDelta) -> Self {
        self.deltas.push(delta);
        self
    }
}

/// A function the model may invoke during the planner's turn.
#[async_trait]
pub trait Tool: Send + Sync {
    fn name(&self) -> &str;
    fn description(&self) -> &str;

    /// JSON schema for the tool's arguments, or None for a no-argument
    /// tool.
    fn parameters_schema(&self) -> Option<Value> {
        None
    }

    async fn execute(&self, args: Value) -> Result<ToolOutcome>;

    /// The function declaration offered to the model.
    fn declaration(&self) -> Value {
        let mut decl = serde_json::json!({
            "name": self.name(),
            "description": self.description(),
        });
        if let Some(params) = self.parameters_schema() {
            decl["parameters"] = params;
        }
        decl
    }
}

//! Function tools the planner exposes to the model.

use async_trait::async_trait;
use safehike_core::{HikeError, Result, StateDelta, Tool, ToolOutcome};
use serde_json::Value;

/// Today's date formatted `YYYY-MM-DD`, in local time.
pub fn current_date_string() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// Records the mountain the user is going to hike.
pub struct SetMountainTool;

#[async_trait]
impl Tool for SetMountainTool {
    fn name(&self) -> &str {
        "set_mountain"
    }

    fn description(&self) -> &str {
        "Records the mountain the user is going to hike."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(serde_json::json!({
            "type": "object",
            "properties": {
                "mountain": {
                    "type": "string",
                    "description": "The name of the mountain."
                }
            },
            "required": ["mountain"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<ToolOutcome> {
        let mountain = args["mountain"]
            .as_str()
            .ok_or_else(|| HikeError::Tool("set_mountain requires a 'mountain' string".into()))?
            .to_string();
        Ok(ToolOutcome::success().with_delta(StateDelta::Mountain(mountain)))
    }
}

/// Records the hiking dates. The list is stored verbatim: order and element
/// values are preserved, and no format validation happens here — the model
/// is responsible for `YYYY-MM-DD` formatting.
pub struct SetHikingDatesTool;

#[async_trait]
impl Tool for SetHikingDatesTool {
    fn name(&self) -> &str {
        "set_hiking_dates"
    }

    fn description(&self) -> &str {
        "Records the hiking dates of the user's hike, as a list of 'YYYY-MM-DD' strings."
    }

    fn parameters_schema(&self) -> Option<Value> {
        Some(serde_json::json!({
            "type": "object",
            "properties": {
                "hiking_dates": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "The list of hiking dates in 'YYYY-MM-DD' format."
                }
            },
            "required": ["hiking_dates"]
        }))
    }

    async fn execute(&self, args: Value) -> Result<ToolOutcome> {
        let dates = args["hiking_dates"]
            .as_array()
            .ok_or_else(|| {
                HikeError::Tool("set_hiking_dates requires a 'hiking_dates' array".into())
            })?
            .iter()
            .map(|v| {
                v.as_str().map(str::to_string).ok_or_else(|| {
                    HikeError::Tool("hiking_dates entries must be strings".into())
                })
            })
            .collect::<Result<Vec<String>>>()?;
        Ok(ToolOutcome::success().with_delta(StateDelta::HikingDates(dates)))
    }
}

/// Returns today's date. Pure: commits nothing to state.
pub struct GetCurrentDateTool;

#[async_trait]
impl Tool for GetCurrentDateTool {
    fn name(&self) -> &str {
        "get_current_date"
    }

    fn description(&self) -> &str {
        "Returns the current date in 'YYYY-MM-DD' format."
    }

    async fn execute(&self, _args: Value) -> Result<ToolOutcome> {
        Ok(ToolOutcome::with_response(serde_json::json!({
            "status": "success",
            "current_date": current_date_string(),
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use safehike_core::HikeState;

    #[tokio::test]
    async fn test_set_mountain_roundtrip() {
        let outcome = SetMountainTool
            .execute(serde_json::json!({ "mountain": "富士山" }))
            .await
            .unwrap();
        assert_eq!(outcome.response["status"], "success");

        let mut state = HikeState::default();
        state.apply_all(&outcome.deltas);
        assert_eq!(state.mountain.as_deref(), Some("富士山"));
    }

    #[tokio::test]
    async fn test_set_mountain_overwrites() {
        let mut state = HikeState::default();
        for name in ["高尾山", "富士山"] {
            let outcome = SetMountainTool
                .execute(serde_json::json!({ "mountain": name }))
                .await
                .unwrap();
            state.apply_all(&outcome.deltas);
        }
        assert_eq!(state.mountain.as_deref(), Some("富士山"));
    }

    #[tokio::test]
    async fn test_set_mountain_rejects_missing_argument() {
        let result = SetMountainTool.execute(serde_json::json!({})).await;
        assert!(matches!(result, Err(HikeError::Tool(_))));
    }

    #[tokio::test]
    async fn test_set_hiking_dates_preserves_order_and_values() {
        let dates = serde_json::json!({
            "hiking_dates": ["2025-07-12", "2025-07-10", "not-even-a-date"]
        });
        let outcome = SetHikingDatesTool.execute(dates).await.unwrap();

        let mut state = HikeState::default();
        state.apply_all(&outcome.deltas);
        // Stored verbatim: order kept, no validation or reformatting.
        assert_eq!(
            state.hiking_dates,
            vec!["2025-07-12", "2025-07-10", "not-even-a-date"]
        );
    }

    #[tokio::test]
    async fn test_set_hiking_dates_rejects_non_string_entries() {
        let result = SetHikingDatesTool
            .execute(serde_json::json!({ "hiking_dates": [20250710] }))
            .await;
        assert!(matches!(result, Err(HikeError::Tool(_))));
    }

    #[tokio::test]
    async fn test_get_current_date_matches_today() {
        let outcome = GetCurrentDateTool.execute(serde_json::json!({})).await.unwrap();
        let date = outcome.response["current_date"].as_str().unwrap();

        assert_eq!(date, current_date_string());
        assert_eq!(date.len(), 10);
        let bytes = date.as_bytes();
        assert_eq!(bytes[4], b'-');
        assert_eq!(bytes[7], b'-');
        assert!(date.chars().filter(|c| c.is_ascii_digit()).count() == 8);
        assert!(outcome.deltas.is_empty());
    }

    #[test]
    fn test_declarations_carry_schemas() {
        let decl = SetHikingDatesTool.declaration();
        assert_eq!(decl["name"], "set_hiking_dates");
        assert_eq!(decl["parameters"]["properties"]["hiking_dates"]["type"], "array");

        let no_params = GetCurrentDateTool.declaration();
        assert!(no_params.get("parameters").is_none());
    }
}

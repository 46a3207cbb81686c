use futures::StreamExt;
use safehike_agent::{
    AggregatorAgent, HikingWorkflow, PlannerAgent, ResearchAgent, ResearchTeam,
    current_date_string,
};
use safehike_core::{
    Agent, Content, Event, HikeState, InvocationContext, LlmResponse, Part, Result, StateDelta,
};
use safehike_model::MockLlm;
use std::sync::Arc;

fn function_call_turn(calls: Vec<(&str, serde_json::Value)>) -> Vec<LlmResponse> {
    let mut content = Content::new("model");
    for (name, args) in calls {
        content.parts.push(Part::function_call(name, args));
    }
    vec![LlmResponse::new(content)]
}

fn report_json() -> String {
    serde_json::json!({
        "summary": "富士山ハイキングの計画です。",
        "risk_emojis": ["fall"],
        "weather": [{
            "date": "2025-07-10",
            "high_temp": "15°C",
            "low_temp": "5°C",
            "precipitation_chance": "10%",
            "wind_speed": "8m/s"
        }],
        "news": ["特記事項なし。"],
        "trails": [{
            "name": "吉田ルート",
            "difficulty": "中級",
            "ascent_time": "6時間",
            "descent_time": "4時間"
        }],
        "risk_analysis": [{
            "risk": "fall",
            "relevance": "岩場で滑落の恐れがあります。",
            "mitigation": "登山靴と手袋を着用する。"
        }],
        "links": [{ "title": "Yamap", "url": "https://yamap.com/" }]
    })
    .to_string()
}

fn test_workflow() -> Arc<HikingWorkflow> {
    let team = ResearchTeam::new(vec![
        Arc::new(ResearchAgent::weather(Arc::new(
            MockLlm::new("weather").with_text_turn("晴れ。"),
        ))),
        Arc::new(ResearchAgent::news(Arc::new(
            MockLlm::new("news").with_text_turn("事故の報告なし。"),
        ))),
        Arc::new(ResearchAgent::links(Arc::new(
            MockLlm::new("links").with_text_turn("- [Yamap](https://yamap.com/)"),
        ))),
    ]);
    Arc::new(HikingWorkflow::from_stages(vec![
        Arc::new(team),
        Arc::new(ResearchAgent::trail(Arc::new(
            MockLlm::new("trail").with_text_turn("吉田ルートが定番。"),
        ))),
        Arc::new(AggregatorAgent::new(Arc::new(
            MockLlm::new("aggregator").with_text_turn(report_json()),
        ))),
    ]))
}

async fn collect(planner: &PlannerAgent, ctx: Arc<InvocationContext>) -> Vec<Result<Event>> {
    let mut stream = planner.run(ctx).await.unwrap();
    let mut items = Vec::new();
    while let Some(item) = stream.next().await {
        items.push(item);
    }
    items
}

#[tokio::test]
async fn full_turn_records_facts_then_delegates_and_reports() {
    let planner_mock = Arc::new(
        MockLlm::new("planner")
            .with_turn(function_call_turn(vec![
                ("set_mountain", serde_json::json!({ "mountain": "富士山" })),
                (
                    "set_hiking_dates",
                    serde_json::json!({ "hiking_dates": ["2025-07-10", "2025-07-11"] }),
                ),
            ]))
            .with_turn(function_call_turn(vec![(
                "start_research",
                serde_json::json!({}),
            )])),
    );
    let planner = PlannerAgent::new(planner_mock.clone(), test_workflow());

    let ctx = Arc::new(InvocationContext::new(
        "inv-1",
        "user-1",
        "session-1",
        Content::new("user").with_text("7月10日と11日に富士山に登りたい"),
    ));
    let items = collect(&planner, ctx.clone()).await;
    let events: Vec<Event> = items.into_iter().map(|i| i.expect("turn should not error")).collect();

    // Facts recorded through the tools, exactly as given.
    let state = ctx.state();
    assert_eq!(state.mountain.as_deref(), Some("富士山"));
    assert_eq!(state.hiking_dates, vec!["2025-07-10", "2025-07-11"]);

    // The hand-off is visible in the event log.
    assert!(events.iter().any(|e| e.actions.start_research));

    // The workflow ran to completion and produced the rendered report.
    assert!(state.hiking_report.is_some());
    let final_text = events.last().unwrap().content().unwrap().text();
    assert!(final_text.contains("# ハイキングレポート"));

    // The second model call saw the function responses from the first.
    let requests = planner_mock.requests();
    assert_eq!(requests.len(), 2);
    let function_roles = requests[1]
        .contents
        .iter()
        .filter(|c| c.role == "function")
        .count();
    assert_eq!(function_roles, 2);
}

#[tokio::test]
async fn turn_reset_clears_trail_and_stamps_today() {
    let planner_mock =
        Arc::new(MockLlm::new("planner").with_text_turn("どの山に登る予定ですか？"));
    let planner = PlannerAgent::new(planner_mock, test_workflow());

    // State left over from an earlier turn about a different mountain.
    let stale = HikeState {
        mountain: Some("石割山".to_string()),
        trail: Some("403段の石段ルート".to_string()),
        current_date: Some("2020-01-01".to_string()),
        ..Default::default()
    };
    let ctx = Arc::new(
        InvocationContext::new(
            "inv-2",
            "user-1",
            "session-1",
            Content::new("user").with_text("今度は富士山はどう？"),
        )
        .with_state(stale),
    );

    let items = collect(&planner, ctx.clone()).await;
    let first = items[0].as_ref().unwrap();
    assert_eq!(first.actions.deltas.len(), 2);
    assert!(matches!(first.actions.deltas[0], StateDelta::Trail(None)));

    let state = ctx.state();
    assert_eq!(state.trail, None);
    assert_eq!(state.current_date.as_deref(), Some(current_date_string().as_str()));
}

#[tokio::test]
async fn conversational_reply_ends_with_consolidated_content() {
    let planner_mock = Arc::new(MockLlm::new("planner").with_turn(vec![
        LlmResponse {
            content: Some(Content::new("model").with_text("どの山に")),
            partial: true,
            ..Default::default()
        },
        LlmResponse::text("登る予定ですか？"),
    ]));
    let planner = PlannerAgent::new(planner_mock, test_workflow());

    let ctx = Arc::new(InvocationContext::new(
        "inv-3",
        "user-1",
        "session-1",
        Content::new("user").with_text("ハイキングに行きたい"),
    ));
    let items = collect(&planner, ctx).await;
    let events: Vec<Event> = items.into_iter().map(|i| i.unwrap()).collect();

    let final_event = events.last().unwrap();
    assert!(final_event.llm_response.turn_complete);
    assert_eq!(
        final_event.content().unwrap().text(),
        "どの山に登る予定ですか？"
    );
}

#[tokio::test]
async fn unknown_tool_call_is_reported_back_to_the_model() {
    let planner_mock = Arc::new(
        MockLlm::new("planner")
            .with_turn(function_call_turn(vec![(
                "set_weather",
                serde_json::json!({}),
            )]))
            .with_text_turn("失礼しました。"),
    );
    let planner = PlannerAgent::new(planner_mock.clone(), test_workflow());

    let ctx = Arc::new(InvocationContext::new(
        "inv-4",
        "user-1",
        "session-1",
        Content::new("user").with_text("hi"),
    ));
    let items = collect(&planner, ctx).await;
    assert!(items.iter().all(|i| i.is_ok()));

    let requests = planner_mock.requests();
    let function_response = requests[1]
        .contents
        .iter()
        .find(|c| c.role == "function")
        .expect("function response fed back");
    let Part::FunctionResponse { response, .. } = &function_response.parts[0] else {
        panic!("expected a function response part");
    };
    assert!(response["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn runaway_tool_loop_hits_the_iteration_bound() {
    let mut planner_mock = MockLlm::new("planner");
    for _ in 0..3 {
        planner_mock = planner_mock.with_turn(function_call_turn(vec![(
            "get_current_date",
            serde_json::json!({}),
        )]));
    }
    let planner =
        PlannerAgent::new(Arc::new(planner_mock), test_workflow()).with_max_iterations(2);

    let ctx = Arc::new(InvocationContext::new(
        "inv-5",
        "user-1",
        "session-1",
        Content::new("user").with_text("hi"),
    ));
    let items = collect(&planner, ctx).await;
    assert!(items.last().unwrap().is_err());
}

use futures::StreamExt;
use safehike_core::{Content, Llm, LlmRequest};
use safehike_model::gemini::{GeminiConfig, GeminiModel};
use safehike_model::retry::RetryConfig;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

fn success_body() -> serde_json::Value {
    serde_json::json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": "晴れ時々曇り" }] },
            "finishReason": "STOP"
        }]
    })
}

async fn model_for(server: &MockServer) -> GeminiModel {
    let config = GeminiConfig::new("test-key", "gemini-2.5-flash")
        .with_base_url(format!("{}/v1beta", server.uri()));
    GeminiModel::from_config(config)
        .unwrap()
        .with_retry_config(
            RetryConfig::default()
                .with_initial_delay(Duration::ZERO)
                .with_max_delay(Duration::ZERO),
        )
}

#[tokio::test]
async fn generate_content_returns_model_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let model = model_for(&server).await;
    let request = LlmRequest::new(model.name(), vec![Content::new("user").with_text("天気は？")]);

    let mut stream = model.generate_content(request, false).await.unwrap();
    let response = stream.next().await.unwrap().unwrap();
    assert_eq!(response.content.unwrap().text(), "晴れ時々曇り");
    assert!(response.turn_complete);
}

#[tokio::test]
async fn request_body_carries_search_tool() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:generateContent"))
        .and(|req: &Request| {
            let body: serde_json::Value = serde_json::from_slice(&req.body).unwrap();
            body["tools"][0]["googleSearch"].is_object()
        })
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let model = model_for(&server).await;
    let request = LlmRequest::new(model.name(), vec![Content::new("user").with_text("q")])
        .with_google_search(true);

    let mut stream = model.generate_content(request, false).await.unwrap();
    assert!(stream.next().await.unwrap().is_ok());
}

#[tokio::test]
async fn retries_transient_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let model = model_for(&server).await;
    let request = LlmRequest::new(model.name(), vec![Content::new("user").with_text("q")]);

    let mut stream = model.generate_content(request, false).await.unwrap();
    let response = stream.next().await.unwrap().unwrap();
    assert!(response.content.is_some());
}

#[tokio::test]
async fn does_not_retry_client_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .expect(1)
        .mount(&server)
        .await;

    let model = model_for(&server).await;
    let request = LlmRequest::new(model.name(), vec![Content::new("user").with_text("q")]);

    let mut stream = model.generate_content(request, false).await.unwrap();
    let result = stream.next().await.unwrap();
    assert!(result.is_err());
}

#[tokio::test]
async fn streaming_parses_sse_chunks() {
    let sse_body = concat!(
        "data: {\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"晴れ\"}]}}]}\n\n",
        "data: {\"candidates\":[{\"content\":{\"role\":\"model\",\"parts\":[{\"text\":\"のち雨\"}]},\"finishReason\":\"STOP\"}]}\n\n",
    );

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-2.5-flash:streamGenerateContent"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(sse_body),
        )
        .expect(1)
        .mount(&server)
        .await;

    let model = model_for(&server).await;
    let request = LlmRequest::new(model.name(), vec![Content::new("user").with_text("q")]);

    let mut stream = model.generate_content(request, true).await.unwrap();

    let first = stream.next().await.unwrap().unwrap();
    assert!(first.partial);
    assert_eq!(first.content.unwrap().text(), "晴れ");

    let second = stream.next().await.unwrap().unwrap();
    assert!(second.turn_complete);
    assert_eq!(second.content.unwrap().text(), "のち雨");

    assert!(stream.next().await.is_none());
}

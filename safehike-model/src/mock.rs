use safehike_core::{HikeError, Llm, LlmRequest, LlmResponse, LlmResponseStream, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Scripted model for tests. Each call to `generate_content` pops the next
/// script (a sequence of response chunks) and records the request so tests
/// can assert on prompt contents.
pub struct MockLlm {
    name: String,
    scripts: Mutex<VecDeque<Vec<LlmResponse>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlm {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scripts: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queue a full call's worth of response chunks.
    pub fn with_turn(self, responses: Vec<LlmResponse>) -> Self {
        self.scripts.lock().unwrap().push_back(responses);
        self
    }

    /// Queue a call that answers with a single completed text response.
    pub fn with_text_turn(self, text: impl Into<String>) -> Self {
        self.with_turn(vec![LlmResponse::text(text)])
    }

    /// Requests seen so far, in call order.
    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &str {
        &self.name
    }

    async fn generate_content(&self, req: LlmRequest, _stream: bool) -> Result<LlmResponseStream> {
        self.requests.lock().unwrap().push(req);

        let responses = self
            .scripts
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| HikeError::Model("MockLlm script exhausted".to_string()))?;

        let stream = async_stream::stream! {
            for response in responses {
                yield Ok(response);
            }
        };
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_mock_llm_pops_scripts_in_order() {
        let mock = MockLlm::new("test")
            .with_text_turn("first")
            .with_text_turn("second");

        let mut stream = mock
            .generate_content(LlmRequest::new("test", vec![]), false)
            .await
            .unwrap();
        let response = stream.next().await.unwrap().unwrap();
        assert_eq!(response.content.unwrap().text(), "first");

        let mut stream = mock
            .generate_content(LlmRequest::new("test", vec![]), false)
            .await
            .unwrap();
        let response = stream.next().await.unwrap().unwrap();
        assert_eq!(response.content.unwrap().text(), "second");
    }

    #[tokio::test]
    async fn test_mock_llm_records_requests() {
        let mock = MockLlm::new("test").with_text_turn("ok");
        let req = LlmRequest::new("test", vec![]).with_google_search(true);
        let _ = mock.generate_content(req, false).await.unwrap();

        let seen = mock.requests();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].google_search);
    }

    #[tokio::test]
    async fn test_mock_llm_errors_when_exhausted() {
        let mock = MockLlm::new("test");
        let result = mock.generate_content(LlmRequest::new("test", vec![]), false).await;
        assert!(result.is_err());
    }
}

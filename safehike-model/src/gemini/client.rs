use super::config::GeminiConfig;
use super::convert::{self, GenerateContentResponse};
use crate::retry::{RetryConfig, execute_with_retry, is_retryable_model_error, is_retryable_status_code};
use safehike_core::{FinishReason, HikeError, Llm, LlmRequest, LlmResponseStream, Result};
use async_stream::try_stream;
use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;

/// Gemini model handle over the REST API.
///
/// # Example
///
/// ```rust,ignore
/// use safehike_model::GeminiModel;
///
/// let model = GeminiModel::new(std::env::var("GOOGLE_API_KEY").unwrap(), "gemini-2.5-flash")?;
/// ```
pub struct GeminiModel {
    client: Client,
    config: GeminiConfig,
    retry_config: RetryConfig,
}

impl GeminiModel {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        Self::from_config(GeminiConfig::new(api_key, model))
    }

    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| HikeError::Model(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config, retry_config: RetryConfig::default() })
    }

    #[must_use]
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    fn api_url(&self, stream: bool) -> String {
        let base = self.config.effective_base_url().trim_end_matches('/');
        if stream {
            format!("{}/models/{}:streamGenerateContent?alt=sse", base, self.config.model)
        } else {
            format!("{}/models/{}:generateContent", base, self.config.model)
        }
    }
}

#[async_trait]
impl Llm for GeminiModel {
    fn name(&self) -> &str {
        &self.config.model
    }

    async fn generate_content(
        &self,
        request: LlmRequest,
        stream: bool,
    ) -> Result<LlmResponseStream> {
        let api_url = self.api_url(stream);
        let api_key = self.config.api_key.clone();
        let wire_request = convert::to_wire_request(&request);
        let client = self.client.clone();
        let retry_config = self.retry_config.clone();

        let response_stream = try_stream! {
            // Retries only cover request setup/execution. Stream failures after
            // the first byte are surfaced directly and not auto-replayed.
            let response = execute_with_retry(&retry_config, is_retryable_model_error, || {
                let client = client.clone();
                let api_url = api_url.clone();
                let api_key = api_key.clone();
                let wire_request = wire_request.clone();
                async move {
                    let response = client
                        .post(&api_url)
                        .header("x-goog-api-key", api_key)
                        .header("Content-Type", "application/json")
                        .json(&wire_request)
                        .send()
                        .await
                        .map_err(|e| HikeError::Model(format!("Gemini API request failed: {}", e)))?;

                    if !response.status().is_success() {
                        let status = response.status();
                        let error_text = response.text().await.unwrap_or_default();
                        let retryability = if is_retryable_status_code(status.as_u16()) {
                            "retryable"
                        } else {
                            "non-retryable"
                        };
                        return Err(HikeError::Model(format!(
                            "Gemini API error ({}, {}): {}",
                            status, retryability, error_text
                        )));
                    }

                    Ok(response)
                }
            })
            .await?;

            if stream {
                // Streaming mode - process SSE events line by line.
                let mut byte_stream = response.bytes_stream();
                let mut buffer = String::new();

                while let Some(chunk_result) = byte_stream.next().await {
                    let chunk = chunk_result
                        .map_err(|e| HikeError::Model(format!("Stream read error: {}", e)))?;

                    buffer.push_str(&String::from_utf8_lossy(&chunk));

                    while let Some(line_end) = buffer.find('\n') {
                        let line = buffer[..line_end].trim().to_string();
                        buffer = buffer[line_end + 1..].to_string();

                        if line.is_empty() || line == "data: [DONE]" {
                            continue;
                        }

                        if let Some(data) = line.strip_prefix("data: ") {
                            match serde_json::from_str::<GenerateContentResponse>(data) {
                                Ok(wire_response) => {
                                    let mut llm_response = convert::from_wire_response(&wire_response);
                                    let finished = llm_response.finish_reason.is_some();
                                    llm_response.partial = !finished;
                                    llm_response.turn_complete = finished;
                                    yield llm_response;
                                }
                                Err(e) => {
                                    tracing::warn!("Failed to parse Gemini chunk: {} - {}", e, data);
                                }
                            }
                        }
                    }
                }
            } else {
                // Non-streaming mode.
                let response_text = response.text().await
                    .map_err(|e| HikeError::Model(format!("Failed to read response: {}", e)))?;

                let wire_response: GenerateContentResponse = serde_json::from_str(&response_text)
                    .map_err(|e| HikeError::Model(format!(
                        "Failed to parse response: {} - {}",
                        e, response_text
                    )))?;

                let mut llm_response = convert::from_wire_response(&wire_response);
                if llm_response.finish_reason.is_none() {
                    llm_response.finish_reason = Some(FinishReason::Stop);
                }
                yield llm_response;
            }
        };

        Ok(Box::pin(response_stream))
    }
}

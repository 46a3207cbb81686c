//! Conversion between SafeHike request/response types and the Gemini wire
//! format.

use safehike_core::{
    CitationMetadata, CitationSource, Content, FinishReason, LlmRequest, LlmResponse, Part,
    UsageMetadata,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<WireGenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireContent {
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

/// Gemini parts are a struct of optional fields, not a tagged union.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<WireFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_response: Option<WireFunctionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionResponse {
    pub name: String,
    #[serde(default)]
    pub response: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTool {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_declarations: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub google_search: Option<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub usage_metadata: Option<WireUsageMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<WireContent>,
    pub finish_reason: Option<String>,
    pub grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUsageMetadata {
    #[serde(default)]
    pub prompt_token_count: i32,
    #[serde(default)]
    pub candidates_token_count: i32,
    #[serde(default)]
    pub total_token_count: i32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireGroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireGroundingChunk {
    pub web: Option<WireWebSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WireWebSource {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Build the wire request. Function-response contents take Gemini's "user"
/// role; everything else passes through.
pub fn to_wire_request(req: &LlmRequest) -> GenerateContentRequest {
    let contents = req.contents.iter().map(content_to_wire).collect();

    let mut tools = Vec::new();
    if !req.function_declarations.is_empty() {
        tools.push(WireTool {
            function_declarations: Some(req.function_declarations.clone()),
            google_search: None,
        });
    }
    if req.google_search {
        tools.push(WireTool {
            function_declarations: None,
            google_search: Some(serde_json::json!({})),
        });
    }

    let generation_config = req.config.as_ref().map(|config| WireGenerationConfig {
        temperature: config.temperature,
        top_p: config.top_p,
        top_k: config.top_k,
        max_output_tokens: config.max_output_tokens,
        // Structured output requires the JSON mime type alongside the schema.
        response_mime_type: config.response_schema.as_ref().map(|_| "application/json".to_string()),
        response_schema: config.response_schema.clone(),
    });

    GenerateContentRequest {
        contents,
        tools: if tools.is_empty() { None } else { Some(tools) },
        generation_config,
    }
}

fn content_to_wire(content: &Content) -> WireContent {
    let role = match content.role.as_str() {
        "model" => "model",
        // Gemini only accepts "user" and "model"; tool results go back as user parts.
        _ => "user",
    };

    let parts = content
        .parts
        .iter()
        .map(|part| match part {
            Part::Text { text } => WirePart { text: Some(text.clone()), ..Default::default() },
            Part::FunctionCall { name, args } => WirePart {
                function_call: Some(WireFunctionCall { name: name.clone(), args: args.clone() }),
                ..Default::default()
            },
            Part::FunctionResponse { name, response } => WirePart {
                function_response: Some(WireFunctionResponse {
                    name: name.clone(),
                    response: response.clone(),
                }),
                ..Default::default()
            },
        })
        .collect();

    WireContent { role: role.to_string(), parts }
}

pub fn from_wire_response(resp: &GenerateContentResponse) -> LlmResponse {
    let candidate = resp.candidates.first();

    let content = candidate.and_then(|c| c.content.as_ref()).map(|wire| {
        let parts = wire
            .parts
            .iter()
            .filter_map(|p| {
                if let Some(text) = &p.text {
                    Some(Part::Text { text: text.clone() })
                } else if let Some(call) = &p.function_call {
                    Some(Part::FunctionCall { name: call.name.clone(), args: call.args.clone() })
                } else {
                    p.function_response.as_ref().map(|fr| Part::FunctionResponse {
                        name: fr.name.clone(),
                        response: fr.response.clone(),
                    })
                }
            })
            .collect();
        Content { role: "model".to_string(), parts }
    });

    let citation_metadata = candidate
        .and_then(|c| c.grounding_metadata.as_ref())
        .map(|grounding| CitationMetadata {
            citation_sources: grounding
                .grounding_chunks
                .iter()
                .filter_map(|chunk| chunk.web.as_ref())
                .map(|web| CitationSource { uri: web.uri.clone(), title: web.title.clone() })
                .collect(),
        })
        .filter(|c| !c.citation_sources.is_empty());

    let finish_reason = candidate.and_then(|c| c.finish_reason.as_deref()).map(|fr| match fr {
        "STOP" => FinishReason::Stop,
        "MAX_TOKENS" => FinishReason::MaxTokens,
        "SAFETY" => FinishReason::Safety,
        "RECITATION" => FinishReason::Recitation,
        _ => FinishReason::Other,
    });

    let usage_metadata = resp.usage_metadata.as_ref().map(|u| UsageMetadata {
        prompt_token_count: u.prompt_token_count,
        candidates_token_count: u.candidates_token_count,
        total_token_count: u.total_token_count,
    });

    LlmResponse {
        content,
        usage_metadata,
        finish_reason,
        citation_metadata,
        partial: false,
        turn_complete: true,
    }
}

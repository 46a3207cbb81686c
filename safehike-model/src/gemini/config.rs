use serde::{Deserialize, Serialize};

/// Default Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Configuration for the Gemini API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiConfig {
    /// Gemini API key.
    pub api_key: String,
    /// Model name.
    pub model: String,
    /// Optional custom base URL (used by tests to point at a local server).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self { api_key: String::new(), model: "gemini-2.5-flash".to_string(), base_url: None }
    }
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self { api_key: api_key.into(), model: model.into(), ..Default::default() }
    }

    /// Config for the default flash model.
    pub fn flash(api_key: impl Into<String>) -> Self {
        Self::new(api_key, "gemini-2.5-flash")
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn effective_base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(GEMINI_API_BASE)
    }
}

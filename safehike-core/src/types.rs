use serde::{Deserialize, Serialize};

/// One message in a model conversation. `role` is `"user"`, `"model"`, or
/// `"function"` (tool results fed back to the model).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    FunctionCall {
        name: String,
        args: serde_json::Value,
    },
    FunctionResponse {
        name: String,
        response: serde_json::Value,
    },
}

impl Content {
    pub fn new(role: impl Into<String>) -> Self {
        Self { role: role.into(), parts: Vec::new() }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(Part::Text { text: text.into() });
        self
    }

    /// Concatenation of all text parts. Empty when the content carries only
    /// function calls or responses.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for part in &self.parts {
            if let Part::Text { text } = part {
                out.push_str(text);
            }
        }
        out
    }

    /// Name/args pairs of every function call part, in order.
    pub fn function_calls(&self) -> Vec<(String, serde_json::Value)> {
        self.parts
            .iter()
            .filter_map(|p| match p {
                Part::FunctionCall { name, args } => Some((name.clone(), args.clone())),
                _ => None,
            })
            .collect()
    }
}

impl Part {
    /// Returns the text if this is a Text part, None otherwise.
    pub fn text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn text_part(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn function_call(name: impl Into<String>, args: serde_json::Value) -> Self {
        Part::FunctionCall { name: name.into(), args }
    }

    pub fn function_response(name: impl Into<String>, response: serde_json::Value) -> Self {
        Part::FunctionResponse { name: name.into(), response }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_creation() {
        let content = Content::new("user").with_text("Hello");
        assert_eq!(content.role, "user");
        assert_eq!(content.parts.len(), 1);
    }

    #[test]
    fn test_content_text_concatenates_parts() {
        let mut content = Content::new("model").with_text("foo");
        content.parts.push(Part::function_call("tool", serde_json::json!({})));
        content.parts.push(Part::text_part("bar"));
        assert_eq!(content.text(), "foobar");
    }

    #[test]
    fn test_content_function_calls() {
        let mut content = Content::new("model");
        content.parts.push(Part::function_call("set_mountain", serde_json::json!({"mountain": "富士山"})));
        let calls = content.function_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "set_mountain");
    }

    #[test]
    fn test_part_text_accessor() {
        let text_part = Part::text_part("hello");
        assert_eq!(text_part.text(), Some("hello"));

        let call_part = Part::function_call("f", serde_json::json!({}));
        assert_eq!(call_part.text(), None);
    }

    #[test]
    fn test_part_serialization_roundtrip() {
        let parts = vec![
            Part::text_part("test"),
            Part::function_call("f", serde_json::json!({"a": 1})),
            Part::function_response("f", serde_json::json!({"status": "success"})),
        ];
        let json = serde_json::to_string(&parts).unwrap();
        let decoded: Vec<Part> = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, parts);
    }
}

//! OpenRouter chat-completions API types.
//!
//! OpenRouter speaks the OpenAI chat-completions dialect. These structures
//! model exactly the fields Marketeer sends and reads, not the full API
//! surface; unknown response fields are ignored on deserialization.

use serde::{Deserialize, Serialize};

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub response_format: ResponseFormat,
}

/// A single chat message on the wire. The system instruction travels as
/// the leading message with role `"system"`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Response format marker. Marketeer always requests plain text.
#[derive(Debug, Clone, Serialize)]
pub struct ResponseFormat {
    #[serde(rename = "type")]
    pub format_type: String,
}

impl ResponseFormat {
    pub fn text() -> Self {
        Self {
            format_type: "text".to_string(),
        }
    }
}

/// Response body from `POST /v1/chat/completions`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    pub message: ChoiceMessage,
}

/// The assistant message inside a choice.
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceMessage {
    pub content: String,
}

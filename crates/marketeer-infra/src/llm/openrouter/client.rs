//! OpenRouterProvider -- concrete [`CompletionProvider`] implementation for
//! the OpenRouter gateway.
//!
//! Sends requests to `/v1/chat/completions` with bearer authentication and
//! the attribution headers OpenRouter uses for app rankings.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.
//!
//! Error classification matters here: the turn loop retries
//! [`CompletionError::Decode`] but fails immediately on everything else.
//! Anything that prevents reading a body (connect failure, timeout, non-2xx
//! status, truncated read) is Transport; a body that is not JSON at all is
//! Decode; valid JSON of the wrong shape is Unexpected and terminal, since
//! a retry is unlikely to change what the gateway sends back.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use marketeer_core::llm::provider::CompletionProvider;
use marketeer_types::error::CompletionError;
use marketeer_types::llm::{CompletionRequest, CompletionResponse, MessageRole};

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ResponseFormat};

/// OpenRouter chat-completion provider.
///
/// # API Key Security
///
/// The API key is stored as a [`SecretString`] and is only exposed when
/// constructing the `Authorization` header. It never appears in Debug
/// output, Display output, or tracing logs.
pub struct OpenRouterProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl OpenRouterProvider {
    /// Attribution headers; OpenRouter uses these for its app leaderboard.
    const REFERER: &'static str = "https://github.com/marketeer/marketeer";
    const TITLE: &'static str = "Marketeer";

    /// Hard ceiling on one completion round trip.
    const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

    /// Create a new OpenRouter provider.
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://openrouter.ai/api".to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Build the full API URL for a given path.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Convert a generic [`CompletionRequest`] into the wire shape. The
    /// system instruction becomes the leading `"system"` message.
    fn to_wire_request(&self, request: &CompletionRequest) -> ChatCompletionRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(ChatMessage {
                role: MessageRole::System.to_string(),
                content: system.clone(),
            });
        }
        messages.extend(request.messages.iter().map(|m| ChatMessage {
            role: m.role.to_string(),
            content: m.content.clone(),
        }));

        ChatCompletionRequest {
            model: request.model.clone(),
            messages,
            temperature: request.temperature,
            response_format: ResponseFormat::text(),
        }
    }
}

// OpenRouterProvider intentionally does NOT derive Debug to prevent
// accidental exposure of internal state.

impl CompletionProvider for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, CompletionError> {
        let body = self.to_wire_request(request);
        let url = self.url("/v1/chat/completions");
        debug!(model = %body.model, messages = body.messages.len(), "sending chat completion request");

        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", Self::REFERER)
            .header("X-Title", Self::TITLE)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Transport(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Transport(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| CompletionError::Transport(format!("failed to read response body: {e}")))?;

        parse_completion(&text)
    }
}

/// Extract the assistant text from a raw chat-completions body.
///
/// Malformed JSON is [`CompletionError::Decode`] (retryable); a well-formed
/// body with the wrong shape or no choices is
/// [`CompletionError::Unexpected`] (terminal).
fn parse_completion(body: &str) -> Result<CompletionResponse, CompletionError> {
    // Two-stage parse so only garbled bodies count as decode failures.
    let decoded: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| CompletionError::Decode(format!("failed to parse completion body: {e}")))?;

    let parsed: ChatCompletionResponse = serde_json::from_value(decoded).map_err(|e| {
        CompletionError::Unexpected(format!("completion body had unexpected shape: {e}"))
    })?;

    let choice = parsed
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| CompletionError::Unexpected("completion had no choices".to_string()))?;

    Ok(CompletionResponse {
        content: choice.message.content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketeer_types::llm::Message;

    fn make_provider() -> OpenRouterProvider {
        OpenRouterProvider::new(SecretString::from("test-key-not-real"))
    }

    fn make_request(system: Option<&str>) -> CompletionRequest {
        CompletionRequest {
            model: "google/palm-2-chat-bison".to_string(),
            messages: vec![
                Message::user("Should I buy AAPL?"),
                Message::assistant("HOLD for now."),
            ],
            system: system.map(str::to_string),
            temperature: Some(0.4),
        }
    }

    #[test]
    fn test_provider_name() {
        assert_eq!(make_provider().name(), "openrouter");
    }

    #[test]
    fn test_base_url_override() {
        let provider = make_provider().with_base_url("http://localhost:8080".to_string());
        assert_eq!(
            provider.url("/v1/chat/completions"),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_to_wire_request_prepends_system_message() {
        let provider = make_provider();
        let wire = provider.to_wire_request(&make_request(Some("Be a financial advisor.")));

        assert_eq!(wire.messages.len(), 3);
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(wire.messages[0].content, "Be a financial advisor.");
        assert_eq!(wire.messages[1].role, "user");
        assert_eq!(wire.messages[2].role, "assistant");
        assert_eq!(wire.temperature, Some(0.4));
        assert_eq!(wire.response_format.format_type, "text");
    }

    #[test]
    fn test_to_wire_request_without_system() {
        let provider = make_provider();
        let wire = provider.to_wire_request(&make_request(None));

        assert_eq!(wire.messages.len(), 2);
        assert_eq!(wire.messages[0].role, "user");
    }

    #[test]
    fn test_parse_completion_extracts_first_choice() {
        let body = r#"{
            "id": "gen-abc123",
            "choices": [
                {"message": {"role": "assistant", "content": "BUY the dip."}},
                {"message": {"role": "assistant", "content": "second choice"}}
            ],
            "usage": {"prompt_tokens": 100, "completion_tokens": 5}
        }"#;
        let response = parse_completion(body).unwrap();
        assert_eq!(response.content, "BUY the dip.");
    }

    #[test]
    fn test_parse_completion_malformed_body_is_decode() {
        let result = parse_completion("<html>502 Bad Gateway</html>");
        match result {
            Err(CompletionError::Decode(detail)) => {
                assert!(detail.contains("failed to parse completion body"));
            }
            other => panic!("expected Decode error, got: {other:?}"),
        }
    }

    #[test]
    fn test_parse_completion_decode_is_retryable() {
        let error = parse_completion("{truncated").unwrap_err();
        assert!(error.is_retryable());
    }

    #[test]
    fn test_parse_completion_empty_choices_is_unexpected() {
        let error = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(error, CompletionError::Unexpected(_)));
        assert!(!error.is_retryable());
    }

    #[test]
    fn test_parse_completion_wrong_shape_is_terminal() {
        // Valid JSON with no extractable content is not worth a retry.
        let error = parse_completion(r#"{"choices": [{"message": {"role": "assistant"}}]}"#)
            .unwrap_err();
        assert!(matches!(error, CompletionError::Unexpected(_)));
        assert!(!error.is_retryable());
    }
}

//! CompletionProvider trait definition.
//!
//! This is the port the infrastructure layer implements. A provider makes
//! one plain (non-streaming) completion call; the typewriter animation is
//! produced locally from the full response, so no stream method exists.

use marketeer_types::error::CompletionError;
use marketeer_types::llm::{CompletionRequest, CompletionResponse};

/// Trait for chat-completion backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The error
/// type carries the retry classification: `Decode` failures may be retried
/// by the turn engine, everything else ends the turn.
///
/// Implementations live in marketeer-infra (e.g., `OpenRouterProvider`).
pub trait CompletionProvider: Send + Sync {
    /// Human-readable provider name (e.g., "openrouter").
    fn name(&self) -> &str;

    /// Send a completion request and receive the extracted response text.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, CompletionError>> + Send;
}

//! Completion provider implementations.
//!
//! Concrete implementations of the [`CompletionProvider`] trait defined in
//! `marketeer-core`. OpenRouter is the only backend today; it speaks the
//! OpenAI chat-completions dialect, so other gateways would only need a
//! different base URL.
//!
//! [`CompletionProvider`]: marketeer_core::llm::provider::CompletionProvider

pub mod openrouter;

pub use openrouter::OpenRouterProvider;

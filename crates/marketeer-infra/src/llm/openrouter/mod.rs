//! OpenRouter chat-completion provider.
//!
//! This module provides the [`OpenRouterProvider`] which implements the
//! [`CompletionProvider`](marketeer_core::llm::provider::CompletionProvider)
//! trait against the OpenRouter `/v1/chat/completions` endpoint.

pub mod client;
pub mod types;

pub use client::OpenRouterProvider;

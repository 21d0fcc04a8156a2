//! Infrastructure layer for Marketeer.
//!
//! Contains the concrete implementation of the completion-provider port
//! defined in `marketeer-core`: the OpenRouter HTTP adapter.

pub mod llm;

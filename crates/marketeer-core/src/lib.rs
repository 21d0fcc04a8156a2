//! Domain logic for Marketeer.
//!
//! This crate owns the conversation store, the advisor system prompt, the
//! response formatter and typewriter, and the turn engine that drives the
//! completion retry policy. It defines the `CompletionProvider` port that
//! the infrastructure layer implements -- it never performs I/O itself
//! beyond the clock.

pub mod advisor;
pub mod chat;
pub mod llm;

//! The advisor turn pipeline for Marketeer.
//!
//! This module owns everything between a submitted user prompt and the
//! assistant message that ends the turn: the system instruction, the
//! completion retry loop, the response formatter, and the typewriter frame
//! stream. Entry point: `turn::TurnEngine::run_turn`.

pub mod format;
pub mod prompt;
pub mod turn;
pub mod typewriter;

//! Interactive chat shell for Marketeer.
//!
//! This module implements the advisor chat loop: word-by-word streamed
//! responses with signal highlighting, an analysis spinner, the welcome
//! banner, and slash commands for adjusting settings mid-session. Entry
//! point: `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
pub mod renderer;

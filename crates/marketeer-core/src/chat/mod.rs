//! Conversation state for Marketeer chat sessions.

pub mod conversation;

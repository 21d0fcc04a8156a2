//! In-memory conversation store.
//!
//! A `Conversation` is the append-only transcript for one chat session. It
//! is seeded with a single assistant greeting, grows through `push_user` /
//! `push_assistant`, and can be reset back to a single seed message. Only
//! the trailing [`CONTEXT_WINDOW`] messages are ever sent upstream.

use marketeer_types::llm::Message;

/// Number of trailing messages included in each completion request.
pub const CONTEXT_WINDOW: usize = 4;

/// Assistant greeting seeded into a fresh conversation.
pub const WELCOME_MESSAGE: &str =
    "Welcome to your AI Investment Advisor! 💼 How can I help grow your portfolio today?";

/// Assistant greeting seeded after a reset.
pub const RESET_MESSAGE: &str = "Session cleared! Let's analyze new opportunities!";

/// Append-only transcript for a single session.
///
/// Messages are never edited or removed; the only mutation besides appends
/// is `reset`, which atomically replaces the transcript with a single seed.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// A fresh conversation holding exactly the welcome seed.
    pub fn new() -> Self {
        Self::seeded(WELCOME_MESSAGE)
    }

    fn seeded(seed: &str) -> Self {
        Self {
            messages: vec![Message::assistant(seed)],
        }
    }

    /// Replace the transcript with a single assistant reset seed.
    pub fn reset(&mut self) {
        *self = Self::seeded(RESET_MESSAGE);
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.messages.push(Message::user(content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(Message::assistant(content));
    }

    /// Full transcript, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The trailing slice sent upstream with each request. Older context is
    /// dropped silently; there is no summarization.
    pub fn window(&self) -> &[Message] {
        let start = self.messages.len().saturating_sub(CONTEXT_WINDOW);
        &self.messages[start..]
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Content of the most recent message, if any.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketeer_types::llm::MessageRole;

    #[test]
    fn test_new_conversation_holds_welcome_seed() {
        let conversation = Conversation::new();
        assert_eq!(conversation.len(), 1);
        let seed = conversation.last().unwrap();
        assert_eq!(seed.role, MessageRole::Assistant);
        assert_eq!(seed.content, WELCOME_MESSAGE);
    }

    #[test]
    fn test_pushes_append_in_order() {
        let mut conversation = Conversation::new();
        conversation.push_user("should I buy AAPL?");
        conversation.push_assistant("BUY on dips");

        let messages = conversation.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, MessageRole::User);
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[2].content, "BUY on dips");
    }

    #[test]
    fn test_reset_leaves_single_seed() {
        let mut conversation = Conversation::new();
        conversation.push_user("one");
        conversation.push_assistant("two");
        conversation.reset();

        assert_eq!(conversation.len(), 1);
        let seed = conversation.last().unwrap();
        assert_eq!(seed.role, MessageRole::Assistant);
        assert_eq!(seed.content, RESET_MESSAGE);
    }

    #[test]
    fn test_window_returns_whole_transcript_when_short() {
        let mut conversation = Conversation::new();
        conversation.push_user("hello");

        assert_eq!(conversation.window().len(), 2);
    }

    #[test]
    fn test_window_caps_at_trailing_four() {
        let mut conversation = Conversation::new();
        for i in 0..5 {
            conversation.push_user(format!("question {i}"));
            conversation.push_assistant(format!("answer {i}"));
        }

        let window = conversation.window();
        assert_eq!(window.len(), CONTEXT_WINDOW);
        assert_eq!(window[0].content, "question 3");
        assert_eq!(window[3].content, "answer 4");
    }
}

//! Async readline input handling for the chat loop.
//!
//! Wraps `rustyline_async::Readline` so the loop can await a line while
//! Ctrl+D and Ctrl+C arrive as explicit events instead of errors.

use rustyline_async::{Readline, ReadlineError, SharedWriter};

/// Events produced by the input handler.
#[derive(Debug)]
pub enum InputEvent {
    /// User submitted a message.
    Message(String),
    /// End of file (Ctrl+D).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Async input handler for the chat prompt.
pub struct ChatInput {
    rl: Readline,
}

impl ChatInput {
    /// Create a new input handler with the given prompt.
    ///
    /// The returned `SharedWriter` must stay alive for the duration of the
    /// session so the prompt repaints correctly around other output.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }

    /// Read one line of input, trimmed.
    ///
    /// Submitted lines are recorded in readline history so the up arrow
    /// recalls earlier questions.
    pub async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(rustyline_async::ReadlineEvent::Line(line)) => {
                let trimmed = line.trim().to_string();
                if !trimmed.is_empty() {
                    self.rl.add_history_entry(trimmed.clone());
                }
                InputEvent::Message(trimmed)
            }
            Ok(rustyline_async::ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(rustyline_async::ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(_) => InputEvent::Eof,
        }
    }

    /// Clear the terminal screen.
    pub fn clear(&mut self) {
        let _ = self.rl.clear();
    }
}

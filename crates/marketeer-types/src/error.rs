//! Error taxonomy for Marketeer.
//!
//! Two layers: `CompletionError` classifies a single provider call, and
//! `TurnError` is the terminal state of a whole user turn after the retry
//! policy has run its course. Only decode failures are retryable; transport
//! failures end the turn on the first occurrence.

use thiserror::Error;

/// Classification of a single chat-completion call.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The response body failed structural decoding (non-JSON or shape
    /// mismatch). Retryable.
    #[error("malformed completion body: {0}")]
    Decode(String),

    /// Connection, timeout, DNS, body-read, or non-success HTTP status.
    /// Terminal for the turn.
    #[error("transport failure: {0}")]
    Transport(String),

    /// Anything outside the two classes above, e.g. a well-formed body with
    /// no choices. Terminal for the turn.
    #[error("unexpected completion failure: {0}")]
    Unexpected(String),
}

impl CompletionError {
    /// Whether the retry policy may issue another call for this failure.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CompletionError::Decode(_))
    }
}

/// Terminal state of a user turn that did not produce a model response.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("no API credential configured")]
    MissingCredential,

    #[error("response decoding failed after {attempts} attempts: {last_error}")]
    DecodeExhausted { attempts: u32, last_error: String },

    #[error("market data connection error: {0}")]
    Transport(String),

    #[error("portfolio analysis failed: {0}")]
    Unexpected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_error_display() {
        let err = CompletionError::Decode("expected value at line 1".to_string());
        assert!(err.to_string().contains("malformed completion body"));

        let err = CompletionError::Transport("connection refused".to_string());
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_only_decode_is_retryable() {
        assert!(CompletionError::Decode(String::new()).is_retryable());
        assert!(!CompletionError::Transport(String::new()).is_retryable());
        assert!(!CompletionError::Unexpected(String::new()).is_retryable());
    }

    #[test]
    fn test_turn_error_display() {
        let err = TurnError::DecodeExhausted {
            attempts: 3,
            last_error: "EOF while parsing".to_string(),
        };
        let s = err.to_string();
        assert!(s.contains("3 attempts"));
        assert!(s.contains("EOF while parsing"));

        let err = TurnError::MissingCredential;
        assert!(err.to_string().contains("credential"));
    }
}

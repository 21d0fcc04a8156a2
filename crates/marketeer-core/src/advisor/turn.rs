//! The completion request loop: one user turn end to end.
//!
//! `TurnEngine::run_turn` takes a conversation whose last message is the
//! user's prompt and drives it to completion: build the request from the
//! trailing window, call the provider, retry decode failures up to the
//! configured cap, fail transport errors immediately, and stream the
//! success payload through the sink as typewriter frames. Exactly one
//! assistant message is appended per turn on every path.

use std::time::Duration;

use chrono::Local;
use tracing::{error, info, warn};

use marketeer_types::advisor::AdvisorSettings;
use marketeer_types::error::{CompletionError, TurnError};
use marketeer_types::llm::CompletionRequest;

use crate::advisor::format::{highlight_signals, strip_emphasis};
use crate::advisor::prompt::SystemPromptBuilder;
use crate::advisor::typewriter::Typewriter;
use crate::chat::conversation::Conversation;
use crate::llm::provider::CompletionProvider;

/// Pause between decode-failure retries.
pub const RETRY_PAUSE: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// Transcript placeholders
// ---------------------------------------------------------------------------

/// Appended when no API credential is configured.
pub const MISSING_CREDENTIAL_MESSAGE: &str = "API key required for market analysis.\n\
     Get started:\n  \
     1. Visit https://openrouter.ai/keys and create an account\n  \
     2. Export the key as OPENROUTER_API_KEY (or pass --api-key)\n  \
     3. Ask your question again";

/// Appended when every decode retry has been spent.
pub const DECODE_FAILURE_MESSAGE: &str = "Market data processing failed.\n\
     Troubleshooting:\n  \
     - Rephrase your query\n  \
     - Check market data inputs\n  \
     - Verify financial parameters";

/// Appended on any transport failure.
pub const TRANSPORT_FAILURE_MESSAGE: &str = "Market data feed unavailable - retry later";

/// Appended on failures outside the decode/transport classes.
pub const UNEXPECTED_FAILURE_MESSAGE: &str = "Financial analysis error - please retry";

// ---------------------------------------------------------------------------
// TurnSink
// ---------------------------------------------------------------------------

/// Consumer of turn output. The engine pushes frames and outcomes through
/// this; pacing (word delay, spinner teardown) belongs entirely to the
/// implementation.
pub trait TurnSink: Send {
    /// Cumulative partial text, one call per typewriter frame. Emitted
    /// before highlighting, so partials carry no escape sequences.
    fn partial(&mut self, text: &str) -> impl std::future::Future<Output = ()> + Send;

    /// The final highlighted text replacing the partial view.
    fn completed(&mut self, text: &str) -> impl std::future::Future<Output = ()> + Send;

    /// Terminal failure plus the placeholder that enters the transcript.
    fn failed(
        &mut self,
        error: &TurnError,
        placeholder: &str,
    ) -> impl std::future::Future<Output = ()> + Send;
}

// ---------------------------------------------------------------------------
// TurnReport
// ---------------------------------------------------------------------------

/// Outcome of one user turn.
#[derive(Debug)]
pub struct TurnReport {
    /// Number of provider calls made this turn.
    pub attempts: u32,
    /// Terminal failure, if the turn did not produce a model response.
    pub error: Option<TurnError>,
}

impl TurnReport {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

// ---------------------------------------------------------------------------
// TurnEngine
// ---------------------------------------------------------------------------

/// Drives the per-turn retry state machine against a completion provider.
///
/// Retry policy: decode failures are retried up to `settings.max_retries`
/// total calls with [`RETRY_PAUSE`] between them; transport and unexpected
/// failures end the turn on their first occurrence. The asymmetry is
/// deliberate -- a malformed body may be transient upstream flakiness, a
/// refused connection will not heal within the pause.
pub struct TurnEngine<P> {
    provider: Option<P>,
    retry_pause: Duration,
}

impl<P: CompletionProvider> TurnEngine<P> {
    /// `provider` is `None` when no credential was configured; every turn
    /// then short-circuits without a network call.
    pub fn new(provider: Option<P>) -> Self {
        Self {
            provider,
            retry_pause: RETRY_PAUSE,
        }
    }

    /// Override the pause between decode retries (tests pass zero).
    pub fn with_retry_pause(mut self, pause: Duration) -> Self {
        self.retry_pause = pause;
        self
    }

    pub fn has_provider(&self) -> bool {
        self.provider.is_some()
    }

    /// Run one user turn. The conversation's last message is the user's
    /// prompt; on return exactly one assistant message has been appended.
    pub async fn run_turn<S: TurnSink>(
        &self,
        conversation: &mut Conversation,
        settings: &AdvisorSettings,
        sink: &mut S,
    ) -> TurnReport {
        let Some(provider) = self.provider.as_ref() else {
            warn!("turn refused: no API credential configured");
            let error = TurnError::MissingCredential;
            sink.failed(&error, MISSING_CREDENTIAL_MESSAGE).await;
            conversation.push_assistant(MISSING_CREDENTIAL_MESSAGE);
            return TurnReport {
                attempts: 0,
                error: Some(error),
            };
        };

        let request = build_request(conversation, settings);
        let mut attempts: u32 = 0;

        let (content, error) = loop {
            attempts += 1;
            match provider.complete(&request).await {
                Ok(response) => {
                    let body = strip_emphasis(&response.content);
                    let mut accumulated = String::new();
                    for frame in Typewriter::new(&body) {
                        sink.partial(&frame).await;
                        accumulated = frame;
                    }
                    let styled = highlight_signals(&accumulated);
                    sink.completed(&styled).await;
                    info!(attempts, provider = provider.name(), "advisor turn completed");
                    break (styled, None);
                }
                Err(CompletionError::Decode(detail)) => {
                    warn!(
                        attempt = attempts,
                        max_retries = settings.max_retries,
                        error = %detail,
                        "completion body failed to decode"
                    );
                    if attempts >= settings.max_retries {
                        let error = TurnError::DecodeExhausted {
                            attempts,
                            last_error: detail,
                        };
                        error!(error = %error, "decode retries exhausted");
                        sink.failed(&error, DECODE_FAILURE_MESSAGE).await;
                        break (DECODE_FAILURE_MESSAGE.to_string(), Some(error));
                    }
                    tokio::time::sleep(self.retry_pause).await;
                }
                Err(CompletionError::Transport(detail)) => {
                    error!(error = %detail, "market data connection error");
                    let error = TurnError::Transport(detail);
                    sink.failed(&error, TRANSPORT_FAILURE_MESSAGE).await;
                    break (TRANSPORT_FAILURE_MESSAGE.to_string(), Some(error));
                }
                Err(CompletionError::Unexpected(detail)) => {
                    error!(error = %detail, "portfolio analysis failed");
                    let error = TurnError::Unexpected(detail);
                    sink.failed(&error, UNEXPECTED_FAILURE_MESSAGE).await;
                    break (UNEXPECTED_FAILURE_MESSAGE.to_string(), Some(error));
                }
            }
        };

        conversation.push_assistant(content);
        TurnReport { attempts, error }
    }
}

/// Assemble the completion request: system instruction, trailing window,
/// fixed temperature.
fn build_request(conversation: &Conversation, settings: &AdvisorSettings) -> CompletionRequest {
    let system = SystemPromptBuilder::build(settings, Local::now().date_naive());
    CompletionRequest {
        model: settings.model.clone(),
        messages: conversation.window().to_vec(),
        system: Some(system),
        temperature: Some(AdvisorSettings::TEMPERATURE),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

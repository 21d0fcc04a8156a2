//! Marketeer CLI entry point.
//!
//! Binary name: `mktr`
//!
//! Parses CLI arguments, initializes tracing, constructs the OpenRouter
//! provider when a credential is available, then hands off to the
//! interactive chat loop.

mod args;
mod chat;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use marketeer_infra::llm::OpenRouterProvider;
use marketeer_types::advisor::AdvisorSettings;

use args::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,marketeer=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Without a credential the chat still runs; every question is answered
    // with key setup instructions instead of a provider call. An empty key
    // counts as absent.
    let provider = cli
        .credential()
        .map(|key| OpenRouterProvider::new(SecretString::from(key)));

    let settings = AdvisorSettings {
        model: cli.model,
        risk_profile: cli.risk,
        time_horizon: cli.horizon,
        max_retries: cli.max_retries,
    };

    chat::loop_runner::run_chat_loop(settings, provider).await
}

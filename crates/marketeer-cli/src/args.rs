//! CLI argument definitions for the `mktr` binary.
//!
//! Uses clap derive macros. The binary takes no subcommands; running it
//! drops straight into the chat shell with the given advisor settings.

use clap::Parser;

use marketeer_types::advisor::{AdvisorSettings, RiskProfile, TimeHorizon};

/// AI investment advisor in your terminal.
#[derive(Parser)]
#[command(name = "mktr", version, about, long_about = None)]
pub struct Cli {
    /// Model identifier sent to OpenRouter.
    #[arg(long, default_value = AdvisorSettings::DEFAULT_MODEL)]
    pub model: String,

    /// Risk tolerance shaping the advice (conservative, moderate, aggressive).
    #[arg(long, default_value_t = RiskProfile::Conservative)]
    pub risk: RiskProfile,

    /// Investment horizon shaping the advice (short, medium, long).
    #[arg(long, default_value_t = TimeHorizon::Short)]
    pub horizon: TimeHorizon,

    /// Provider calls allowed per question when responses fail to decode.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..=5))]
    pub max_retries: u32,

    /// OpenRouter API key (falls back to the environment).
    #[arg(long, env = "OPENROUTER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Suppress all output except errors.
    #[arg(long, short = 'q')]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The credential to authenticate with, if one was actually supplied.
    ///
    /// An empty value counts as absent: `OPENROUTER_API_KEY=""` (or
    /// `--api-key ""`) must not produce a provider that sends a blank
    /// bearer token.
    pub fn credential(&self) -> Option<String> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["mktr"]).unwrap();
        assert_eq!(cli.model, AdvisorSettings::DEFAULT_MODEL);
        assert_eq!(cli.risk, RiskProfile::Conservative);
        assert_eq!(cli.horizon, TimeHorizon::Short);
        assert_eq!(cli.max_retries, 2);
    }

    #[test]
    fn test_retry_budget_bounds() {
        assert!(Cli::try_parse_from(["mktr", "--max-retries", "0"]).is_err());
        assert!(Cli::try_parse_from(["mktr", "--max-retries", "6"]).is_err());
        assert!(Cli::try_parse_from(["mktr", "--max-retries", "5"]).is_ok());
    }

    #[test]
    fn test_risk_and_horizon_parsing() {
        let cli =
            Cli::try_parse_from(["mktr", "--risk", "aggressive", "--horizon", "long"]).unwrap();
        assert_eq!(cli.risk, RiskProfile::Aggressive);
        assert_eq!(cli.horizon, TimeHorizon::Long);
    }

    #[test]
    fn test_empty_api_key_counts_as_absent() {
        let cli = Cli::try_parse_from(["mktr", "--api-key", ""]).unwrap();
        assert_eq!(cli.api_key.as_deref(), Some(""));
        assert_eq!(cli.credential(), None);

        let cli = Cli::try_parse_from(["mktr", "--api-key", "sk-or-v1-abc"]).unwrap();
        assert_eq!(cli.credential().as_deref(), Some("sk-or-v1-abc"));
    }

    #[test]
    fn test_empty_api_key_yields_engine_without_provider() {
        use marketeer_core::advisor::turn::TurnEngine;
        use marketeer_infra::llm::OpenRouterProvider;
        use secrecy::SecretString;

        let cli = Cli::try_parse_from(["mktr", "--api-key", ""]).unwrap();
        let provider = cli
            .credential()
            .map(|key| OpenRouterProvider::new(SecretString::from(key)));
        let engine = TurnEngine::new(provider);
        assert!(!engine.has_provider());
    }
}

//! System instruction builder for the advisor persona.
//!
//! Renders the fixed certified-financial-advisor instruction with the
//! session's risk profile, investment horizon, and the current date
//! interpolated. The numbered STRICT RULES block is what keeps the model's
//! recommendation format machine-highlightable (BUY/SELL/HOLD tokens and
//! the Asset Class / Risk Level layout).

use chrono::NaiveDate;
use marketeer_types::advisor::AdvisorSettings;

/// Builds the advisor system instruction for one completion request.
///
/// Layout:
/// ```text
/// You are a certified financial advisor with Wall Street experience. STRICT RULES:
/// 1. Format recommendations: ...
/// 2. Use financial emojis: ...
/// ...
/// 7. Maintain SEC compliance standards
/// ```
pub struct SystemPromptBuilder;

impl SystemPromptBuilder {
    /// Build the complete system instruction.
    ///
    /// The date is injected rather than read from the clock so tests can
    /// pin it; the turn engine passes the current local date.
    pub fn build(settings: &AdvisorSettings, today: NaiveDate) -> String {
        format!(
            "You are a certified financial advisor with Wall Street experience. STRICT RULES:\n\
             1. Format recommendations:\n   \
                - Asset Class: [Equities/Fixed Income/etc]\n   \
                - Risk Level: {risk}\n   \
                - Time Horizon: {horizon}\n   \
                - Expected Return: X-Y%\n   \
                - Key Factors: [Market conditions]\n\
             2. Use financial emojis: 💹📉📊💼\n\
             3. Include technical analysis elements\n\
             4. Current date: {date}\n\
             5. Highlight sector opportunities\n\
             6. Never provide generic advice\n\
             7. Maintain SEC compliance standards",
            risk = settings.risk_profile.label(),
            horizon = settings.time_horizon.label(),
            date = today.format("%Y-%m-%d"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marketeer_types::advisor::{RiskProfile, TimeHorizon};

    fn test_settings() -> AdvisorSettings {
        AdvisorSettings::default()
    }

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, 23).unwrap()
    }

    #[test]
    fn test_build_interpolates_risk_and_horizon() {
        let mut settings = test_settings();
        settings.risk_profile = RiskProfile::Aggressive;
        settings.time_horizon = TimeHorizon::Long;

        let prompt = SystemPromptBuilder::build(&settings, test_date());

        assert!(prompt.contains("Risk Level: Aggressive"));
        assert!(prompt.contains("Time Horizon: Long-term (>5yrs)"));
    }

    #[test]
    fn test_build_interpolates_date() {
        let prompt = SystemPromptBuilder::build(&test_settings(), test_date());
        assert!(prompt.contains("Current date: 2026-08-23"));
    }

    #[test]
    fn test_build_keeps_fixed_rules() {
        let prompt = SystemPromptBuilder::build(&test_settings(), test_date());

        assert!(prompt.starts_with("You are a certified financial advisor"));
        assert!(prompt.contains("STRICT RULES"));
        assert!(prompt.contains("Expected Return: X-Y%"));
        assert!(prompt.contains("Never provide generic advice"));
        assert!(prompt.contains("Maintain SEC compliance standards"));
    }

    #[test]
    fn test_build_changes_with_settings() {
        let conservative = SystemPromptBuilder::build(&test_settings(), test_date());

        let mut settings = test_settings();
        settings.risk_profile = RiskProfile::Moderate;
        let moderate = SystemPromptBuilder::build(&settings, test_date());

        assert_ne!(conservative, moderate);
        assert!(moderate.contains("Risk Level: Moderate"));
    }
}

//! Advisor request configuration for Marketeer.
//!
//! These types capture the per-session knobs a user can adjust: risk
//! tolerance, investment horizon, model identifier, and the decode retry
//! cap. Temperature is fixed and not user-adjustable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Risk tolerance communicated to the advisor persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskProfile {
    Conservative,
    Moderate,
    Aggressive,
}

impl RiskProfile {
    /// Capitalized form interpolated into the system instruction.
    pub fn label(&self) -> &'static str {
        match self {
            RiskProfile::Conservative => "Conservative",
            RiskProfile::Moderate => "Moderate",
            RiskProfile::Aggressive => "Aggressive",
        }
    }
}

impl fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskProfile::Conservative => write!(f, "conservative"),
            RiskProfile::Moderate => write!(f, "moderate"),
            RiskProfile::Aggressive => write!(f, "aggressive"),
        }
    }
}

impl FromStr for RiskProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(RiskProfile::Conservative),
            "moderate" => Ok(RiskProfile::Moderate),
            "aggressive" => Ok(RiskProfile::Aggressive),
            other => Err(format!("invalid risk profile: '{other}'")),
        }
    }
}

/// Investment horizon communicated to the advisor persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeHorizon {
    Short,
    Medium,
    Long,
}

impl TimeHorizon {
    /// Descriptive form interpolated into the system instruction.
    pub fn label(&self) -> &'static str {
        match self {
            TimeHorizon::Short => "Short-term (<1yr)",
            TimeHorizon::Medium => "Medium-term (1-5yrs)",
            TimeHorizon::Long => "Long-term (>5yrs)",
        }
    }
}

impl fmt::Display for TimeHorizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeHorizon::Short => write!(f, "short"),
            TimeHorizon::Medium => write!(f, "medium"),
            TimeHorizon::Long => write!(f, "long"),
        }
    }
}

impl FromStr for TimeHorizon {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "short" => Ok(TimeHorizon::Short),
            "medium" => Ok(TimeHorizon::Medium),
            "long" => Ok(TimeHorizon::Long),
            other => Err(format!("invalid time horizon: '{other}'")),
        }
    }
}

/// Session-scoped advisor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdvisorSettings {
    /// Model identifier sent upstream.
    pub model: String,
    pub risk_profile: RiskProfile,
    pub time_horizon: TimeHorizon,
    /// How many decode failures to tolerate before giving up on a turn.
    /// Valid range 1..=5.
    pub max_retries: u32,
}

impl AdvisorSettings {
    /// Sampling temperature for every completion request. Not adjustable.
    pub const TEMPERATURE: f64 = 0.4;

    /// Inclusive bounds for `max_retries`.
    pub const RETRY_RANGE: std::ops::RangeInclusive<u32> = 1..=5;

    pub const DEFAULT_MODEL: &'static str = "google/palm-2-chat-bison";
}

impl Default for AdvisorSettings {
    fn default() -> Self {
        Self {
            model: Self::DEFAULT_MODEL.to_string(),
            risk_profile: RiskProfile::Conservative,
            time_horizon: TimeHorizon::Short,
            max_retries: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_profile_roundtrip() {
        for profile in [
            RiskProfile::Conservative,
            RiskProfile::Moderate,
            RiskProfile::Aggressive,
        ] {
            let s = profile.to_string();
            let parsed: RiskProfile = s.parse().unwrap();
            assert_eq!(profile, parsed);
        }
    }

    #[test]
    fn test_risk_profile_parse_is_case_insensitive() {
        let parsed: RiskProfile = "Aggressive".parse().unwrap();
        assert_eq!(parsed, RiskProfile::Aggressive);
        assert!("reckless".parse::<RiskProfile>().is_err());
    }

    #[test]
    fn test_time_horizon_roundtrip() {
        for horizon in [TimeHorizon::Short, TimeHorizon::Medium, TimeHorizon::Long] {
            let s = horizon.to_string();
            let parsed: TimeHorizon = s.parse().unwrap();
            assert_eq!(horizon, parsed);
        }
    }

    #[test]
    fn test_time_horizon_labels() {
        assert_eq!(TimeHorizon::Short.label(), "Short-term (<1yr)");
        assert_eq!(TimeHorizon::Medium.label(), "Medium-term (1-5yrs)");
        assert_eq!(TimeHorizon::Long.label(), "Long-term (>5yrs)");
    }

    #[test]
    fn test_settings_defaults() {
        let settings = AdvisorSettings::default();
        assert_eq!(settings.model, "google/palm-2-chat-bison");
        assert_eq!(settings.risk_profile, RiskProfile::Conservative);
        assert_eq!(settings.time_horizon, TimeHorizon::Short);
        assert_eq!(settings.max_retries, 2);
        assert!(AdvisorSettings::RETRY_RANGE.contains(&settings.max_retries));
    }

    #[test]
    fn test_temperature_is_fixed() {
        assert!((AdvisorSettings::TEMPERATURE - 0.4).abs() < f64::EPSILON);
    }
}

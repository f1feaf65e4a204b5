//! Availability search policy.
//!
//! # Responsibility
//! - Hold the tunables of the suggestion search.
//! - Reject configurations the engine cannot run with.
//!
//! # Invariants
//! - The default reproduces the published behavior: fixed 3-night
//!   suggestions, 30-day forward horizon, first fit wins.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Nights used for suggestions unless configured otherwise.
pub const DEFAULT_SUGGESTION_NIGHTS: u32 = 3;
/// Number of candidate start dates tried before giving up.
pub const DEFAULT_SEARCH_HORIZON_DAYS: u32 = 30;

/// Length of a suggested replacement window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode", content = "nights")]
pub enum SuggestionLength {
    /// Always suggest this many nights, regardless of the request.
    Fixed(u32),
    /// Suggest as many nights as the guest requested.
    MatchRequest,
}

impl Default for SuggestionLength {
    fn default() -> Self {
        Self::Fixed(DEFAULT_SUGGESTION_NIGHTS)
    }
}

/// Suggestion search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AvailabilityConfig {
    pub suggestion_length: SuggestionLength,
    pub search_horizon_days: u32,
}

impl Default for AvailabilityConfig {
    fn default() -> Self {
        Self {
            suggestion_length: SuggestionLength::default(),
            search_horizon_days: DEFAULT_SEARCH_HORIZON_DAYS,
        }
    }
}

/// Invalid availability configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    ZeroSuggestionNights,
    ZeroSearchHorizon,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroSuggestionNights => write!(f, "suggestion length must be at least 1 night"),
            Self::ZeroSearchHorizon => write!(f, "search horizon must be at least 1 day"),
        }
    }
}

impl Error for ConfigError {}

impl AvailabilityConfig {
    /// Returns a config with a fixed suggestion length.
    pub fn with_fixed_nights(mut self, nights: u32) -> Self {
        self.suggestion_length = SuggestionLength::Fixed(nights);
        self
    }

    /// Returns a config whose suggestions mirror the requested stay length.
    pub fn matching_request_length(mut self) -> Self {
        self.suggestion_length = SuggestionLength::MatchRequest;
        self
    }

    pub fn with_search_horizon(mut self, days: u32) -> Self {
        self.search_horizon_days = days;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.suggestion_length == SuggestionLength::Fixed(0) {
            return Err(ConfigError::ZeroSuggestionNights);
        }
        if self.search_horizon_days == 0 {
            return Err(ConfigError::ZeroSearchHorizon);
        }
        Ok(())
    }

    /// Resolves the suggestion length for a request of `requested_nights`.
    pub fn suggestion_nights(&self, requested_nights: u32) -> u32 {
        match self.suggestion_length {
            SuggestionLength::Fixed(nights) => nights,
            SuggestionLength::MatchRequest => requested_nights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AvailabilityConfig, ConfigError, SuggestionLength};

    #[test]
    fn default_is_three_nights_over_thirty_days() {
        let config = AvailabilityConfig::default();
        assert_eq!(config.suggestion_length, SuggestionLength::Fixed(3));
        assert_eq!(config.search_horizon_days, 30);
        assert_eq!(config.suggestion_nights(7), 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn match_request_follows_requested_length() {
        let config = AvailabilityConfig::default().matching_request_length();
        assert_eq!(config.suggestion_nights(5), 5);
    }

    #[test]
    fn validate_rejects_zero_values() {
        assert_eq!(
            AvailabilityConfig::default()
                .with_fixed_nights(0)
                .validate()
                .unwrap_err(),
            ConfigError::ZeroSuggestionNights
        );
        assert_eq!(
            AvailabilityConfig::default()
                .with_search_horizon(0)
                .validate()
                .unwrap_err(),
            ConfigError::ZeroSearchHorizon
        );
    }

    #[test]
    fn deserializes_partial_json_with_defaults() {
        let config: AvailabilityConfig =
            serde_json::from_str(r#"{ "suggestion_length": { "mode": "fixed", "nights": 5 } }"#)
                .unwrap();
        assert_eq!(config.suggestion_length, SuggestionLength::Fixed(5));
        assert_eq!(config.search_horizon_days, 30);
    }
}

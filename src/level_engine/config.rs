use serde::{Deserialize, Serialize};

use crate::level_engine::error::ConfigError;
use crate::level_engine::models::GameMode;

/// Tunables for the level generator, the skill model and the session
/// controller. `Default` reproduces the stock game balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Hard cap on a generated level's upper bound.
    pub range_ceiling: i64,
    /// Length of the trailing accuracy and reaction-time buffers.
    pub history_size: usize,
    /// Solve times at or above this many seconds are not reaction samples.
    pub reaction_time_ceiling: u64,
    /// How many of the most recent results the skill model looks at.
    pub recent_window: usize,
    /// Below this many lifetime games the success rate is the recent rate alone.
    pub blend_min_games: u32,
    /// Whether `GameSession::tick` ends a timed level once the limit passes.
    pub enforce_time_limit: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            range_ceiling: 1000,
            history_size: 20,
            reaction_time_ceiling: 30_000,
            recent_window: 10,
            blend_min_games: 5,
            enforce_time_limit: true,
        }
    }
}

impl EngineConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let widest_base = GameMode::ALL
            .iter()
            .map(|m| m.base_range().1)
            .max()
            .unwrap_or(0);
        if self.range_ceiling < widest_base {
            return Err(ConfigError::Invalid {
                field: "range_ceiling",
                reason: format!("must be at least {widest_base}, got {}", self.range_ceiling),
            });
        }
        if self.history_size == 0 {
            return Err(invalid_zero("history_size"));
        }
        if self.recent_window == 0 {
            return Err(invalid_zero("recent_window"));
        }
        if self.reaction_time_ceiling == 0 {
            return Err(invalid_zero("reaction_time_ceiling"));
        }
        Ok(())
    }
}

fn invalid_zero(field: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason: "must be greater than zero".to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = EngineConfig::from_toml_str("range_ceiling = 500\nenforce_time_limit = false\n")
            .expect("valid config");
        assert_eq!(config.range_ceiling, 500);
        assert!(!config.enforce_time_limit);
        assert_eq!(config.history_size, 20);
        assert_eq!(config.recent_window, 10);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml_str("").expect("valid"), EngineConfig::default());
    }

    #[test]
    fn ceiling_below_base_range_is_rejected() {
        let err = EngineConfig::from_toml_str("range_ceiling = 12").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "range_ceiling", .. }), "{err}");
    }

    #[test]
    fn zero_buffers_are_rejected() {
        for doc in ["history_size = 0", "recent_window = 0", "reaction_time_ceiling = 0"] {
            assert!(matches!(
                EngineConfig::from_toml_str(doc),
                Err(ConfigError::Invalid { .. })
            ), "{doc}");
        }
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = EngineConfig::from_toml_str("range_ceiling = \"lots\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}

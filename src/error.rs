//! Error types for configuration and engine operations.

use std::io;
use thiserror::Error;

/// Problems with a loot configuration. Raised at construction only; an engine is
/// never built from a configuration that fails any of these checks.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("at least one slot loot table is required")]
    NoSlots,

    #[error("slot {slot} drop rates must sum to 100% (current sum: {total}%)")]
    WeightSum { slot: usize, total: f64 },

    #[error("slot {slot} has an invalid weight {weight} for '{key}'")]
    InvalidWeight { slot: usize, key: String, weight: f64 },

    #[error("slot {slot} references unknown reward '{key}'")]
    UnknownRewardKey { slot: usize, key: String },

    #[error("slot {slot} gives weight {weight} to '{category}', which has no items to collect")]
    UnobtainableCategory {
        slot: usize,
        category: String,
        weight: f64,
    },

    #[error("reward name '{0}' is defined more than once")]
    DuplicateName(String),

    #[error("currency '{0}' must have a positive value")]
    ZeroCurrencyValue(String),

    #[error("duplicate rule references unknown category '{0}'")]
    UnknownDuplicateRule(String),

    #[error("failed to read or write config: {0}")]
    Io(#[from] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors returned by engine operations after construction.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Resolution reached a state that configuration validation should have
    /// ruled out. Indicates a logic bug, not a caller error.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_sum_message_names_slot_and_total() {
        let err = ConfigError::WeightSum {
            slot: 2,
            total: 99.5,
        };
        assert_eq!(
            err.to_string(),
            "slot 2 drop rates must sum to 100% (current sum: 99.5%)"
        );
    }

    #[test]
    fn test_config_error_converts_into_engine_error() {
        let err: EngineError = ConfigError::NoSlots.into();
        assert!(matches!(err, EngineError::Config(ConfigError::NoSlots)));
        assert_eq!(err.to_string(), "at least one slot loot table is required");
    }
}

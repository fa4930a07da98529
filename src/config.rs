//! Simulation configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CAFE_SIM_TICK_MS` - Generator tick interval in milliseconds (default: 10000)
//! - `CAFE_SIM_PROBABILITY` - Chance a tick yields an order (default: 0.3)
//! - `CAFE_SIM_MAX_ITEMS` - Maximum lines per generated order (default: 3)
//! - `CAFE_SIM_MAX_QUANTITY` - Maximum quantity per generated line (default: 2)
//! - `CAFE_SIM_TABLES` - Number of tables generated orders are spread over (default: 10)
//! - `CAFE_SIM_ENABLED` - Start the generator with the store (default: true)
//! - `CAFE_SIM_POLICY` - `permissive` or `strict` status transitions (default: permissive)
//! - `CAFE_SIM_CHANNEL_CAPACITY` - Order actor mailbox size (default: 32)
//! - `CAFE_SIM_SEED` - Fixed RNG seed; seeded from the OS when unset

use crate::order_actor::TransitionPolicy;
use crate::simulation::GeneratorSettings;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_TICK_MS: u64 = 10_000;
const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Everything needed to start an [`OrderSystem`](crate::lifecycle::OrderSystem).
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub tick_interval: Duration,
    pub generator: GeneratorSettings,
    /// Whether the generator runs as soon as the store starts.
    pub enabled: bool,
    pub policy: TransitionPolicy,
    pub channel_capacity: usize,
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_MS),
            generator: GeneratorSettings::default(),
            enabled: true,
            policy: TransitionPolicy::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable does not parse or the result fails
    /// validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let tick_ms = parse_or(&lookup, "CAFE_SIM_TICK_MS", DEFAULT_TICK_MS)?;

        let config = Self {
            tick_interval: Duration::from_millis(tick_ms),
            generator: GeneratorSettings {
                probability: parse_or(&lookup, "CAFE_SIM_PROBABILITY", defaults.generator.probability)?,
                max_items: parse_or(&lookup, "CAFE_SIM_MAX_ITEMS", defaults.generator.max_items)?,
                max_quantity: parse_or(&lookup, "CAFE_SIM_MAX_QUANTITY", defaults.generator.max_quantity)?,
                tables: parse_or(&lookup, "CAFE_SIM_TABLES", defaults.generator.tables)?,
            },
            enabled: parse_or(&lookup, "CAFE_SIM_ENABLED", defaults.enabled)?,
            policy: parse_or(&lookup, "CAFE_SIM_POLICY", defaults.policy)?,
            channel_capacity: parse_or(&lookup, "CAFE_SIM_CHANNEL_CAPACITY", defaults.channel_capacity)?,
            seed: lookup("CAFE_SIM_SEED")
                .map(|raw| parse("CAFE_SIM_SEED", &raw))
                .transpose()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks ranges that the types alone do not enforce.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval.is_zero() {
            return Err(ConfigError::Invalid("tick interval must be positive".into()));
        }
        let probability = self.generator.probability;
        if !(0.0..=1.0).contains(&probability) {
            return Err(ConfigError::Invalid(format!(
                "probability must be within [0, 1] (got {probability})"
            )));
        }
        if self.generator.max_items == 0
            || self.generator.max_quantity == 0
            || self.generator.tables == 0
        {
            return Err(ConfigError::Invalid(
                "max items, max quantity and tables must be at least 1".into(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(ConfigError::Invalid("channel capacity must be at least 1".into()));
        }
        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn parse<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => parse(key, &raw),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<SimulationConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        SimulationConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_eq!(config.tick_interval, Duration::from_secs(10));
        assert_eq!(config.generator.probability, 0.3);
        assert!(config.enabled);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("CAFE_SIM_TICK_MS", "250"),
            ("CAFE_SIM_PROBABILITY", "1.0"),
            ("CAFE_SIM_ENABLED", "false"),
            ("CAFE_SIM_POLICY", "strict"),
            ("CAFE_SIM_SEED", "42"),
        ])
        .unwrap();
        assert_eq!(config.tick_interval, Duration::from_millis(250));
        assert_eq!(config.generator.probability, 1.0);
        assert!(!config.enabled);
        assert_eq!(config.policy, TransitionPolicy::Strict);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            load(&[("CAFE_SIM_TICK_MS", "soon")]),
            Err(ConfigError::InvalidEnvVar(key, _)) if key == "CAFE_SIM_TICK_MS"
        ));
        assert!(matches!(
            load(&[("CAFE_SIM_PROBABILITY", "1.5")]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load(&[("CAFE_SIM_TABLES", "0")]),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            load(&[("CAFE_SIM_POLICY", "lenient")]),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
    }
}

//! Engine configuration loaded from `relay-config.yaml` into a
//! strongly-typed struct.
//!
//! Every field has a serde default, so a partial file (or none at all) still
//! yields a complete configuration. Validation runs at parse time and again
//! at engine construction; a bad value never reaches the first tick.

use std::path::Path;

use serde::{Deserialize, Serialize};

use relay_types::Direction;

/// Errors that can occur while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading the configuration file failed.
    #[error("failed to read config file: {source}")]
    Io {
        /// Underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Parsing the YAML content failed.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// Underlying YAML parse error.
        #[from]
        source: serde_yml::Error,
    },

    /// A field value is outside its allowed range.
    #[error("invalid config: {reason}")]
    Invalid {
        /// Description of the rejected value.
        reason: String,
    },
}

/// Engine tunables.
///
/// Counters are unsigned, so negative values are unrepresentable; a file
/// carrying one fails deserialization. Range rules beyond that live in
/// [`SimConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Number of ticks a full run executes.
    #[serde(default = "default_ticks")]
    pub ticks: u64,

    /// Floor the mirror pulse latches onto C's neighbors on act success.
    #[serde(default = "default_latch_floor")]
    pub latch_floor: u8,

    /// Upper bound on every shadow/hesitation level.
    #[serde(default = "default_hesitation_cap")]
    pub hesitation_cap: u8,

    /// Successes available before the task completes.
    #[serde(default = "default_repeat_budget")]
    pub repeat_budget: u32,

    /// Consecutive failures that trigger an escalation.
    #[serde(default = "default_fail_threshold")]
    pub fail_threshold: u32,

    /// Ticks the baton stays parked after an escalation.
    #[serde(default = "default_park_duration")]
    pub park_duration: u32,

    /// Travel direction at startup.
    #[serde(default = "default_initial_direction")]
    pub initial_direction: Direction,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks: default_ticks(),
            latch_floor: default_latch_floor(),
            hesitation_cap: default_hesitation_cap(),
            repeat_budget: default_repeat_budget(),
            fail_threshold: default_fail_threshold(),
            park_duration: default_park_duration(),
            initial_direction: default_initial_direction(),
        }
    }
}

impl SimConfig {
    /// Loads and validates configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML for this schema, and
    /// [`ConfigError::Invalid`] if a value fails [`Self::validate`].
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    /// Parses and validates configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] on malformed input and
    /// [`ConfigError::Invalid`] if a value fails [`Self::validate`].
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the range rules the type system cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the offending field when a
    /// rule fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks == 0 {
            return Err(ConfigError::Invalid {
                reason: "ticks must be at least 1".to_owned(),
            });
        }
        if self.hesitation_cap == 0 {
            return Err(ConfigError::Invalid {
                reason: "hesitation_cap must be at least 1".to_owned(),
            });
        }
        if self.fail_threshold == 0 {
            return Err(ConfigError::Invalid {
                reason: "fail_threshold must be at least 1".to_owned(),
            });
        }
        if self.latch_floor > self.hesitation_cap {
            return Err(ConfigError::Invalid {
                reason: format!(
                    "latch_floor ({}) must not exceed hesitation_cap ({})",
                    self.latch_floor, self.hesitation_cap
                ),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Default value functions (serde default requires named functions)
// ---------------------------------------------------------------------------

const fn default_ticks() -> u64 {
    80
}

const fn default_latch_floor() -> u8 {
    3
}

const fn default_hesitation_cap() -> u8 {
    6
}

const fn default_repeat_budget() -> u32 {
    3
}

const fn default_fail_threshold() -> u32 {
    3
}

const fn default_park_duration() -> u32 {
    2
}

const fn default_initial_direction() -> Direction {
    Direction::Clockwise
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_values() {
        let config = SimConfig::default();
        assert_eq!(config.ticks, 80);
        assert_eq!(config.latch_floor, 3);
        assert_eq!(config.hesitation_cap, 6);
        assert_eq!(config.repeat_budget, 3);
        assert_eq!(config.fail_threshold, 3);
        assert_eq!(config.park_duration, 2);
        assert_eq!(config.initial_direction, Direction::Clockwise);
        config.validate().unwrap();
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = "
ticks: 40
latch_floor: 2
hesitation_cap: 4
repeat_budget: 5
fail_threshold: 2
park_duration: 1
initial_direction: CounterClockwise
";
        let config = SimConfig::parse(yaml).unwrap();
        assert_eq!(config.ticks, 40);
        assert_eq!(config.latch_floor, 2);
        assert_eq!(config.hesitation_cap, 4);
        assert_eq!(config.repeat_budget, 5);
        assert_eq!(config.fail_threshold, 2);
        assert_eq!(config.park_duration, 1);
        assert_eq!(config.initial_direction, Direction::CounterClockwise);
    }

    #[test]
    fn parse_partial_yaml_fills_defaults() {
        let config = SimConfig::parse("ticks: 12").unwrap();
        assert_eq!(config.ticks, 12);
        assert_eq!(config.hesitation_cap, 6);
        assert_eq!(config.initial_direction, Direction::Clockwise);
    }

    #[test]
    fn negative_counter_is_a_parse_error() {
        let result = SimConfig::parse("repeat_budget: -1");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn zero_ticks_rejected() {
        let result = SimConfig::parse("ticks: 0");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn zero_hesitation_cap_rejected() {
        let config = SimConfig {
            hesitation_cap: 0,
            latch_floor: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn zero_fail_threshold_rejected() {
        let config = SimConfig {
            fail_threshold: 0,
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn latch_floor_above_cap_rejected() {
        let config = SimConfig {
            latch_floor: 7,
            ..SimConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("latch_floor"));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = SimConfig::from_file(Path::new("does-not-exist.yaml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}

//! # Witness Code Configuration
//!
//! Explicit configuration passed to whatever issues witness codes. Test
//! environments switch on `use_test_code` so that every issued code is the
//! fixed `test_code`; production leaves it off and codes are random digits.
//!
//! Configuration is loaded from `Default`, from environment variables via
//! [`WitnessCodeConfig::from_env`], or deserialized from a YAML/JSON file.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::limiter::Limiter;

/// Environment variable enabling the fixed test code.
pub const ENV_USE_TEST_CODE: &str = "LPA_USE_TEST_WITNESS_CODE";
/// Environment variable overriding the number of digits in a code.
pub const ENV_CODE_LENGTH: &str = "LPA_WITNESS_CODE_LENGTH";

const MAX_CODE_LENGTH: usize = 12;

/// Error loading witness code configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable or field held a value that could not be used.
    #[error("invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: &'static str,
    },
}

/// How witness codes are generated and how verification attempts are limited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WitnessCodeConfig {
    /// Issue `test_code` instead of a random code.
    pub use_test_code: bool,
    /// The fixed code issued when `use_test_code` is set.
    pub test_code: String,
    /// Number of digits in a random code.
    pub code_length: usize,
    /// Seconds over which the verification limiter refills completely.
    pub limiter_token_per_secs: i64,
    /// Tokens a fresh verification limiter starts with.
    pub limiter_initial_tokens: f64,
    /// Capacity of the verification limiter.
    pub limiter_max_tokens: f64,
}

impl Default for WitnessCodeConfig {
    fn default() -> Self {
        Self {
            use_test_code: false,
            test_code: "1234".to_string(),
            code_length: 4,
            limiter_token_per_secs: 5 * 60,
            limiter_initial_tokens: 10.0,
            limiter_max_tokens: 10.0,
        }
    }
}

impl WitnessCodeConfig {
    /// Load configuration from the process environment, starting from defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup, starting from defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_USE_TEST_CODE) {
            config.use_test_code = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "" | "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: ENV_USE_TEST_CODE.to_string(),
                        value,
                        reason: "expected a boolean",
                    })
                }
            };
        }

        if let Some(value) = lookup(ENV_CODE_LENGTH) {
            config.code_length = value.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_CODE_LENGTH.to_string(),
                value: value.clone(),
                reason: "expected a positive integer",
            })?;
        }

        config.validate()?;
        if config.use_test_code {
            tracing::warn!(test_code = %config.test_code, "witness codes are fixed to the test code");
        }
        Ok(config)
    }

    /// Check that the configuration can generate codes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.code_length == 0 || self.code_length > MAX_CODE_LENGTH {
            return Err(ConfigError::InvalidValue {
                name: "code_length".to_string(),
                value: self.code_length.to_string(),
                reason: "must be between 1 and 12",
            });
        }
        if self.use_test_code
            && (self.test_code.is_empty() || !self.test_code.chars().all(|c| c.is_ascii_digit()))
        {
            return Err(ConfigError::InvalidValue {
                name: "test_code".to_string(),
                value: self.test_code.clone(),
                reason: "must be one or more digits",
            });
        }
        if self.limiter_max_tokens < 1.0 {
            return Err(ConfigError::InvalidValue {
                name: "limiter_max_tokens".to_string(),
                value: self.limiter_max_tokens.to_string(),
                reason: "must allow at least one attempt",
            });
        }
        Ok(())
    }

    /// Generate the next code to send.
    pub fn generate_code(&self) -> String {
        if self.use_test_code {
            return self.test_code.clone();
        }

        let mut rng = rand::thread_rng();
        (0..self.code_length)
            .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
            .collect()
    }

    /// A fresh verification limiter, as configured.
    pub fn new_limiter(&self, now: DateTime<Utc>) -> Limiter {
        Limiter::new(
            Duration::seconds(self.limiter_token_per_secs),
            self.limiter_initial_tokens,
            self.limiter_max_tokens,
            now,
        )
    }
}

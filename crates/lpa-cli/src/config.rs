//! # CLI Configuration
//!
//! Witness code settings come from a YAML file given with `--config`, or
//! from the environment when no file is given.

use std::path::Path;

use anyhow::{Context, Result};
use lpa_witness::WitnessCodeConfig;

/// Load witness code configuration from `path`, or from the environment.
pub fn load_witness_config(path: Option<&Path>) -> Result<WitnessCodeConfig> {
    let config = match path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config file {}", path.display()))?;
            let config: WitnessCodeConfig = serde_yaml::from_str(&content)
                .with_context(|| format!("failed to parse config file {}", path.display()))?;
            config
                .validate()
                .with_context(|| format!("invalid config file {}", path.display()))?;
            config
        }
        None => WitnessCodeConfig::from_env().context("invalid witness code environment")?,
    };

    tracing::debug!(
        use_test_code = config.use_test_code,
        code_length = config.code_length,
        "witness code configuration loaded"
    );
    Ok(config)
}

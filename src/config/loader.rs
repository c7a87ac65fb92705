//! Entry points for YAML-based statistic configuration

use super::schema::StatConfig;
use super::validate::validate_config;
use crate::error::{Result, StatError};
use std::fs;
use std::path::Path;

/// Parse and validate a configuration from YAML text
///
/// Missing fields fall back to their defaults.
///
/// # Example
///
/// ```
/// use hierstat::config::load_config_str;
///
/// let config = load_config_str("threshold: 40.0\ndistance: pooled_auprc\n")?;
/// assert_eq!(config.threshold, Some(40.0));
/// # Ok::<(), hierstat::StatError>(())
/// ```
pub fn load_config_str(yaml: &str) -> Result<StatConfig> {
    let config: StatConfig = serde_yaml::from_str(yaml)?;
    validate_config(&config)?;
    Ok(config)
}

/// Load and validate a configuration file
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<StatConfig> {
    let path = config_path.as_ref();
    let yaml_content = fs::read_to_string(path).map_err(|e| StatError::io(path, e))?;
    load_config_str(&yaml_content)
}

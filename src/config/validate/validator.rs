//! Configuration validation logic

use super::error::ValidationError;
use crate::config::schema::StatConfig;

/// Validate a statistic configuration
///
/// Checks:
/// - The threshold is a percentage
/// - The significance level is a probability strictly above zero
/// - The hierarchy weight decays (or keeps) class weights per level
pub fn validate_config(config: &StatConfig) -> Result<(), ValidationError> {
    if let Some(threshold) = config.threshold {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(ValidationError::InvalidThreshold(threshold));
        }
    }

    // NaN is rejected
    if !(config.sig_level > 0.0 && config.sig_level <= 1.0) {
        return Err(ValidationError::InvalidSigLevel(config.sig_level));
    }

    if !(config.hierarchy_weight > 0.0 && config.hierarchy_weight <= 1.0) {
        return Err(ValidationError::InvalidHierarchyWeight(
            config.hierarchy_weight,
        ));
    }

    Ok(())
}

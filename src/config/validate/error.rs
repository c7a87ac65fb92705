//! Validation error types

/// Validation error type
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid prediction threshold: {0} (must be in [0.0, 100.0])")]
    InvalidThreshold(f64),

    #[error("Invalid significance level: {0} (must be > 0.0 and <= 1.0)")]
    InvalidSigLevel(f64),

    #[error("Invalid hierarchy weight: {0} (must be > 0.0 and <= 1.0)")]
    InvalidHierarchyWeight(f64),
}

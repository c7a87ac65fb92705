//! Discrete prediction selection
//!
//! Turns per-class means into a hierarchy-consistent label set: every class
//! whose weighted membership reaches the threshold is predicted, and the
//! selection is then closed under ancestor inclusion.

use crate::hierarchy::ClassHierarchy;

/// Threshold (percent) used while no explicit threshold has been set
pub const MAJORITY_THRESHOLD: f64 = 50.0;

/// Select the ancestor-closed prediction for `means` at `threshold` percent
///
/// A class is selected when its mean is at least `threshold / 100` and
/// strictly positive, so a zero-weight node (all means zero) predicts only
/// the root, whatever the threshold.
pub fn select_prediction(
    hier: &ClassHierarchy,
    means: &[f64],
    threshold: Option<f64>,
) -> Vec<bool> {
    let cutoff = threshold.unwrap_or(MAJORITY_THRESHOLD) / 100.0;
    let mut flags: Vec<bool> = means
        .iter()
        .take(hier.total())
        .map(|&mean| mean > 0.0 && mean >= cutoff)
        .collect();
    flags.resize(hier.total(), false);
    hier.close_under_ancestors(&mut flags);
    flags
}

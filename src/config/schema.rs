//! YAML schema for the run-wide statistic settings
//!
//! These values are fixed for a whole induction run and copied into every
//! statistic at construction time.

use serde::{Deserialize, Serialize};

/// Rounding rule used when converting weights to counts for the significance test.
///
/// The legacy rule truncates; keep it selectable so historical runs stay reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Compatibility {
    /// Truncate toward zero (CMB05 behaviour)
    Cmb05,
    /// Round half up
    #[default]
    Latest,
}

impl Compatibility {
    /// Convert a (weighted) count to an integer count under this rule.
    pub fn round(self, value: f64) -> i64 {
        match self {
            Compatibility::Cmb05 => value as i64,
            Compatibility::Latest => (value + 0.5).floor() as i64,
        }
    }
}

/// Distance used by the split heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMode {
    /// Hierarchical weighted Euclidean distance (weighted variance heuristic)
    #[default]
    WeightedEuclidean,
    /// No class distance: pooled precision-recall area over per-class positive mass
    PooledAuprc,
}

impl DistanceMode {
    /// Human readable distance name
    pub fn name(&self) -> &'static str {
        match self {
            DistanceMode::WeightedEuclidean => "Hierarchical Weighted Euclidean Distance",
            DistanceMode::PooledAuprc => "Pooled AUPRC",
        }
    }

    /// Whether statistics in this mode keep a separate positive-mass vector
    pub fn tracks_positive_mass(&self) -> bool {
        matches!(self, DistanceMode::PooledAuprc)
    }
}

/// How per-class means are estimated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeanEstimator {
    /// Weighted relative frequency
    #[default]
    Plain,
    /// Relative frequency smoothed with one pseudo-example at the training mean
    MEstimate,
}

fn default_sig_level() -> f64 {
    0.05
}

fn default_hierarchy_weight() -> f64 {
    0.75
}

/// Complete statistic configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatConfig {
    /// Prediction threshold in percent; `None` selects the majority default (50%)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,

    /// Significance level of the hypergeometric test
    #[serde(default = "default_sig_level")]
    pub sig_level: f64,

    /// Count rounding rule for the significance test
    #[serde(default)]
    pub compatibility: Compatibility,

    /// Split heuristic distance
    #[serde(default)]
    pub distance: DistanceMode,

    /// Mean estimation rule
    #[serde(default)]
    pub mean_estimator: MeanEstimator,

    /// Class weight decay `w0` per hierarchy level
    #[serde(default = "default_hierarchy_weight")]
    pub hierarchy_weight: f64,
}

impl Default for StatConfig {
    fn default() -> Self {
        Self {
            threshold: None,
            sig_level: default_sig_level(),
            compatibility: Compatibility::default(),
            distance: DistanceMode::default(),
            mean_estimator: MeanEstimator::default(),
            hierarchy_weight: default_hierarchy_weight(),
        }
    }
}

impl StatConfig {
    /// Configuration for the pooled AUPRC heuristic
    pub fn pooled_auprc() -> Self {
        Self {
            distance: DistanceMode::PooledAuprc,
            ..Default::default()
        }
    }

    /// Set the prediction threshold (percent)
    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    /// Set the significance level
    pub fn with_sig_level(mut self, sig_level: f64) -> Self {
        self.sig_level = sig_level;
        self
    }

    /// Set the rounding rule
    pub fn with_compatibility(mut self, compatibility: Compatibility) -> Self {
        self.compatibility = compatibility;
        self
    }

    /// Set the mean estimator
    pub fn with_mean_estimator(mut self, estimator: MeanEstimator) -> Self {
        self.mean_estimator = estimator;
        self
    }
}

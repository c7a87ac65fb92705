//! Split heuristics, one strategy per distance mode

use super::auprc::{pooled_auprc, pooled_auprc_diff};
use super::StatisticAccumulator;
use crate::config::DistanceMode;
use crate::hierarchy::ClassWeights;

/// Mode-specific dispersion of a statistic
pub trait ScoreStrategy: Send + Sync {
    /// Dispersion of the examples summarized by `stat`
    fn dispersion(&self, stat: &StatisticAccumulator, weights: &ClassWeights) -> f64;

    /// Dispersion of `stat` with `other` taken out
    ///
    /// The pooled curve uses `other` as ranking reference instead.
    fn dispersion_diff(
        &self,
        stat: &StatisticAccumulator,
        other: &StatisticAccumulator,
        weights: &ClassWeights,
    ) -> f64;
}

/// Weighted sum of per-class variances (scaled by weight), averaged over classes
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedVariance;

/// Pooled precision-recall area over per-class positive mass
#[derive(Debug, Clone, Copy, Default)]
pub struct PooledAuprc;

/// Strategy for a distance mode
pub fn strategy_for(mode: DistanceMode) -> &'static dyn ScoreStrategy {
    match mode {
        DistanceMode::WeightedEuclidean => &WeightedVariance,
        DistanceMode::PooledAuprc => &PooledAuprc,
    }
}

impl WeightedVariance {
    /// `Σ w_i (s_i - s_i² / W) / N` over binary class indicators
    fn scaled_variance<F>(
        sum_weight: f64,
        nb_classes: usize,
        sum_at: F,
        weights: &ClassWeights,
    ) -> f64
    where
        F: Fn(usize) -> f64,
    {
        if sum_weight == 0.0 || nb_classes == 0 {
            return 0.0;
        }
        let total: f64 = (0..nb_classes)
            .map(|i| {
                let sum = sum_at(i);
                (sum - sum * sum / sum_weight) * weights.weight(i)
            })
            .sum();
        total / nb_classes as f64
    }
}

impl ScoreStrategy for WeightedVariance {
    fn dispersion(&self, stat: &StatisticAccumulator, weights: &ClassWeights) -> f64 {
        let sums = stat.sum_values();
        Self::scaled_variance(stat.total_weight(), sums.len(), |i| sums[i], weights)
    }

    fn dispersion_diff(
        &self,
        stat: &StatisticAccumulator,
        other: &StatisticAccumulator,
        weights: &ClassWeights,
    ) -> f64 {
        let sums = stat.sum_values();
        let other_sums = other.sum_values();
        Self::scaled_variance(
            stat.total_weight() - other.total_weight(),
            sums.len(),
            |i| sums[i] - other_sums[i],
            weights,
        )
    }
}

impl ScoreStrategy for PooledAuprc {
    fn dispersion(&self, stat: &StatisticAccumulator, _weights: &ClassWeights) -> f64 {
        pooled_auprc(&stat.positive_mass_or_zero(), stat.total_weight())
    }

    fn dispersion_diff(
        &self,
        stat: &StatisticAccumulator,
        other: &StatisticAccumulator,
        _weights: &ClassWeights,
    ) -> f64 {
        pooled_auprc_diff(
            &stat.positive_mass_or_zero(),
            &other.positive_mass_or_zero(),
            stat.total_weight(),
        )
    }
}

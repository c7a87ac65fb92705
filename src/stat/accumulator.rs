//! Per-node weighted class-membership statistic

use std::borrow::Cow;
use std::sync::Arc;

use super::prediction::select_prediction;
use super::score::strategy_for;
use super::significance::{apply_significance_test, test_prediction, SignificanceOutcome};
use super::StatisticContext;
use crate::config::{Compatibility, DistanceMode, MeanEstimator, StatConfig};
use crate::error::{Result, StatError};
use crate::hierarchy::{ClassHierarchy, ClassWeights, ClassesTuple, LabelledTuple};

/// Weighted aggregate of the hierarchical targets of the examples reaching a node
///
/// Created empty, filled through [`update`](Self::update), and finalized with
/// [`calc_mean`](Self::calc_mean), which derives the means, the discrete
/// prediction and applies the significance test.
#[derive(Debug, Clone)]
pub struct StatisticAccumulator {
    hier: Arc<ClassHierarchy>,
    mode: DistanceMode,
    compatibility: Compatibility,
    estimator: MeanEstimator,
    threshold: Option<f64>,
    sum_weight: f64,
    nb_examples: usize,
    sum_values: Vec<f64>,
    positive_mass: Option<Vec<f64>>,
    means: Vec<f64>,
    discrete: Vec<bool>,
}

impl StatisticAccumulator {
    /// Empty statistic over `hier` with the run-wide settings of `config`
    pub fn new(hier: Arc<ClassHierarchy>, config: &StatConfig) -> Self {
        let mut stat = Self::with_flags(
            hier,
            config.distance,
            config.compatibility,
            config.mean_estimator,
        );
        stat.threshold = config.threshold;
        stat
    }

    fn with_flags(
        hier: Arc<ClassHierarchy>,
        mode: DistanceMode,
        compatibility: Compatibility,
        estimator: MeanEstimator,
    ) -> Self {
        let n = hier.total();
        Self {
            hier,
            mode,
            compatibility,
            estimator,
            threshold: None,
            sum_weight: 0.0,
            nb_examples: 0,
            sum_values: vec![0.0; n],
            positive_mass: mode.tracks_positive_mass().then(|| vec![0.0; n]),
            means: vec![0.0; n],
            discrete: vec![false; n],
        }
    }

    // -------------------------------------------------------------------------
    // Cloning and copying
    // -------------------------------------------------------------------------

    /// Same shape and threshold, zeroed content
    pub fn clone_simple(&self) -> Self {
        let mut stat = self.clone_stat();
        stat.threshold = self.threshold;
        stat
    }

    /// Fresh prototype with the same mode flags, used to create siblings at a split
    pub fn clone_stat(&self) -> Self {
        Self::with_flags(Arc::clone(&self.hier), self.mode, self.compatibility, self.estimator)
    }

    /// Overwrite the sums (and positive mass in pooled mode) with those of `other`
    pub fn copy(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        self.sum_weight = other.sum_weight;
        self.nb_examples = other.nb_examples;
        self.sum_values.copy_from_slice(&other.sum_values);
        if let Some(mass) = self.positive_mass.as_mut() {
            match &other.positive_mass {
                Some(other_mass) => mass.copy_from_slice(other_mass),
                None => mass.fill(0.0),
            }
        }
        Ok(())
    }

    /// [`copy`](Self::copy) plus the derived state: means, prediction and threshold
    pub fn copy_all(&mut self, other: &Self) -> Result<()> {
        self.copy(other)?;
        self.means.copy_from_slice(&other.means);
        self.discrete.copy_from_slice(&other.discrete);
        self.threshold = other.threshold;
        Ok(())
    }

    /// Zero all sums
    pub fn reset(&mut self) {
        self.sum_weight = 0.0;
        self.nb_examples = 0;
        self.sum_values.fill(0.0);
        if let Some(mass) = self.positive_mass.as_mut() {
            mass.fill(0.0);
        }
    }

    /// Replace the hierarchy by one with the same number of classes
    pub fn set_hierarchy(&mut self, hier: Arc<ClassHierarchy>) -> Result<()> {
        if hier.total() != self.nb_classes() {
            return Err(StatError::ShapeMismatch {
                expected: self.nb_classes(),
                actual: hier.total(),
            });
        }
        self.hier = hier;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Accumulation
    // -------------------------------------------------------------------------

    /// Add one example with weight `weight`
    ///
    /// The tuple's class set must already contain every implied ancestor.
    /// An index outside the hierarchy rejects the whole tuple.
    pub fn update<T: LabelledTuple + ?Sized>(&mut self, tuple: &T, weight: f64) -> Result<()> {
        let classes = tuple.classes().indices();
        let total = self.nb_classes();
        if let Some(&index) = classes.iter().find(|&&index| index >= total) {
            return Err(StatError::ClassIndexOutOfRange { index, total });
        }

        self.sum_weight += weight;
        self.nb_examples += 1;
        for &index in classes {
            self.sum_values[index] += weight;
        }
        if let Some(mass) = self.positive_mass.as_mut() {
            for &index in classes {
                mass[index] += weight;
            }
        }
        Ok(())
    }

    /// Add the sums of `other`
    pub fn add(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        self.sum_weight += other.sum_weight;
        self.nb_examples += other.nb_examples;
        for (sum, other_sum) in self.sum_values.iter_mut().zip(&other.sum_values) {
            *sum += other_sum;
        }
        if let (Some(mass), Some(other_mass)) =
            (self.positive_mass.as_mut(), &other.positive_mass)
        {
            for (m, o) in mass.iter_mut().zip(other_mass) {
                *m += o;
            }
        }
        Ok(())
    }

    /// Remove the sums of `other`, e.g. to obtain the complement of a branch from its parent
    pub fn subtract_from_this(&mut self, other: &Self) -> Result<()> {
        self.check_same_shape(other)?;
        self.sum_weight -= other.sum_weight;
        self.nb_examples = self.nb_examples.saturating_sub(other.nb_examples);
        for (sum, other_sum) in self.sum_values.iter_mut().zip(&other.sum_values) {
            *sum -= other_sum;
        }
        if let (Some(mass), Some(other_mass)) =
            (self.positive_mass.as_mut(), &other.positive_mass)
        {
            for (m, o) in mass.iter_mut().zip(other_mass) {
                *m -= o;
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Means and prediction
    // -------------------------------------------------------------------------

    /// Mean of class `i` under the configured estimator
    fn estimate(&self, i: usize, training: Option<&Self>) -> f64 {
        match (self.estimator, training) {
            (MeanEstimator::MEstimate, Some(training)) => {
                (self.sum_values[i] + training.means[i]) / (self.sum_weight + 1.0)
            }
            _ if self.sum_weight != 0.0 => self.sum_values[i] / self.sum_weight,
            _ => 0.0,
        }
    }

    /// Recompute the means from the sums
    ///
    /// The m-estimate uses the training statistic of `ctx` when present and
    /// falls back to the plain relative frequency otherwise.
    pub fn compute_means(&mut self, ctx: &StatisticContext<'_>) -> Result<()> {
        let training = match (self.estimator, ctx.training()) {
            (MeanEstimator::MEstimate, Some(training)) => {
                self.check_same_shape(training)?;
                Some(training)
            }
            _ => None,
        };
        let means: Vec<f64> = (0..self.nb_classes())
            .map(|i| self.estimate(i, training))
            .collect();
        self.means = means;
        Ok(())
    }

    /// Select the discrete prediction from the current means, then prune it
    /// with the significance test when `ctx` carries validation statistics
    pub fn compute_prediction(&mut self, ctx: &StatisticContext<'_>) -> Result<()> {
        let mut discrete = select_prediction(&self.hier, &self.means, self.threshold);
        apply_significance_test(&mut discrete, ctx, self.compatibility)?;
        self.discrete = discrete;
        Ok(())
    }

    /// Finalize the node: means, then prediction
    pub fn calc_mean(&mut self, ctx: &StatisticContext<'_>) -> Result<()> {
        self.compute_means(ctx)?;
        self.compute_prediction(ctx)
    }

    /// Significance outcomes for the majority prediction, without changing this statistic
    pub fn significance_report(
        &self,
        ctx: &StatisticContext<'_>,
    ) -> Result<Vec<SignificanceOutcome>> {
        let majority = select_prediction(&self.hier, &self.means, None);
        test_prediction(&majority, ctx, self.compatibility)
    }

    /// Add `weight` times the means of `other` to this statistic's means
    pub fn add_prediction(&mut self, other: &Self, weight: f64) -> Result<()> {
        self.check_same_shape(other)?;
        for (mean, other_mean) in self.means.iter_mut().zip(&other.means) {
            *mean += weight * other_mean;
        }
        Ok(())
    }

    /// Force the discrete prediction; means become 1.0 for predicted classes and 0.0 otherwise
    pub fn set_prediction(&mut self, prediction: &[bool]) -> Result<()> {
        self.hier.check_shape(prediction.len())?;
        self.discrete.copy_from_slice(prediction);
        for (mean, &predicted) in self.means.iter_mut().zip(prediction) {
            *mean = if predicted { 1.0 } else { 0.0 };
        }
        Ok(())
    }

    pub(super) fn set_means(&mut self, means: Vec<f64>) {
        self.means = means;
    }

    pub(super) fn set_discrete(&mut self, discrete: Vec<bool>) {
        self.discrete = discrete;
    }

    // -------------------------------------------------------------------------
    // Heuristics and distances
    // -------------------------------------------------------------------------

    /// Split heuristic value of this node
    pub fn dispersion(&self, weights: &ClassWeights) -> Result<f64> {
        self.hier.check_shape(weights.len())?;
        Ok(strategy_for(self.mode).dispersion(self, weights))
    }

    /// Split heuristic value relative to `other`
    pub fn dispersion_diff(&self, weights: &ClassWeights, other: &Self) -> Result<f64> {
        self.hier.check_shape(weights.len())?;
        self.check_same_shape(other)?;
        Ok(strategy_for(self.mode).dispersion_diff(self, other, weights))
    }

    /// Weighted variance of the indicator of class `i`
    pub fn variance(&self, i: usize) -> f64 {
        if self.sum_weight == 0.0 {
            return 0.0;
        }
        let sum = self.sum_values[i];
        (sum - sum * sum / self.sum_weight) / self.sum_weight
    }

    /// Weighted squared Euclidean distance between a tuple's membership vector and the means
    pub fn squared_distance<T: LabelledTuple + ?Sized>(
        &self,
        tuple: &T,
        weights: &ClassWeights,
    ) -> Result<f64> {
        let actual = self.membership(tuple, weights)?;
        let sum: f64 = actual
            .iter()
            .zip(&self.means)
            .enumerate()
            .map(|(i, (&member, mean))| {
                let dist = if member { 1.0 } else { 0.0 } - mean;
                dist * dist * weights.weight(i)
            })
            .sum();
        Ok(sum / self.nb_classes() as f64)
    }

    /// Weighted absolute distance, each class scaled by the training standard deviation
    pub fn absolute_distance<T: LabelledTuple + ?Sized>(
        &self,
        tuple: &T,
        weights: &ClassWeights,
        training: &Self,
    ) -> Result<f64> {
        self.check_same_shape(training)?;
        let actual = self.membership(tuple, weights)?;
        let sum: f64 = actual
            .iter()
            .zip(&self.means)
            .enumerate()
            .map(|(i, (&member, mean))| {
                let mut dist = if member { 1.0 } else { 0.0 } - mean;
                let variance = training.variance(i);
                if variance != 0.0 {
                    dist /= variance.sqrt();
                }
                dist.abs() * weights.weight(i)
            })
            .sum();
        Ok(sum / self.nb_classes() as f64)
    }

    fn membership<T: LabelledTuple + ?Sized>(
        &self,
        tuple: &T,
        weights: &ClassWeights,
    ) -> Result<Vec<bool>> {
        self.hier.check_shape(weights.len())?;
        let classes = tuple.classes();
        if let Some(&index) = classes.indices().iter().find(|&&i| i >= self.nb_classes()) {
            return Err(StatError::ClassIndexOutOfRange {
                index,
                total: self.nb_classes(),
            });
        }
        let mut actual = classes.to_flags(self.nb_classes());
        self.hier.close_under_ancestors(&mut actual);
        Ok(actual)
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn hierarchy(&self) -> &Arc<ClassHierarchy> {
        &self.hier
    }

    pub fn nb_classes(&self) -> usize {
        self.sum_values.len()
    }

    pub fn distance_mode(&self) -> DistanceMode {
        self.mode
    }

    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }

    pub fn mean_estimator(&self) -> MeanEstimator {
        self.estimator
    }

    /// Prediction threshold in percent, `None` until set
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: f64) {
        self.threshold = Some(threshold);
    }

    /// Total example weight seen
    pub fn total_weight(&self) -> f64 {
        self.sum_weight
    }

    /// Number of `update` calls
    pub fn nb_examples(&self) -> usize {
        self.nb_examples
    }

    /// Weighted membership count per class
    pub fn sum_values(&self) -> &[f64] {
        &self.sum_values
    }

    /// Positive mass per class (pooled AUPRC mode only)
    pub fn positive_mass(&self) -> Option<&[f64]> {
        self.positive_mass.as_deref()
    }

    pub(super) fn positive_mass_or_zero(&self) -> Cow<'_, [f64]> {
        match &self.positive_mass {
            Some(mass) => Cow::Borrowed(mass),
            None => Cow::Owned(vec![0.0; self.nb_classes()]),
        }
    }

    /// Mean of class `i` as of the last [`compute_means`](Self::compute_means)
    ///
    /// # Panics
    /// Panics if `i` is out of range.
    pub fn mean(&self, i: usize) -> f64 {
        self.means[i]
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    /// Ancestor-closed predicted labels (before any significance pruning, the closure holds)
    pub fn discrete_prediction(&self) -> &[bool] {
        &self.discrete
    }

    pub fn nb_predicted_classes(&self) -> usize {
        self.discrete.iter().filter(|&&p| p).count()
    }

    /// Predicted class indices
    pub fn predicted_classes(&self) -> Vec<usize> {
        self.prediction_tuple().indices().to_vec()
    }

    /// Predicted labels as a class tuple
    pub fn prediction_tuple(&self) -> ClassesTuple {
        ClassesTuple::from_flags(&self.discrete)
    }

    pub(super) fn check_same_shape(&self, other: &Self) -> Result<()> {
        if self.nb_classes() == other.nb_classes() {
            Ok(())
        } else {
            Err(StatError::ShapeMismatch {
                expected: self.nb_classes(),
                actual: other.nb_classes(),
            })
        }
    }
}

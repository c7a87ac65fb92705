//! Hypergeometric significance test for predicted labels
//!
//! A predicted class survives only if the held-out examples reaching the node
//! (the "rule") contain that class significantly more often than the held-out
//! population does. Weights are turned into counts with the configured
//! [`Compatibility`] rounding rule.
//!
//! Numeric trouble never fails the caller: the test for that class is skipped,
//! the label stays predicted, and the parameters are logged.

use statrs::distribution::{Discrete, Hypergeometric};
use tracing::{debug, warn};

use super::{StatisticAccumulator, StatisticContext};
use crate::config::Compatibility;
use crate::error::{Result, StatError};

/// Integer counts entering the test for one class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HypergeometricCounts {
    /// Held-out population size
    pub pop_total: i64,
    /// Held-out population members of the class
    pub pop_positive: i64,
    /// Held-out examples reaching the node
    pub rule_total: i64,
    /// Held-out examples reaching the node that belong to the class
    pub rule_positive: i64,
}

impl HypergeometricCounts {
    /// Counts for `class` from the global and validation statistics
    ///
    /// Both statistics must have their means computed.
    pub fn from_statistics(
        global: &StatisticAccumulator,
        validation: &StatisticAccumulator,
        class: usize,
        compatibility: Compatibility,
    ) -> Self {
        let global_weight = global.total_weight();
        let rule_weight = validation.total_weight();
        Self {
            pop_total: compatibility.round(global_weight),
            pop_positive: compatibility.round(global_weight * global.mean(class)),
            rule_total: compatibility.round(rule_weight),
            rule_positive: compatibility.round(rule_weight * validation.mean(class)),
        }
    }

    /// Largest number of class members the rule can contain
    pub fn upper(&self) -> i64 {
        self.rule_total.min(self.pop_positive)
    }

    /// Smallest number of class members the rule must contain
    pub fn min_possible(&self) -> i64 {
        let other_pop = self.pop_total - self.pop_positive;
        self.rule_total - other_pop
    }

    /// Lower end of the tested tail
    pub fn lower(&self) -> i64 {
        self.rule_positive.max(self.min_possible())
    }

    /// Whether the counts are inconsistent with a rule drawn from the population
    ///
    /// This only signals suspect input; the bounds themselves are not corrected.
    pub fn suspect_bounds(&self) -> bool {
        self.rule_positive < self.min_possible() || self.lower() > self.upper()
    }
}

/// Why the test was not carried out
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No held-out example reaches the node
    EmptyRule,
    /// `lower > upper`: the tail interval is empty
    EmptyInterval,
    /// The distribution rejected its parameters
    InvalidParameters(String),
}

/// Decision for one predicted class
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Tail probability below the significance level
    Retained { probability: f64 },
    /// Tail probability at or above the significance level; label cleared
    Dropped { probability: f64 },
    /// Test not carried out; label left as is
    Skipped(SkipReason),
}

impl Verdict {
    /// Whether the label must be cleared from the prediction
    pub fn drops_label(&self) -> bool {
        matches!(self, Verdict::Dropped { .. })
    }

    /// Tail probability, if the test ran
    pub fn probability(&self) -> Option<f64> {
        match self {
            Verdict::Retained { probability } | Verdict::Dropped { probability } => {
                Some(*probability)
            }
            Verdict::Skipped(_) => None,
        }
    }
}

/// Outcome of testing one class
#[derive(Debug, Clone, PartialEq)]
pub struct SignificanceOutcome {
    pub class: usize,
    pub counts: HypergeometricCounts,
    pub lower: i64,
    pub upper: i64,
    pub suspect_bounds: bool,
    pub verdict: Verdict,
}

/// `P(lower <= X <= upper)` for `X ~ Hypergeometric(population, successes, draws)`
///
/// An empty interval has probability 0. Negative or inconsistent parameters
/// yield `InvalidDistribution`.
pub fn hypergeometric_probability(
    population: i64,
    successes: i64,
    draws: i64,
    lower: i64,
    upper: i64,
) -> Result<f64> {
    let invalid = |message: String| StatError::InvalidDistribution {
        population,
        successes,
        draws,
        message,
    };

    if population < 0 || successes < 0 || draws < 0 {
        return Err(invalid("negative parameter".to_string()));
    }
    let dist = Hypergeometric::new(population as u64, successes as u64, draws as u64)
        .map_err(|e| invalid(e.to_string()))?;

    let lower = lower.max(0);
    let upper = upper.min(draws);
    if lower > upper {
        return Ok(0.0);
    }

    let probability: f64 = (lower as u64..=upper as u64)
        .map(|k| dist.ln_pmf(k).exp())
        .sum();
    Ok(probability.min(1.0))
}

/// Test a single predicted class
pub fn test_class(
    global: &StatisticAccumulator,
    validation: &StatisticAccumulator,
    class: usize,
    compatibility: Compatibility,
    sig_level: f64,
) -> SignificanceOutcome {
    let counts = HypergeometricCounts::from_statistics(global, validation, class, compatibility);
    let lower = counts.lower();
    let upper = counts.upper();
    let suspect_bounds = counts.suspect_bounds();

    if suspect_bounds {
        warn!(
            class,
            rule = validation.total_weight() * validation.mean(class),
            pop_total = counts.pop_total,
            pop_positive = counts.pop_positive,
            rule_total = counts.rule_total,
            rule_positive = counts.rule_positive,
            lower,
            upper,
            "Suspect hypergeometric bounds"
        );
    }

    let verdict = if counts.rule_total == 0 {
        debug!(class, "No validation examples reach the node, significance test skipped");
        Verdict::Skipped(SkipReason::EmptyRule)
    } else if lower > upper {
        Verdict::Skipped(SkipReason::EmptyInterval)
    } else {
        match hypergeometric_probability(
            counts.pop_total,
            counts.pop_positive,
            counts.rule_total,
            lower,
            upper,
        ) {
            Ok(probability) if probability >= sig_level => Verdict::Dropped { probability },
            Ok(probability) => Verdict::Retained { probability },
            Err(err) => {
                warn!(class, error = %err, "Significance test skipped");
                Verdict::Skipped(SkipReason::InvalidParameters(err.to_string()))
            }
        }
    };

    SignificanceOutcome {
        class,
        counts,
        lower,
        upper,
        suspect_bounds,
        verdict,
    }
}

/// Test every predicted class of `prediction`, without modifying it
///
/// Returns no outcome when the context lacks a validation or global statistic.
pub fn test_prediction(
    prediction: &[bool],
    ctx: &StatisticContext<'_>,
    compatibility: Compatibility,
) -> Result<Vec<SignificanceOutcome>> {
    let Some(validation) = ctx.validation() else {
        return Ok(Vec::new());
    };
    let Some(global) = ctx.global() else {
        warn!("Validation statistic without global statistic, significance test skipped");
        return Ok(Vec::new());
    };
    check_len(prediction.len(), validation.nb_classes())?;
    check_len(prediction.len(), global.nb_classes())?;

    Ok(prediction
        .iter()
        .enumerate()
        .filter_map(|(class, &predicted)| predicted.then_some(class))
        .map(|class| test_class(global, validation, class, compatibility, ctx.sig_level()))
        .collect())
}

/// Clear every predicted class that fails the test
///
/// Ancestors of a cleared class stay predicted.
pub fn apply_significance_test(
    prediction: &mut [bool],
    ctx: &StatisticContext<'_>,
    compatibility: Compatibility,
) -> Result<()> {
    for outcome in test_prediction(prediction, ctx, compatibility)? {
        if outcome.verdict.drops_label() {
            debug!(class = outcome.class, verdict = ?outcome.verdict, "Label not significant");
            prediction[outcome.class] = false;
        }
    }
    Ok(())
}

fn check_len(expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(StatError::ShapeMismatch { expected, actual })
    }
}

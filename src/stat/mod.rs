//! Hierarchical multi-label statistic engine
//!
//! One [`StatisticAccumulator`] summarizes the examples reaching a tree node:
//! weighted class-membership sums, the per-class means derived from them and
//! the discrete, ancestor-closed label set predicted at the node.
//!
//! - `accumulator`: weighted sums, means, prediction and distances
//! - `auprc`: pooled precision-recall curve and its area
//! - `context`: training/validation/global statistics read while finalizing
//! - `ensemble`: union and averaged vote over member statistics
//! - `parallel`: per-branch accumulation with rayon
//! - `prediction`: threshold selection with ancestor closure
//! - `score`: split heuristic per distance mode
//! - `significance`: hypergeometric pruning of predicted labels

mod accumulator;
pub mod auprc;
mod context;
mod ensemble;
mod parallel;
mod prediction;
mod score;
pub mod significance;


pub use accumulator::StatisticAccumulator;
pub use auprc::{curve_area, pooled_auprc, pooled_auprc_diff, pooled_pr_curve, PrCurvePoint};
pub use context::StatisticContext;
pub use ensemble::union_predictions;
pub use parallel::accumulate_branches;
pub use prediction::{select_prediction, MAJORITY_THRESHOLD};
pub use score::{strategy_for, PooledAuprc, ScoreStrategy, WeightedVariance};
pub use significance::{
    apply_significance_test, hypergeometric_probability, test_class, test_prediction,
    HypergeometricCounts, SignificanceOutcome, SkipReason, Verdict,
};

//! Hierarchical multi-label statistics for predictive clustering trees.
//!
//! The crate accumulates weighted hierarchical class memberships per tree
//! node. From them it derives means and a discrete label set that is closed
//! under ancestor inclusion. Predicted labels are pruned with a
//! hypergeometric significance test, and nodes are scored with either a
//! weighted variance or a pooled precision-recall area.
//!
//! ## Architecture
//!
//! - `hierarchy`: class taxonomy (DAG), class tuples, per-class weights
//! - `stat`: the statistic accumulator, significance test, AUPRC, ensembles
//! - `config`: run-wide YAML settings and validation
//! - `error`: typed failures
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use hierstat::{
//!     ClassesTuple, HierarchyBuilder, StatConfig, StatisticAccumulator, StatisticContext,
//! };
//!
//! let hier = Arc::new(HierarchyBuilder::new().add_path("A/B").add_path("A/C").build()?);
//! let mut stat = StatisticAccumulator::new(Arc::clone(&hier), &StatConfig::default());
//! stat.update(&ClassesTuple::from_ids(&hier, &["A/B"])?, 1.0)?;
//! stat.update(&ClassesTuple::from_ids(&hier, &["A"])?, 1.0)?;
//! stat.calc_mean(&StatisticContext::default())?;
//!
//! assert_eq!(stat.mean(0), 1.0);
//! assert_eq!(stat.prediction_tuple().human(&hier).to_string(), "A/B");
//! # Ok::<(), hierstat::StatError>(())
//! ```

pub mod config;
pub mod error;
pub mod hierarchy;
pub mod stat;

pub use config::{Compatibility, DistanceMode, MeanEstimator, StatConfig};
pub use error::{Result, StatError};
pub use hierarchy::{ClassHierarchy, ClassWeights, ClassesTuple, HierarchyBuilder, LabelledTuple};
pub use stat::{StatisticAccumulator, StatisticContext};

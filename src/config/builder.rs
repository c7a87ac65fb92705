//! Build statistic components from configuration

use std::sync::Arc;

use super::schema::StatConfig;
use crate::hierarchy::{ClassHierarchy, ClassWeights};
use crate::stat::{StatisticAccumulator, StatisticContext};

/// Build the per-class weights used by the dispersion and distance routines
pub fn build_class_weights(config: &StatConfig, hier: &ClassHierarchy) -> ClassWeights {
    ClassWeights::exponential(hier, config.hierarchy_weight)
}

/// Build an empty root statistic for a run
pub fn build_statistic(config: &StatConfig, hier: &Arc<ClassHierarchy>) -> StatisticAccumulator {
    StatisticAccumulator::new(Arc::clone(hier), config)
}

/// Build an empty context carrying the configured significance level
pub fn build_context<'a>(config: &StatConfig) -> StatisticContext<'a> {
    StatisticContext::new(config.sig_level)
}

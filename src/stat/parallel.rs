//! Parallel accumulation of candidate branches

use rayon::prelude::*;

use super::StatisticAccumulator;
use crate::error::Result;
use crate::hierarchy::LabelledTuple;

/// Fill one fresh accumulator per branch
///
/// Each branch is a list of `(tuple, weight)` pairs. Every accumulator is a
/// [`clone_stat`](StatisticAccumulator::clone_stat) of `prototype` owned by a
/// single worker. Results keep the branch order; the first failing tuple
/// fails the whole call.
pub fn accumulate_branches<T>(
    prototype: &StatisticAccumulator,
    branches: &[Vec<(T, f64)>],
) -> Result<Vec<StatisticAccumulator>>
where
    T: LabelledTuple + Sync,
{
    branches
        .par_iter()
        .map(|branch| {
            let mut stat = prototype.clone_stat();
            for (tuple, weight) in branch {
                stat.update(tuple, *weight)?;
            }
            Ok(stat)
        })
        .collect()
}

//! Combining the statistics of ensemble members

use tracing::debug;

use super::{StatisticAccumulator, StatisticContext};
use crate::error::{Result, StatError};

/// OR of the members' discrete predictions
///
/// Starts from `nb_classes` false flags. Every member must have `nb_classes` classes.
pub fn union_predictions<'m, I>(nb_classes: usize, members: I) -> Result<Vec<bool>>
where
    I: IntoIterator<Item = &'m StatisticAccumulator>,
{
    members
        .into_iter()
        .try_fold(vec![false; nb_classes], |mut union, member| {
            if member.nb_classes() != nb_classes {
                return Err(StatError::ShapeMismatch {
                    expected: nb_classes,
                    actual: member.nb_classes(),
                });
            }
            for (flag, &predicted) in union.iter_mut().zip(member.discrete_prediction()) {
                *flag |= predicted;
            }
            Ok(union)
        })
}

impl StatisticAccumulator {
    /// Set the discrete prediction to the union of the members' predictions
    ///
    /// Means are left untouched. No member yields an empty prediction.
    pub fn union_of<'m, I>(&mut self, members: I) -> Result<()>
    where
        I: IntoIterator<Item = &'m StatisticAccumulator>,
    {
        let union = union_predictions(self.nb_classes(), members)?;
        self.set_discrete(union);
        Ok(())
    }

    /// Average the members' means into this statistic and predict from them
    ///
    /// The sums are reset first; the prediction uses this statistic's threshold
    /// and the significance test of `ctx`.
    pub fn vote<'m, I>(&mut self, members: I, ctx: &StatisticContext<'_>) -> Result<()>
    where
        I: IntoIterator<Item = &'m StatisticAccumulator>,
    {
        self.reset();
        let mut means = vec![0.0; self.nb_classes()];
        let mut count = 0usize;
        for member in members {
            self.check_same_shape(member)?;
            for (mean, member_mean) in means.iter_mut().zip(member.means()) {
                *mean += member_mean;
            }
            count += 1;
        }
        if count == 0 {
            return Err(StatError::EmptyVote);
        }
        let n = count as f64;
        means.iter_mut().for_each(|mean| *mean /= n);
        debug!(members = count, classes = means.len(), "Ensemble vote");

        self.set_means(means);
        self.compute_prediction(ctx)
    }
}

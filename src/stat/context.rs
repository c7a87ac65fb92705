//! Cross-referenced statistics consulted while finalizing a node

use super::StatisticAccumulator;

/// Training, validation and global statistics plus the significance level
///
/// The context borrows every statistic immutably, so they must be finalized
/// (means computed) before a node that reads them is finalized.
#[derive(Debug, Clone, Copy)]
pub struct StatisticContext<'a> {
    training: Option<&'a StatisticAccumulator>,
    validation: Option<&'a StatisticAccumulator>,
    global: Option<&'a StatisticAccumulator>,
    sig_level: f64,
}

impl Default for StatisticContext<'_> {
    fn default() -> Self {
        Self::new(0.05)
    }
}

impl<'a> StatisticContext<'a> {
    /// Context without any cross-referenced statistic
    pub fn new(sig_level: f64) -> Self {
        Self {
            training: None,
            validation: None,
            global: None,
            sig_level,
        }
    }

    /// Statistic whose means smooth the m-estimate
    pub fn with_training(mut self, training: &'a StatisticAccumulator) -> Self {
        self.training = Some(training);
        self
    }

    /// Held-out examples covered by the node being finalized
    pub fn with_validation(mut self, validation: &'a StatisticAccumulator) -> Self {
        self.validation = Some(validation);
        self
    }

    /// Held-out population the validation statistic is compared against
    pub fn with_global(mut self, global: &'a StatisticAccumulator) -> Self {
        self.global = Some(global);
        self
    }

    /// Set the significance level
    pub fn with_sig_level(mut self, sig_level: f64) -> Self {
        self.sig_level = sig_level;
        self
    }

    pub fn training(&self) -> Option<&'a StatisticAccumulator> {
        self.training
    }

    pub fn validation(&self) -> Option<&'a StatisticAccumulator> {
        self.validation
    }

    pub fn global(&self) -> Option<&'a StatisticAccumulator> {
        self.global
    }

    pub fn sig_level(&self) -> f64 {
        self.sig_level
    }
}

//! Per-class weights

use super::ClassHierarchy;

/// Weight of each class in distance and dispersion computations
#[derive(Debug, Clone, PartialEq)]
pub struct ClassWeights {
    weights: Vec<f64>,
}

impl ClassWeights {
    /// Every class weighs 1.0
    pub fn uniform(total: usize) -> Self {
        Self {
            weights: vec![1.0; total],
        }
    }

    /// Weights decaying with depth: top-level classes weigh `w0`, and a
    /// class weighs `w0` times the mean weight of its parents.
    pub fn exponential(hier: &ClassHierarchy, w0: f64) -> Self {
        let mut weights: Vec<f64> = Vec::with_capacity(hier.total());
        // Parents always have lower indices than their children
        for term in hier.terms() {
            let parents = term.parents();
            let weight = if parents.is_empty() {
                w0
            } else {
                let parent_mean =
                    parents.iter().map(|&p| weights[p]).sum::<f64>() / parents.len() as f64;
                w0 * parent_mean
            };
            weights.push(weight);
        }
        Self { weights }
    }

    /// Use explicit weights
    pub fn from_vec(weights: Vec<f64>) -> Self {
        Self { weights }
    }

    /// Weight of class `index`
    ///
    /// # Panics
    /// Panics if `index` is out of range.
    pub fn weight(&self, index: usize) -> f64 {
        self.weights[index]
    }

    /// Number of classes covered
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no class is covered
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Weights ordered by class index
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }
}

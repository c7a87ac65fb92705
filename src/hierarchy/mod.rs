//! Class hierarchy model
//!
//! Read-only taxonomy over N class terms. Membership in a class implies
//! membership in all of its ancestors. A hierarchy is built once per run and
//! shared (usually behind an `Arc`) by every statistic.
//!
//! - `builder`: path- and edge-based construction with cycle detection
//! - `term`: a single class term
//! - `tuple`: ancestor-closed class sets attached to examples
//! - `weights`: per-class weights for distances and dispersion

mod builder;
mod term;
mod tuple;
mod weights;


use std::collections::HashMap;

use crate::error::{Result, StatError};

pub use builder::{HierarchyBuilder, PATH_SEPARATOR};
pub use term::ClassTerm;
pub use tuple::{ClassesTuple, HumanTuple, LabelledTuple};
pub use weights::ClassWeights;

/// Immutable class taxonomy (a DAG; trees are the common special case)
#[derive(Debug, Clone)]
pub struct ClassHierarchy {
    terms: Vec<ClassTerm>,
    by_id: HashMap<String, usize>,
    ancestors: Vec<Vec<usize>>,
    top_level: Vec<usize>,
    tree: bool,
}

impl ClassHierarchy {
    /// Assemble a hierarchy from terms already sorted by index in topological order
    fn from_terms(terms: Vec<ClassTerm>) -> Self {
        let by_id = terms
            .iter()
            .map(|term| (term.id.clone(), term.index))
            .collect();

        let mut ancestors: Vec<Vec<usize>> = Vec::with_capacity(terms.len());
        for term in &terms {
            let mut closure: Vec<usize> = term
                .parents
                .iter()
                .flat_map(|&p| ancestors[p].iter().copied().chain(std::iter::once(p)))
                .collect();
            closure.sort_unstable();
            closure.dedup();
            ancestors.push(closure);
        }

        let top_level = terms
            .iter()
            .filter(|term| term.is_top_level())
            .map(|term| term.index)
            .collect();
        let tree = terms.iter().all(|term| term.parents.len() <= 1);

        Self {
            terms,
            by_id,
            ancestors,
            top_level,
            tree,
        }
    }

    /// Number of class terms
    pub fn total(&self) -> usize {
        self.terms.len()
    }

    /// All terms ordered by index
    pub fn terms(&self) -> &[ClassTerm] {
        &self.terms
    }

    /// Term at `index`
    pub fn term(&self, index: usize) -> Option<&ClassTerm> {
        self.terms.get(index)
    }

    /// Index of the term with the given id
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(id).copied()
    }

    /// Index of the term with the given id, or `UnknownClass`
    pub fn require_index(&self, id: &str) -> Result<usize> {
        self.index_of(id)
            .ok_or_else(|| StatError::UnknownClass(id.to_string()))
    }

    /// Sorted transitive ancestors of `index` (excluding `index` itself)
    ///
    /// # Panics
    /// Panics if `index >= total()`.
    pub fn ancestors(&self, index: usize) -> &[usize] {
        &self.ancestors[index]
    }

    /// Direct parents of `index`
    ///
    /// # Panics
    /// Panics if `index >= total()`.
    pub fn parents(&self, index: usize) -> &[usize] {
        &self.terms[index].parents
    }

    /// Direct children of `index`
    ///
    /// # Panics
    /// Panics if `index >= total()`.
    pub fn children(&self, index: usize) -> &[usize] {
        &self.terms[index].children
    }

    /// Terms directly below the implicit root
    pub fn top_level(&self) -> &[usize] {
        &self.top_level
    }

    /// Whether every term has at most one parent
    pub fn is_tree(&self) -> bool {
        self.tree
    }

    /// Number of terms per depth level
    pub fn classes_by_level(&self) -> Vec<usize> {
        let max_depth = self.terms.iter().map(ClassTerm::depth).max().unwrap_or(0);
        let mut counts = vec![0usize; max_depth + 1];
        for term in &self.terms {
            counts[term.depth] += 1;
        }
        counts
    }

    /// Fail with `ShapeMismatch` unless `actual` equals `total()`
    pub fn check_shape(&self, actual: usize) -> Result<()> {
        if actual == self.total() {
            Ok(())
        } else {
            Err(StatError::ShapeMismatch {
                expected: self.total(),
                actual,
            })
        }
    }

    /// Set the flag of every ancestor of every flagged class
    ///
    /// Flags of length other than `total()` are a caller bug; extra entries are ignored.
    pub fn close_under_ancestors(&self, flags: &mut [bool]) {
        for index in 0..self.total().min(flags.len()) {
            if flags[index] {
                for &ancestor in &self.ancestors[index] {
                    flags[ancestor] = true;
                }
            }
        }
    }

    /// Whether a flag vector is closed under ancestor inclusion
    pub fn is_ancestor_closed(&self, flags: &[bool]) -> bool {
        flags.iter().enumerate().all(|(index, &set)| {
            !set || self
                .ancestors
                .get(index)
                .is_some_and(|ancestors| ancestors.iter().all(|&a| flags[a]))
        })
    }
}

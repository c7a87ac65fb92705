//! Class sets attached to examples

use std::fmt;

use super::ClassHierarchy;
use crate::error::{Result, StatError};

/// Sorted set of class indices, closed under ancestor inclusion
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ClassesTuple {
    indices: Vec<usize>,
}

impl ClassesTuple {
    /// Build a tuple from class indices, adding every implied ancestor
    pub fn from_indices<I>(hier: &ClassHierarchy, indices: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut flags = vec![false; hier.total()];
        for index in indices {
            let flag = flags.get_mut(index).ok_or(StatError::ClassIndexOutOfRange {
                index,
                total: hier.total(),
            })?;
            *flag = true;
        }
        hier.close_under_ancestors(&mut flags);
        Ok(Self::from_flags(&flags))
    }

    /// Build a tuple from class ids, adding every implied ancestor
    pub fn from_ids<S: AsRef<str>>(hier: &ClassHierarchy, ids: &[S]) -> Result<Self> {
        let indices = ids
            .iter()
            .map(|id| hier.require_index(id.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Self::from_indices(hier, indices)
    }

    /// Build a tuple from a membership vector taken as-is (no closure is applied)
    pub fn from_flags(flags: &[bool]) -> Self {
        Self {
            indices: flags
                .iter()
                .enumerate()
                .filter_map(|(index, &set)| set.then_some(index))
                .collect(),
        }
    }

    /// Member class indices in increasing order
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Number of member classes
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Whether the tuple only contains the implicit root
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Whether `index` is a member
    pub fn contains(&self, index: usize) -> bool {
        self.indices.binary_search(&index).is_ok()
    }

    /// Membership vector of length `total`; indices beyond `total` are dropped
    pub fn to_flags(&self, total: usize) -> Vec<bool> {
        let mut flags = vec![false; total];
        for &index in self.indices.iter().filter(|&&index| index < total) {
            flags[index] = true;
        }
        flags
    }

    /// Human readable form listing only the most specific member classes
    pub fn human<'a>(&'a self, hier: &'a ClassHierarchy) -> HumanTuple<'a> {
        HumanTuple { tuple: self, hier }
    }
}

/// Display adapter returned by [`ClassesTuple::human`]
pub struct HumanTuple<'a> {
    tuple: &'a ClassesTuple,
    hier: &'a ClassHierarchy,
}

impl fmt::Display for HumanTuple<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.tuple.is_empty() {
            return write!(f, "root");
        }
        let mut first = true;
        for &index in self.tuple.indices() {
            let Some(term) = self.hier.term(index) else {
                continue;
            };
            let intermediate = term
                .children()
                .iter()
                .any(|&child| self.tuple.contains(child));
            if intermediate {
                continue;
            }
            if !first {
                write!(f, ",")?;
            }
            write!(f, "{}", term.id())?;
            first = false;
        }
        Ok(())
    }
}

/// An example exposing its class-membership set for the hierarchical target
pub trait LabelledTuple {
    /// Ancestor-closed class set of the example
    fn classes(&self) -> &ClassesTuple;
}

impl LabelledTuple for ClassesTuple {
    fn classes(&self) -> &ClassesTuple {
        self
    }
}

impl<T: LabelledTuple + ?Sized> LabelledTuple for &T {
    fn classes(&self) -> &ClassesTuple {
        (**self).classes()
    }
}

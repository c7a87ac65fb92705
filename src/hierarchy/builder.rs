//! Incremental construction of a class hierarchy
//!
//! Terms are declared either through slash-separated paths (tree
//! hierarchies) or through explicit parent/child edges (DAG hierarchies).
//! Indices are assigned in topological order at `build` time, so a parent
//! always has a lower index than each of its children.

use std::collections::{BTreeSet, HashMap};

use super::term::ClassTerm;
use super::ClassHierarchy;
use crate::error::{Result, StatError};

/// Path separator for tree hierarchies
pub const PATH_SEPARATOR: char = '/';

/// Builder for [`ClassHierarchy`]
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
    error: Option<StatError>,
}

impl HierarchyBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a term; fails at build time if any earlier call already declared the id
    pub fn add_term(mut self, id: &str) -> Self {
        if self.positions.contains_key(id) {
            self.fail(StatError::DuplicateClass(id.to_string()));
        } else {
            self.ensure(id);
        }
        self
    }

    /// Declare every prefix of a slash-separated path, e.g. `"A/B/C"` declares
    /// `A`, `A/B` and `A/B/C` with the corresponding parent links.
    pub fn add_path(mut self, path: &str) -> Self {
        if path.split(PATH_SEPARATOR).any(str::is_empty) {
            self.fail(StatError::UnknownClass(path.to_string()));
            return self;
        }

        let mut parent: Option<usize> = None;
        for (end, _) in path
            .match_indices(PATH_SEPARATOR)
            .chain(std::iter::once((path.len(), "")))
        {
            let pos = self.ensure(&path[..end]);
            if let Some(parent) = parent {
                self.link(parent, pos);
            }
            parent = Some(pos);
        }
        self
    }

    /// Declare a `parent -> child` link, declaring both terms if needed
    pub fn add_edge(mut self, parent: &str, child: &str) -> Self {
        if parent == child {
            self.fail(StatError::CyclicHierarchy(child.to_string()));
            return self;
        }
        let parent = self.ensure(parent);
        let child = self.ensure(child);
        self.link(parent, child);
        self
    }

    /// Assign indices and compute the ancestor closure
    pub fn build(self) -> Result<ClassHierarchy> {
        if let Some(err) = self.error {
            return Err(err);
        }
        if self.ids.is_empty() {
            return Err(StatError::EmptyHierarchy);
        }

        let n = self.ids.len();
        let mut parents_of: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut children_of: Vec<Vec<usize>> = vec![Vec::new(); n];
        for &(parent, child) in &self.edges {
            parents_of[child].push(parent);
            children_of[parent].push(child);
        }

        // Kahn's algorithm; the ready set is ordered by declaration position
        let mut in_degree: Vec<usize> = parents_of.iter().map(Vec::len).collect();
        let mut ready: BTreeSet<usize> = (0..n).filter(|&pos| in_degree[pos] == 0).collect();
        let mut order = Vec::with_capacity(n);
        while let Some(pos) = ready.pop_first() {
            order.push(pos);
            for &child in &children_of[pos] {
                in_degree[child] -= 1;
                if in_degree[child] == 0 {
                    ready.insert(child);
                }
            }
        }

        if order.len() < n {
            let stuck = (0..n).find(|&pos| in_degree[pos] > 0).unwrap_or(0);
            return Err(StatError::CyclicHierarchy(self.ids[stuck].clone()));
        }

        let mut index_of = vec![0usize; n];
        for (index, &pos) in order.iter().enumerate() {
            index_of[pos] = index;
        }

        let mut terms: Vec<ClassTerm> = Vec::with_capacity(n);
        for &pos in &order {
            let mut parents: Vec<usize> = parents_of[pos].iter().map(|&p| index_of[p]).collect();
            let mut children: Vec<usize> =
                children_of[pos].iter().map(|&c| index_of[c]).collect();
            parents.sort_unstable();
            children.sort_unstable();
            // Parents precede the term in `order`, so their depth is already known
            let depth = parents
                .iter()
                .map(|&p| terms[p].depth + 1)
                .min()
                .unwrap_or(0);
            terms.push(ClassTerm {
                id: self.ids[pos].clone(),
                index: index_of[pos],
                parents,
                children,
                depth,
            });
        }

        Ok(ClassHierarchy::from_terms(terms))
    }

    fn ensure(&mut self, id: &str) -> usize {
        if let Some(&pos) = self.positions.get(id) {
            return pos;
        }
        let pos = self.ids.len();
        self.ids.push(id.to_string());
        self.positions.insert(id.to_string(), pos);
        pos
    }

    fn link(&mut self, parent: usize, child: usize) {
        if !self.edges.contains(&(parent, child)) {
            self.edges.push((parent, child));
        }
    }

    fn fail(&mut self, err: StatError) {
        if self.error.is_none() {
            self.error = Some(err);
        }
    }
}

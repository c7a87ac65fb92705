//! A single class term of the hierarchy

/// Class term with its stable index and graph links
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTerm {
    pub(super) id: String,
    pub(super) index: usize,
    pub(super) parents: Vec<usize>,
    pub(super) children: Vec<usize>,
    pub(super) depth: usize,
}

impl ClassTerm {
    /// Term identifier (a slash-separated path for tree hierarchies)
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Stable index in `[0, total)`
    pub fn index(&self) -> usize {
        self.index
    }

    /// Direct parents (empty for top-level terms)
    pub fn parents(&self) -> &[usize] {
        &self.parents
    }

    /// Direct children
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    /// Length of the shortest path from the (implicit) root; top-level terms have depth 0
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the term hangs directly below the root
    pub fn is_top_level(&self) -> bool {
        self.parents.is_empty()
    }

    /// Whether the term has no children
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

//! Error types with actionable diagnostics.
//!
//! Every contract violation the statistic engine can detect surfaces here as a
//! typed failure. Numeric trouble inside the significance test is *not* an
//! error: it is recovered locally and only logged.

use std::path::PathBuf;
use thiserror::Error;

use crate::config::ValidationError;

/// Result type alias for hierstat operations.
pub type Result<T> = std::result::Result<T, StatError>;

/// Errors raised by the hierarchy model and the statistic engine.
#[derive(Error, Debug)]
pub enum StatError {
    /// Two statistics (or a statistic and a hierarchy) disagree on the number of classes.
    #[error("Class count mismatch: expected {expected} classes, got {actual}\n  → Statistics must be built over the same hierarchy")]
    ShapeMismatch { expected: usize, actual: usize },

    /// A tuple or caller referenced a class index outside the hierarchy.
    #[error("Class index {index} out of range for a hierarchy of {total} classes")]
    ClassIndexOutOfRange { index: usize, total: usize },

    /// A vote was requested over zero ensemble members.
    #[error("Cannot vote over an empty set of statistics\n  → Pass at least one ensemble member")]
    EmptyVote,

    /// A class id is not part of the hierarchy.
    #[error("Unknown class: {0}")]
    UnknownClass(String),

    /// The same class id was declared twice where uniqueness is required.
    #[error("Duplicate class: {0}")]
    DuplicateClass(String),

    /// The parent relation contains a cycle.
    #[error("Cycle in class hierarchy involving '{0}'\n  → Parent links must form a DAG")]
    CyclicHierarchy(String),

    /// A hierarchy without any class term.
    #[error("Class hierarchy has no terms")]
    EmptyHierarchy,

    /// Configuration value is outside its valid range.
    #[error(transparent)]
    InvalidConfig(#[from] ValidationError),

    /// Configuration could not be parsed.
    #[error("Invalid configuration syntax: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// IO error with context.
    #[error("IO error reading {path}\n  Cause: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parameters rejected by the hypergeometric distribution.
    #[error("Invalid hypergeometric parameters (population={population}, successes={successes}, draws={draws}): {message}")]
    InvalidDistribution {
        population: i64,
        successes: i64,
        draws: i64,
        message: String,
    },
}

impl StatError {
    /// Create an IO error bound to the path being read.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if this error stems from caller input (as opposed to a numeric failure).
    pub fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::ShapeMismatch { .. } | Self::ClassIndexOutOfRange { .. } | Self::EmptyVote
        )
    }

    /// Get the error code for structured output.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ShapeMismatch { .. } => "H001",
            Self::ClassIndexOutOfRange { .. } => "H002",
            Self::EmptyVote => "H003",
            Self::UnknownClass(_) => "H010",
            Self::DuplicateClass(_) => "H011",
            Self::CyclicHierarchy(_) => "H012",
            Self::EmptyHierarchy => "H013",
            Self::InvalidConfig(_) => "H020",
            Self::ConfigParse(_) => "H021",
            Self::Io { .. } => "H030",
            Self::InvalidDistribution { .. } => "H040",
        }
    }
}

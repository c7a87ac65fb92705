//! Run-wide statistic configuration
//!
//! Settings are declared in YAML, validated once, and copied into every
//! statistic built for the run.

mod builder;
mod loader;
mod schema;
pub mod validate;


pub use builder::{build_class_weights, build_context, build_statistic};
pub use loader::{load_config, load_config_str};
pub use schema::{Compatibility, DistanceMode, MeanEstimator, StatConfig};
pub use validate::{validate_config, ValidationError};

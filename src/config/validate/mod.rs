//! Configuration validation
//!
//! Validates statistic settings before any statistic is built from them.

mod error;
mod validator;

#[cfg(test)]
mod proptests;

pub use error::ValidationError;
pub use validator::validate_config;

//! Core error types

use thiserror::Error;

/// Errors shared across the concierge crates
#[derive(Error, Debug)]
pub enum Error {
    #[error("Template error: {0}")]
    Template(String),
}

/// Result alias using the core [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

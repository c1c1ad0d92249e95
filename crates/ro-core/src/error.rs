//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

/// The top-level error type for `ro-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A component refused to be built from malformed parameters.
    #[error("configuration error: {0}")]
    Config(String),

    /// The operating system entropy source could not seed a generator.
    #[error("entropy source unavailable: {0}")]
    EntropyUnavailable(String),
}

impl CoreError {
    /// Shorthand for building a [`CoreError::Config`] from anything printable.
    pub fn config(msg: impl Into<String>) -> Self {
        CoreError::Config(msg.into())
    }
}

/// Shorthand result type for all `ro-*` crates.
pub type CoreResult<T> = Result<T, CoreError>;

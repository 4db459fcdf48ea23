//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `From`.

use thiserror::Error;

/// Errors raised while validating core configuration.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid establishment parameter `{name}` = {value}: {reason}")]
    InvalidParams {
        name:   &'static str,
        value:  f64,
        reason: &'static str,
    },
}

/// Shorthand result type for `estab-core`.
pub type CoreResult<T> = Result<T, CoreError>;

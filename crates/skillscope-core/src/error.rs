//! Core error taxonomy.
//!
//! Three failure classes cover the whole core surface: bad input shape or
//! range, a referenced id that does not exist, and an aggregation invariant
//! that would be violated. Mutations addressing a missing member are silent
//! no-ops by design, not errors — a single-operator editing tool should not
//! fail a gesture whose target already disappeared.

use thiserror::Error;

/// Errors produced by the core model, store, and aggregation functions.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Input failed shape or range validation (out-of-range level, empty or
    /// unparseable date).
    #[error("invalid input: {0}")]
    Validation(String),

    /// A referenced id is absent from the live state.
    #[error("not found: {0}")]
    NotFound(String),

    /// An aggregation invariant would be violated (empty input).
    #[error("domain invariant violated: {0}")]
    Domain(String),
}

impl CoreError {
    /// Returns `true` for input-validation failures.
    pub fn is_validation(&self) -> bool {
        matches!(self, CoreError::Validation(_))
    }

    /// Returns `true` for missing-reference failures.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }
}

/// Convenience alias used throughout the core crate.
pub type CoreResult<T> = Result<T, CoreError>;

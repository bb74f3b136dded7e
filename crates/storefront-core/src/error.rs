//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  └── CoreError        - Unparseable sort keys / category filters       │
//! │                                                                         │
//! │  storefront-client errors (separate crate)                             │
//! │  └── ClientError      - Transport, status, decode failures             │
//! │                                                                         │
//! │  storefront app errors                                                 │
//! │  └── UserError        - What the presentation layer sees (sanitized)   │
//! │                                                                         │
//! │  Flow: ClientError → UserError → view snapshot                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A duplicate cart add is deliberately absent here: it is an
//! [`AddOutcome`](crate::cart::AddOutcome), not a failure.

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Sort key text does not name one of the known keys.
    #[error("Unknown sort key: '{0}'")]
    UnknownSortKey(String),

    /// Category filter text was empty.
    #[error("Category must not be empty")]
    EmptyCategory,
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

//! Rally error types

use thiserror::Error;

/// Errors raised around the rally store
///
/// The store's own mutations never fail; these cover lookups and parsing
/// done on behalf of callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RallyError {
    /// No rally with the requested id
    #[error("Rally not found: {0}")]
    NotFound(String),

    /// Sort order name not recognised
    #[error("Unknown sort order: {0} (expected newest, popular, ending-soon or most-funded)")]
    UnknownSortOrder(String),
}

//! Error types for pgqb

use thiserror::Error;

/// Result type alias for pgqb operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Errors raised while building or rendering statements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    /// A conjunction outside `AND`, `OR`, `AND NOT`, `OR NOT`
    #[error("Invalid conjunction specified, must be one of AND, OR, AND NOT or OR NOT, but '{0}' was found")]
    InvalidConjunction(String),

    /// Full-text match with mismatched (or empty) column and value lists
    #[error("Full-text match requires the same non-zero number of columns and values, got {columns} columns and {values} values")]
    MatchArity { columns: usize, values: usize },

    /// Statement state that cannot be rendered
    #[error("Validation error: {0}")]
    Validation(String),

    /// A bind value that cannot be encoded for the target type
    #[error("Parameter error: {0}")]
    Param(String),
}

impl QueryError {
    /// Create an invalid conjunction error
    pub fn invalid_conjunction(found: impl Into<String>) -> Self {
        Self::InvalidConjunction(found.into())
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Check if this is an invalid conjunction error
    pub fn is_invalid_conjunction(&self) -> bool {
        matches!(self, Self::InvalidConjunction(_))
    }
}

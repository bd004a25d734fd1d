use thiserror::Error;

use crate::error::{DomainError, ErrorCode};

/// Errors raised while rendering a query plan against a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Ordering names a member the schema does not know.
    #[error("unknown ordering member `{0}`")]
    UnknownOrderingMember(String),
    /// Filter names a member that is not searchable.
    #[error("member `{0}` cannot be searched")]
    UnsearchableMember(String),
}

/// Result type for query operations.
pub type QueryResult<T> = Result<T, QueryError>;

impl QueryError {
    /// Gets the name of the request field that caused the error.
    pub const fn get_violating_field_name(&self) -> &'static str {
        match self {
            Self::UnknownOrderingMember(_) => "sort",
            Self::UnsearchableMember(_) => "filter",
        }
    }
}

impl DomainError for QueryError {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

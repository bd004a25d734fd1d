use inkpost_request::{
    error::{CommonError, DomainError, ErrorCode, RequestError},
    query::error::QueryError,
};
use thiserror::Error;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failure inside the entity store or another dependency. Opaque to
    /// callers and propagated unchanged.
    #[error("internal error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),

    /// Rejected request: invalid input, missing entity or uniqueness conflict.
    #[error(transparent)]
    Request(#[from] RequestError),
}

pub type AppResult<T> = Result<T, AppError>;

macro_rules! impl_internal_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                AppError::Internal(Box::new(err))
            }
        }
        )*
    };
}
impl_internal_errors!(config::ConfigError);

macro_rules! impl_request_errors {
    ( $( $type:ty ),* $(,)? ) => {
        $(
        impl From<$type> for AppError {
            fn from(err: $type) -> Self {
                RequestError::from(err).into()
            }
        }
        )*
    };
}
impl_request_errors!(CommonError, QueryError);

impl AppError {
    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Internal(err.into())
    }

    /// Distinct code per failure kind, for mapping onto transport errors.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Internal(_) => ErrorCode::Internal,
            Self::Request(err) => err.code(),
        }
    }

    pub fn downcast_domain_ref<T: DomainError + 'static>(&self) -> Option<&T> {
        match self {
            Self::Request(err) => err.downcast_domain_ref(),
            Self::Internal(_) => None,
        }
    }
}

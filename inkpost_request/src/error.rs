use itertools::Itertools;
use std::error::Error;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Coarse classification of a failure, used by callers that need to map
/// errors onto their own status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidArgument,
    NotFound,
    AlreadyExists,
    Internal,
}

#[derive(Error, Debug)]
pub enum RequestError {
    #[error("invalid `{name}` request")]
    BadRequest {
        name: String,
        violations: Vec<FieldError>,
    },
    #[error(transparent)]
    Field(FieldError),
    #[error("{0}")]
    Domain(DomainErrorBox),
}

pub type RequestResult<T> = Result<T, RequestError>;

#[derive(Debug)]
pub struct FieldError {
    pub field: String,
    pub error: DomainErrorBox,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommonError {
    #[error("{kind} not found using ID {id}")]
    ResourceNotFound { kind: String, id: String },
    #[error("{kind} {field} `{value}` is already in use")]
    AlreadyExists {
        kind: String,
        field: String,
        value: String,
    },
    #[error("no value provided for required field")]
    RequiredFieldMissing,
    #[error("expected a string in format `{expected}`")]
    InvalidStringFormat { expected: String },
    #[error("invalid ID format")]
    InvalidId,
    #[error("invalid date time format")]
    InvalidDateTime,
}

pub trait DomainError: Error {
    fn as_any(&self) -> &dyn std::any::Any;

    fn code(&self) -> ErrorCode {
        ErrorCode::InvalidArgument
    }
}

pub type DomainErrorBox = Box<dyn DomainError + Send + Sync>;

impl RequestError {
    #[must_use]
    pub fn bad_request<N, V, F, E>(name: N, violations: V) -> Self
    where
        N: Display,
        V: IntoIterator<Item = (F, E)>,
        F: Display,
        E: Into<DomainErrorBox>,
    {
        Self::BadRequest {
            name: name.to_string(),
            violations: violations
                .into_iter()
                .map(|(field, error)| FieldError {
                    field: field.to_string(),
                    error: error.into(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn domain<E: Into<DomainErrorBox>>(error: E) -> Self {
        Self::Domain(error.into())
    }

    #[must_use]
    pub fn field<F, E>(field: F, error: E) -> Self
    where
        F: Display,
        E: Into<DomainErrorBox>,
    {
        FieldError {
            field: field.to_string(),
            error: error.into(),
        }
        .into()
    }

    /// Turns a single field or domain error into a bad request for `name`.
    #[must_use]
    pub fn wrap_request<N: Display>(self, name: N) -> Self {
        match self {
            Self::Field(error) => Self::bad_request(name, [(error.field, error.error)]),
            error => error,
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::BadRequest { .. } => ErrorCode::InvalidArgument,
            Self::Field(error) => error.error.code(),
            Self::Domain(error) => error.code(),
        }
    }

    pub fn violations(&self) -> Vec<&FieldError> {
        match self {
            Self::BadRequest { violations, .. } => violations.iter().collect(),
            Self::Field(error) => vec![error],
            Self::Domain(_) => Vec::new(),
        }
    }

    pub fn downcast_domain_ref<T: DomainError + 'static>(&self) -> Option<&T> {
        match self {
            Self::Domain(error) => error.as_any().downcast_ref::<T>(),
            Self::Field(error) => error.error.as_any().downcast_ref::<T>(),
            Self::BadRequest { .. } => None,
        }
    }
}

impl From<FieldError> for RequestError {
    fn from(err: FieldError) -> Self {
        Self::Field(err)
    }
}

impl<T: 'static + DomainError + Send + Sync> From<T> for RequestError {
    fn from(err: T) -> Self {
        RequestError::Domain(Box::new(err))
    }
}

impl<T> From<T> for DomainErrorBox
where
    T: DomainError + Send + Sync + 'static,
{
    fn from(err: T) -> Self {
        Box::new(err)
    }
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "field `{}` error: {}", self.field, self.error)
    }
}

impl Error for FieldError {}

impl FieldError {
    pub fn new<F: Display, E: Into<DomainErrorBox>>(field: F, error: E) -> Self {
        Self {
            field: field.to_string(),
            error: error.into(),
        }
    }
}

impl DomainError for CommonError {
    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn code(&self) -> ErrorCode {
        match self {
            Self::ResourceNotFound { .. } => ErrorCode::NotFound,
            Self::AlreadyExists { .. } => ErrorCode::AlreadyExists,
            _ => ErrorCode::InvalidArgument,
        }
    }
}

impl CommonError {
    pub fn not_found<K: Display, I: Display>(kind: K, id: I) -> Self {
        Self::ResourceNotFound {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }

    pub fn already_exists<K, F, V>(kind: K, field: F, value: V) -> Self
    where
        K: Display,
        F: Display,
        V: Display,
    {
        Self::AlreadyExists {
            kind: kind.to_string(),
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}

/// Renders all violations of a bad request as `field: message` pairs.
pub fn describe_violations(violations: &[FieldError]) -> String {
    violations
        .iter()
        .map(|violation| format!("{}: {}", violation.field, violation.error))
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let err = RequestError::bad_request(
            "CreateAuthor",
            [
                ("name", CommonError::RequiredFieldMissing),
                ("email", CommonError::RequiredFieldMissing),
            ],
        );
        assert_eq!(err.to_string(), "invalid `CreateAuthor` request");
        assert_eq!(err.code(), ErrorCode::InvalidArgument);
        let RequestError::BadRequest { violations, .. } = &err else {
            panic!("expected bad request");
        };
        assert_eq!(
            describe_violations(violations),
            "name: no value provided for required field, email: no value provided for required field"
        );
    }

    #[test]
    fn codes() {
        let err = RequestError::domain(CommonError::not_found("Author", "01ABC"));
        assert_eq!(err.to_string(), "Author not found using ID 01ABC");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(matches!(
            err.downcast_domain_ref::<CommonError>(),
            Some(CommonError::ResourceNotFound { id, .. }) if id == "01ABC"
        ));

        let err = RequestError::domain(CommonError::already_exists("Author", "email", "a@b.c"));
        assert_eq!(err.to_string(), "Author email `a@b.c` is already in use");
        assert_eq!(err.code(), ErrorCode::AlreadyExists);
    }

    #[test]
    fn wrap_request() {
        let err = RequestError::field("title", CommonError::RequiredFieldMissing)
            .wrap_request("CreatePost");
        assert!(matches!(
            &err,
            RequestError::BadRequest { name, violations }
                if name == "CreatePost" && violations.len() == 1
        ));
        assert_eq!(err.violations()[0].field, "title");
    }
}

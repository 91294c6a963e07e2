//! The pluggable validation capability.
//!
//! A [`Validator`] decides whether a decoded object may be created, updated or
//! deleted. It reports its decision as a [`ValidationOutcome`]: warnings plus
//! either success or a [`ValidationError`]. Validators know nothing about HTTP
//! beyond the status they may choose to attach to a [`StatusError`].

use http::StatusCode;
use thiserror::Error;

use super::response::{REASON_FORBIDDEN, REASON_INVALID, Status};

/// Ordered, non-blocking advisories.
pub type Warnings = Vec<String>;

/// A rejection that carries its own status.
///
/// The handler copies code, reason and message into the response verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .status.message)]
pub struct StatusError {
    pub status: Status,
}

impl StatusError {
    pub fn new(code: StatusCode, reason: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: Status::new(code, reason, message),
        }
    }

    /// 422 Unprocessable Entity with reason `Invalid`.
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, REASON_INVALID, message)
    }

    /// 403 Forbidden with reason `Forbidden`.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, REASON_FORBIDDEN, message)
    }

    pub fn status(&self) -> &Status {
        &self.status
    }
}

impl From<Status> for StatusError {
    fn from(status: Status) -> Self {
        Self { status }
    }
}

/// Why a validator rejected an object.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Rejection with an explicit status
    #[error(transparent)]
    Status(#[from] StatusError),

    /// Rejection with only a message
    #[error("{0}")]
    Plain(String),
}

impl ValidationError {
    pub fn plain(message: impl Into<String>) -> Self {
        ValidationError::Plain(message.into())
    }
}

/// Result of one validator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub warnings: Warnings,
    pub result: Result<(), ValidationError>,
}

impl Default for ValidationOutcome {
    fn default() -> Self {
        Self::allowed()
    }
}

impl ValidationOutcome {
    /// Success with no warnings.
    pub fn allowed() -> Self {
        Self {
            warnings: Vec::new(),
            result: Ok(()),
        }
    }

    /// Rejection with no warnings.
    pub fn denied(error: impl Into<ValidationError>) -> Self {
        Self {
            warnings: Vec::new(),
            result: Err(error.into()),
        }
    }

    /// Append warnings, keeping their order and any duplicates.
    pub fn with_warnings<I, S>(mut self, warnings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.warnings.extend(warnings.into_iter().map(Into::into));
        self
    }

    pub fn warn(&mut self, warning: impl Into<String>) {
        self.warnings.push(warning.into());
    }

    pub fn is_allowed(&self) -> bool {
        self.result.is_ok()
    }
}

impl From<Result<Warnings, ValidationError>> for ValidationOutcome {
    fn from(result: Result<Warnings, ValidationError>) -> Self {
        match result {
            Ok(warnings) => Self::allowed().with_warnings(warnings),
            Err(error) => Self::denied(error),
        }
    }
}

/// Validation hooks for one resource kind.
///
/// Implementations must be stateless or internally synchronised: one
/// validator is shared by every concurrent request.
pub trait Validator<K>: Send + Sync {
    /// Validate an object about to be created.
    fn validate_create(&self, object: &K) -> ValidationOutcome;

    /// Validate the replacement of `old` by `new`.
    fn validate_update(&self, new: &K, old: &K) -> ValidationOutcome;

    /// Validate the deletion of `old`.
    fn validate_delete(&self, old: &K) -> ValidationOutcome;
}

impl<K, V> Validator<K> for &V
where
    V: Validator<K> + ?Sized,
{
    fn validate_create(&self, object: &K) -> ValidationOutcome {
        (**self).validate_create(object)
    }

    fn validate_update(&self, new: &K, old: &K) -> ValidationOutcome {
        (**self).validate_update(new, old)
    }

    fn validate_delete(&self, old: &K) -> ValidationOutcome {
        (**self).validate_delete(old)
    }
}

impl<K, V> Validator<K> for std::sync::Arc<V>
where
    V: Validator<K> + ?Sized,
{
    fn validate_create(&self, object: &K) -> ValidationOutcome {
        (**self).validate_create(object)
    }

    fn validate_update(&self, new: &K, old: &K) -> ValidationOutcome {
        (**self).validate_update(new, old)
    }

    fn validate_delete(&self, old: &K) -> ValidationOutcome {
        (**self).validate_delete(old)
    }
}

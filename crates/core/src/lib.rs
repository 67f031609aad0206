//! Shared primitives for all Rust crates in Bucketgate.

#![forbid(unsafe_code)]

/// Authentication primitives shared across services.
pub mod auth;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use auth::UserIdentity;

/// Result type used across Bucketgate crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Creates a validated non-empty string, naming the field in the error.
    pub fn for_field(field: &str, value: impl Into<String>) -> AppResult<Self> {
        Self::new(value).map_err(|_| AppError::Validation(format!("{field} must not be empty")))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Caller is not authenticated or has no resolvable role.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// A batch write persisted fewer records than requested.
    ///
    /// Records listed in `ids` stay persisted; nothing is rolled back.
    #[error("partial write: {succeeded} of {attempted} records were stored")]
    PartialWrite {
        /// Number of records the caller asked for.
        attempted: usize,
        /// Number of records durably written.
        succeeded: usize,
        /// Identifiers of the records that were written.
        ids: Vec<String>,
    },

    /// Persistence or object store failure.
    #[error("storage error: {0}")]
    Storage(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn for_field_names_the_field() {
        let result = NonEmptyString::for_field("reason", "");
        assert!(
            matches!(result, Err(AppError::Validation(message)) if message == "reason must not be empty")
        );
    }

    #[test]
    fn deserializing_blank_string_is_rejected() {
        assert!(serde_json::from_str::<NonEmptyString>("\"  \"").is_err());
        assert!(
            serde_json::from_str::<NonEmptyString>("\"logs\"")
                .is_ok_and(|value| value.as_str() == "logs")
        );
    }

    #[test]
    fn partial_write_message_reports_counts() {
        let error = AppError::PartialWrite {
            attempted: 3,
            succeeded: 1,
            ids: vec!["a".to_owned()],
        };
        assert_eq!(
            error.to_string(),
            "partial write: 1 of 3 records were stored"
        );
    }
}

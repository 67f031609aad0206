use bucketgate_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Validated object key inside a bucket.
///
/// A key ending in `/` is a zero-byte folder marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Maximum key length accepted by common object stores.
    pub const MAX_LENGTH: usize = 1024;

    /// Creates a validated object key.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();

        if value.is_empty() || value == "/" {
            return Err(AppError::Validation("object key must not be empty".to_owned()));
        }

        if value.len() > Self::MAX_LENGTH {
            return Err(AppError::Validation(format!(
                "object key must not exceed {} bytes",
                Self::MAX_LENGTH
            )));
        }

        if value.starts_with('/') {
            return Err(AppError::Validation(
                "object key must not start with '/'".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Builds the folder marker key for `name` under `prefix`.
    pub fn folder(prefix: &str, name: &str) -> AppResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::Validation("folder name must not be empty".to_owned()));
        }

        if name.contains('/') {
            return Err(AppError::Validation(
                "folder name cannot contain slashes".to_owned(),
            ));
        }

        Self::new(format!("{}{name}/", normalize_prefix(prefix)))
    }

    /// Builds a file key for `relative_path` under `prefix`.
    pub fn under_prefix(prefix: &str, relative_path: &str) -> AppResult<Self> {
        Self::new(format!(
            "{}{}",
            normalize_prefix(prefix),
            relative_path.trim_start_matches('/')
        ))
    }

    /// Returns whether this key is a folder marker.
    #[must_use]
    pub fn is_folder_marker(&self) -> bool {
        self.0.ends_with('/')
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Display for ObjectKey {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Normalizes a listing prefix to either empty or ending with `/`.
#[must_use]
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.ends_with('/') {
        trimmed.to_owned()
    } else {
        format!("{trimmed}/")
    }
}

//! Unified error handling for the Folio library
//!
//! Every fallible operation in the crate returns [`Result`], whose error type
//! separates hard validation failures, resolution failures and plain I/O.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the Folio library
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FolioError {
    /// IO operation failed
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The record does not start with a delimited metadata block
    #[error("Missing frontmatter in record: {}", path.display())]
    MissingFrontmatter {
        /// Record file that failed to decode
        path: PathBuf,
    },

    /// No interpretation of the input yields an existing record file
    #[error("Record not found: {0}. Provide a path under the content root or a published URL.")]
    RecordNotFound(String),

    /// Title is empty after applying all edits
    #[error("Title is required")]
    MissingTitle,

    /// Date input is malformed or names an impossible calendar day
    #[error("Invalid date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// The day directory already holds the highest two-digit ordinal
    #[error("Too many records for {} (ordinal exceeds 99)", day_dir.display())]
    OrdinalExhausted {
        /// Day directory that has no ordinal left
        day_dir: PathBuf,
    },

    /// Target record directory already exists
    #[error("Record folder already exists: {}", .0.display())]
    RecordExists(PathBuf),

    /// The content root directory is missing
    #[error("Missing content directory {}. Run setup first.", .0.display())]
    ContentRootMissing(PathBuf),

    /// A domain value could not be parsed
    #[error("Could not parse a domain from '{0}'. Use my-blog.com or https://my-blog.com.")]
    InvalidDomain(String),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A lower-level failure with a description of what was being attempted
    #[error("{message}")]
    Context {
        /// Human readable context
        message: String,
        /// Underlying error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FolioError {
    /// Whether the error is a user-input validation failure rather than a
    /// lookup or I/O failure
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FolioError::MissingTitle
                | FolioError::InvalidDate(_)
                | FolioError::OrdinalExhausted { .. }
                | FolioError::RecordExists(_)
                | FolioError::InvalidDomain(_)
        )
    }
}

/// Result type alias for Folio operations
pub type Result<T> = std::result::Result<T, FolioError>;

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<S: Into<String>>(self, msg: S) -> Result<T>;

    /// Add context with a closure that's only called on error
    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context<S: Into<String>>(self, msg: S) -> Result<T> {
        self.map_err(|e| FolioError::Context {
            message: msg.into(),
            source: Box::new(e),
        })
    }

    fn with_context<F, S>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| FolioError::Context {
            message: f().into(),
            source: Box::new(e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let err: Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "file not found").into());
        let err_with_context = err.context("Failed to read site.json");

        let msg = err_with_context.unwrap_err().to_string();
        assert!(msg.contains("Failed to read site.json"));
    }

    #[test]
    fn test_with_context_keeps_source() {
        let result: std::result::Result<(), io::Error> =
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
        let err = result
            .with_context(|| "Failed to write record".to_string())
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to write record");
        assert!(!err.is_validation());
        let source = std::error::Error::source(&err).unwrap();
        assert_eq!(source.to_string(), "read-only");
    }

    #[test]
    fn test_validation_classification() {
        assert!(FolioError::MissingTitle.is_validation());
        assert!(FolioError::InvalidDate("2024-13-01".into()).is_validation());
        assert!(FolioError::RecordExists(PathBuf::from("x")).is_validation());
        assert!(!FolioError::RecordNotFound("x".into()).is_validation());
        assert!(!FolioError::MissingFrontmatter {
            path: PathBuf::from("x")
        }
        .is_validation());
    }

    #[test]
    fn test_ordinal_exhausted_message() {
        let err = FolioError::OrdinalExhausted {
            day_dir: PathBuf::from("content/2024/03/05"),
        };
        assert_eq!(
            err.to_string(),
            "Too many records for content/2024/03/05 (ordinal exceeds 99)"
        );
    }
}

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Debug, Error)]
pub enum FolioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Error reading {file}: {source}")]
    Json {
        file: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Could not find {kind} {id}")]
    NotFound { kind: &'static str, id: u64 },

    #[error("Template error: {0}")]
    Template(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Not authorized")]
    Unauthorized,
}

impl FolioError {
    pub fn not_found(kind: &'static str, id: u64) -> Self {
        FolioError::NotFound { kind, id }
    }
}

/// A user-facing problem with submitted or stored data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),
    #[error("{field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ValidationError::Invalid { field, reason: reason.into() }
    }
}

pub(crate) fn require(field: &'static str, value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::Required("Title").to_string(), "Title is required");
        assert_eq!(ValidationError::invalid("Likes", "must be a non-negative number").to_string(),
                   "Likes must be a non-negative number");
        assert_eq!(FolioError::not_found("blog post", 7).to_string(), "Could not find blog post 7");
    }

    #[test]
    fn test_require() {
        assert_eq!(require("Title", "  "), Err(ValidationError::Required("Title")));
        assert!(require("Title", "x").is_ok());
    }
}

use std::io;
use thiserror::Error;

/// Errors that can occur while loading or validating a manifest
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse fail:\n  {}", .0.join("\n  "))]
    Invalid(Vec<String>),
}

impl ManifestError {
    /// Path-qualified validation messages, empty for I/O and parse errors
    pub fn validation_errors(&self) -> &[String] {
        match self {
            ManifestError::Invalid(errors) => errors,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::*;

    #[test]
    fn test_invalid_display_lists_every_error() {
        let err = ManifestError::Invalid(vec![
            "root.exportedMethods[0] not object".to_string(),
            "root.exportedMethods[2] not object".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "Parse fail:\n  root.exportedMethods[0] not object\n  root.exportedMethods[2] not object"
        );
        assert_eq!(err.validation_errors().len(), 2);
    }

    #[test]
    fn test_io_error_has_no_validation_errors() {
        let err = ManifestError::from(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert!(err.validation_errors().is_empty());
    }
}

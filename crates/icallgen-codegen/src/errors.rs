use icallgen_manifest::ManifestError;
use thiserror::Error;

/// Errors that stop a binding from being generated
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    #[error("Unit name must not be empty")]
    EmptyUnitName,
}

impl GenerateError {
    /// Path-qualified validation messages, if generation stopped on validation
    pub fn validation_errors(&self) -> &[String] {
        match self {
            GenerateError::Manifest(err) => err.validation_errors(),
            GenerateError::EmptyUnitName => &[],
        }
    }
}

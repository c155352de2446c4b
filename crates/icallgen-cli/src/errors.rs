//! Error types for the icallgen commands

use icallgen_codegen::GenerateError;
use icallgen_config::ConfigError;
use icallgen_manifest::ManifestError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating a binding file
#[derive(Error, Debug)]
pub enum GenerateCommandError {
    #[error("Manifest file does not exist: {}", .0.display())]
    ManifestNotFound(PathBuf),

    #[error("Output folder does not exist: {}", .0.display())]
    OutputDirNotFound(PathBuf),

    #[error("Already exists: {} (pass --override to replace it)", .0.display())]
    OutputExists(PathBuf),

    #[error("Cannot derive a unit name from manifest path: {}", .0.display())]
    InvalidManifestName(PathBuf),

    #[error("Parse fail:\n  {}", .0.join("\n  "))]
    Validation(Vec<String>),

    #[error("Failed to read manifest: {0}")]
    Manifest(ManifestError),

    #[error("Generation failed: {0}")]
    Generate(GenerateError),

    #[error("Manifests {first} and {second} both generate unit '{unit}'")]
    DuplicateUnit {
        unit: String,
        first: String,
        second: String,
    },

    #[error("{failed} of {total} manifest(s) failed")]
    BatchFailed { failed: usize, total: usize },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<ManifestError> for GenerateCommandError {
    fn from(err: ManifestError) -> Self {
        match err {
            ManifestError::Invalid(errors) => GenerateCommandError::Validation(errors),
            other => GenerateCommandError::Manifest(other),
        }
    }
}

impl From<GenerateError> for GenerateCommandError {
    fn from(err: GenerateError) -> Self {
        match err {
            GenerateError::Manifest(inner) => inner.into(),
            other => GenerateCommandError::Generate(other),
        }
    }
}

//! icallgen manifest model
//!
//! This crate holds the plugin interface manifest types and the checks that
//! gate code generation. A manifest is a JSON document whose
//! `exportedMethods` list describes the native functions a plugin exports.
//!
//! Validation runs on the raw JSON before decoding, so a structurally broken
//! manifest is reported as a list of path-qualified messages rather than a
//! single decode failure.

pub mod errors;
pub mod loader;
pub mod types;
pub mod validate;

pub use errors::ManifestError;
pub use loader::{decode_manifest, decode_manifest_with, load_from_path, read_document};
pub use types::{ExportedMethod, FunctionPrototype, Manifest, TypeRef, FUNCTION_TYPE, VOID_TYPE};
pub use validate::{validate_manifest, validate_strict};

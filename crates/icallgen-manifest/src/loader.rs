//! Manifest loading
//!
//! Reads a manifest document from disk or from a string, runs a validator
//! over the raw JSON and only then decodes it into [`Manifest`]. Decoding
//! never happens on a document that failed validation.
//!
//! Methods are decoded one at a time. A field holding the wrong JSON type is
//! reported as a path-qualified message in the same list validation uses,
//! and every bad method is reported, not just the first.

use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::ManifestError;
use crate::types::{ExportedMethod, Manifest, TypeRef};
use crate::validate::{validate_manifest, ROOT_METHODS};

/// Read and parse a JSON document without validating it
pub fn read_document(manifest_path: &Path) -> Result<Value, ManifestError> {
    debug!("Reading manifest from: {:?}", manifest_path);

    let content = fs::read_to_string(manifest_path)?;
    let doc: Value = serde_json::from_str(&content)?;
    Ok(doc)
}

/// Validate a raw document with the shallow validator and decode it
pub fn decode_manifest(doc: &Value) -> Result<Manifest, ManifestError> {
    decode_manifest_with(doc, validate_manifest)
}

/// Validate a raw document with a caller-supplied validator and decode it
pub fn decode_manifest_with<V>(doc: &Value, validator: V) -> Result<Manifest, ManifestError>
where
    V: FnOnce(&Value) -> Vec<String>,
{
    let errors = validator(doc);
    if !errors.is_empty() {
        debug!("Manifest rejected with {} validation error(s)", errors.len());
        return Err(ManifestError::Invalid(errors));
    }

    let manifest = decode_methods(doc)?;
    info!(
        "Manifest decoded: {} exported method(s)",
        manifest.exported_methods.len()
    );
    Ok(manifest)
}

fn decode_methods(doc: &Value) -> Result<Manifest, ManifestError> {
    let items = match doc.get("exportedMethods") {
        None => return Ok(Manifest::default()),
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(ManifestError::Invalid(vec![format!(
                "{} not array",
                ROOT_METHODS
            )]))
        }
    };

    let mut methods = Vec::with_capacity(items.len());
    let mut errors = Vec::new();
    for (i, item) in items.iter().enumerate() {
        match ExportedMethod::deserialize(item) {
            Ok(method) => methods.push(method),
            Err(e) => {
                let path = format!("{}[{}]", ROOT_METHODS, i);
                errors.extend(field_errors(&path, item, &e));
            }
        }
    }

    if !errors.is_empty() {
        debug!("Manifest rejected with {} decode error(s)", errors.len());
        return Err(ManifestError::Invalid(errors));
    }
    Ok(Manifest::new(methods))
}

/// Pin a method decode failure to the fields that caused it
fn field_errors(path: &str, item: &Value, method_error: &serde_json::Error) -> Vec<String> {
    let mut errors = Vec::new();

    if let Some(Err(e)) = item.get("name").map(String::deserialize) {
        errors.push(format!("{}.name {}", path, e));
    }
    if let Some(Err(e)) = item.get("retType").map(TypeRef::deserialize) {
        errors.push(format!("{}.retType {}", path, e));
    }
    match item.get("paramTypes") {
        Some(Value::Array(params)) => {
            for (j, param) in params.iter().enumerate() {
                if let Err(e) = TypeRef::deserialize(param) {
                    errors.push(format!("{}.paramTypes[{}] {}", path, j, e));
                }
            }
        }
        Some(other) => {
            if let Err(e) = Vec::<TypeRef>::deserialize(other) {
                errors.push(format!("{}.paramTypes {}", path, e));
            }
        }
        None => {}
    }

    if errors.is_empty() {
        errors.push(format!("{} {}", path, method_error));
    }
    errors
}

/// Read, validate and decode a manifest file
pub fn load_from_path(manifest_path: &Path) -> Result<Manifest, ManifestError> {
    let doc = read_document(manifest_path)?;
    decode_manifest(&doc)
}

impl Manifest {
    /// Parse, validate and decode a manifest from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self, ManifestError> {
        let doc: Value = serde_json::from_str(content)?;
        decode_manifest(&doc)
    }
}

#[cfg(test)]
mod tests {
    use crate::loader::*;
    use crate::types::{ExportedMethod, TypeRef};
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_path() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let manifest_path = temp_dir.path().join("sample_plugin.pplugin");

        let manifest = Manifest::new(vec![ExportedMethod::new(
            "Add",
            TypeRef::new("int32"),
            vec![
                TypeRef::new("int32").named("a"),
                TypeRef::new("int32").named("b"),
            ],
        )]);
        let Ok(content) = serde_json::to_string_pretty(&manifest) else {
            return;
        };
        assert!(fs::write(&manifest_path, content).is_ok());

        let loaded = load_from_path(&manifest_path);
        assert!(loaded.is_ok(), "Failed to load manifest");
        assert_eq!(loaded.unwrap_or_default(), manifest);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let Ok(temp_dir) = TempDir::new() else {
            return;
        };
        let result = load_from_path(&temp_dir.path().join("absent.json"));
        assert!(matches!(result, Err(ManifestError::Io(_))));
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = Manifest::from_json_str("{\"exportedMethods\": [");
        assert!(matches!(result, Err(ManifestError::Json(_))));
    }

    #[test]
    fn test_validation_runs_before_decode() {
        let result = Manifest::from_json_str(r#"{"exportedMethods": "not-a-list"}"#);
        let Err(err) = result else {
            panic!("expected validation failure");
        };
        assert_eq!(err.validation_errors(), ["root.exportedMethods not array"]);
    }

    #[test]
    fn test_wrong_field_type_is_reported_with_path() {
        let result = decode_manifest(&json!({"exportedMethods": [{"paramTypes": 3}]}));
        let Err(err) = result else {
            panic!("expected decode failure");
        };
        let errors = err.validation_errors();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("root.exportedMethods[0].paramTypes invalid type"));
    }

    #[test]
    fn test_every_malformed_method_is_reported() {
        let doc = json!({
            "exportedMethods": [
                {"name": "A", "retType": null},
                {"name": "Ok", "retType": {"type": "int32"}},
                {"name": "B", "paramTypes": 3}
            ]
        });
        let Err(err) = decode_manifest(&doc) else {
            panic!("expected decode failure");
        };
        assert!(err.to_string().starts_with("Parse fail:"));
        let errors = err.validation_errors();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].starts_with("root.exportedMethods[0].retType invalid type: null"));
        assert!(errors[1].starts_with("root.exportedMethods[2].paramTypes invalid type"));
    }

    #[test]
    fn test_bad_parameter_is_reported_by_index() {
        let doc = json!({
            "exportedMethods": [{
                "name": "Send",
                "paramTypes": [{"type": "int32", "name": "id"}, {"type": 7, "name": "body"}]
            }]
        });
        let result = decode_manifest(&doc);
        assert!(result.is_err_and(|e| e.validation_errors().len() == 1
            && e.validation_errors()[0].starts_with("root.exportedMethods[0].paramTypes[1] ")));
    }

    #[test]
    fn test_custom_validator_is_used() {
        let result = decode_manifest_with(&json!({"exportedMethods": []}), |_| {
            vec!["always fails".to_string()]
        });
        assert!(result.is_err_and(|e| e.validation_errors() == ["always fails"]));
    }
}

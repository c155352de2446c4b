//! Validate, decode and emit in one call

use ahash::AHashSet;
use icallgen_manifest::{decode_manifest_with, validate_manifest, validate_strict, Manifest, TypeRef};
use serde_json::Value;
use tracing::debug;

use crate::delegates::{collect_prototypes, DelegatePolicy};
use crate::emitter::BindingEmitter;
use crate::errors::GenerateError;
use crate::type_map::is_known_type;

/// Options controlling validation depth and delegate emission
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Run the full signature validator instead of the shallow shape check
    pub strict: bool,
    pub delegate_policy: DelegatePolicy,
}

/// Counts and notes gathered while generating
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub methods: usize,
    pub delegates: usize,
    /// Type names that fell back to the default mapping, first-seen order
    pub unknown_types: Vec<String>,
}

/// A finished binding document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedBinding {
    pub unit_name: String,
    pub content: String,
    pub report: GenerationReport,
}

/// Generate the binding document for a raw manifest
///
/// Returns every validation error at once when the manifest is rejected;
/// no partial document is produced in that case.
pub fn generate_bindings(
    doc: &Value,
    unit_name: &str,
    options: &GenerateOptions,
) -> Result<GeneratedBinding, GenerateError> {
    if unit_name.is_empty() {
        return Err(GenerateError::EmptyUnitName);
    }

    let manifest = if options.strict {
        decode_manifest_with(doc, |doc| validate_strict(doc, is_known_type))?
    } else {
        decode_manifest_with(doc, validate_manifest)?
    };

    Ok(render_manifest(&manifest, unit_name, options))
}

/// Render an already decoded manifest
pub fn render_manifest(
    manifest: &Manifest,
    unit_name: &str,
    options: &GenerateOptions,
) -> GeneratedBinding {
    if manifest.is_empty() {
        debug!("{} exports no methods; emitting an empty class", unit_name);
    }
    let content = BindingEmitter::new(unit_name)
        .with_delegate_policy(options.delegate_policy)
        .emit(manifest);

    let report = GenerationReport {
        methods: manifest.exported_methods.len(),
        delegates: collect_prototypes(manifest, options.delegate_policy).len(),
        unknown_types: unknown_types(manifest),
    };

    for type_name in &report.unknown_types {
        debug!("Unknown type '{}' in {} mapped to default", type_name, unit_name);
    }
    debug!(
        "Rendered {}: {} method(s), {} delegate(s)",
        unit_name, report.methods, report.delegates
    );

    GeneratedBinding {
        unit_name: unit_name.to_string(),
        content,
        report,
    }
}

fn unknown_types(manifest: &Manifest) -> Vec<String> {
    let mut seen = AHashSet::new();
    let mut unknown = Vec::new();
    let mut pending: Vec<&TypeRef> = manifest.signature_types().collect();
    pending.reverse();

    while let Some(type_ref) = pending.pop() {
        if !is_known_type(&type_ref.type_name) && seen.insert(type_ref.type_name.as_str()) {
            unknown.push(type_ref.type_name.clone());
        }
        if let Some(prototype) = type_ref.prototype.as_deref() {
            let mut nested: Vec<&TypeRef> = prototype.signature_types().collect();
            nested.reverse();
            pending.extend(nested);
        }
    }

    unknown
}

//! Plugin interface manifest types
//!
//! The manifest is a JSON document listing the native functions a plugin
//! exports. Every field carries a serde default so that a manifest which
//! passed the shallow shape check can always be decoded, even when a method
//! omits `retType` or `paramTypes`.

use serde::{Deserialize, Deserializer, Serialize};

/// Type name used by the manifest for function-pointer parameters and returns
pub const FUNCTION_TYPE: &str = "function";

/// Type name assumed for a method whose `retType` is absent
pub const VOID_TYPE: &str = "void";

// =============================================================================
// MANIFEST
// =============================================================================

/// Root of a plugin interface manifest
///
/// Only `exportedMethods` is read; other plugin metadata keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "exportedMethods", default)]
    pub exported_methods: Vec<ExportedMethod>,
}

impl Manifest {
    pub fn new(exported_methods: Vec<ExportedMethod>) -> Self {
        Manifest { exported_methods }
    }

    pub fn is_empty(&self) -> bool {
        self.exported_methods.is_empty()
    }

    /// Iterate every top-level type reference in manifest order:
    /// per method the return type first, then each parameter.
    pub fn signature_types(&self) -> impl Iterator<Item = &TypeRef> {
        self.exported_methods
            .iter()
            .flat_map(|method| method.signature_types())
    }
}

// =============================================================================
// EXPORTED METHOD
// =============================================================================

/// One native function to bind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedMethod {
    #[serde(default)]
    pub name: String,
    #[serde(default = "TypeRef::void")]
    pub ret_type: TypeRef,
    #[serde(default)]
    pub param_types: Vec<TypeRef>,
}

impl Default for ExportedMethod {
    fn default() -> Self {
        ExportedMethod {
            name: String::new(),
            ret_type: TypeRef::void(),
            param_types: Vec::new(),
        }
    }
}

impl ExportedMethod {
    pub fn new(name: impl Into<String>, ret_type: TypeRef, param_types: Vec<TypeRef>) -> Self {
        ExportedMethod {
            name: name.into(),
            ret_type,
            param_types,
        }
    }

    pub fn signature_types(&self) -> impl Iterator<Item = &TypeRef> {
        std::iter::once(&self.ret_type).chain(self.param_types.iter())
    }
}

// =============================================================================
// TYPE REFERENCE
// =============================================================================

/// A parameter or return type descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(rename = "type", default)]
    pub type_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Pass-by-reference marker. Anything other than JSON `true` reads as false.
    #[serde(
        rename = "ref",
        default,
        deserialize_with = "lenient_flag",
        skip_serializing_if = "is_false"
    )]
    pub by_ref: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prototype: Option<Box<FunctionPrototype>>,
}

impl TypeRef {
    pub fn new(type_name: impl Into<String>) -> Self {
        TypeRef {
            type_name: type_name.into(),
            ..Default::default()
        }
    }

    pub fn void() -> Self {
        TypeRef::new(VOID_TYPE)
    }

    /// A `function` typed reference carrying the given prototype
    pub fn function(prototype: FunctionPrototype) -> Self {
        TypeRef::new(FUNCTION_TYPE).with_prototype(prototype)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn by_ref(mut self) -> Self {
        self.by_ref = true;
        self
    }

    pub fn with_prototype(mut self, prototype: FunctionPrototype) -> Self {
        self.prototype = Some(Box::new(prototype));
        self
    }
}

// =============================================================================
// FUNCTION PROTOTYPE
// =============================================================================

/// Signature of a callback type, referenced by name wherever it appears
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionPrototype {
    #[serde(default)]
    pub name: String,
    #[serde(default = "TypeRef::void")]
    pub ret_type: TypeRef,
    #[serde(default)]
    pub param_types: Vec<TypeRef>,
}

impl FunctionPrototype {
    pub fn new(name: impl Into<String>, ret_type: TypeRef, param_types: Vec<TypeRef>) -> Self {
        FunctionPrototype {
            name: name.into(),
            ret_type,
            param_types,
        }
    }

    pub fn signature_types(&self) -> impl Iterator<Item = &TypeRef> {
        std::iter::once(&self.ret_type).chain(self.param_types.iter())
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(matches!(value, serde_json::Value::Bool(true)))
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

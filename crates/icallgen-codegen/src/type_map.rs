//! Manifest type name to C# type mapping
//!
//! Lookups never fail. A name outside the table maps to [`DEFAULT_TYPE`]
//! and the returned [`MappedType`] records that it was a fallback, so strict
//! callers can detect it without changing the default behavior.

use ahash::AHashMap;
use once_cell::sync::Lazy;
use std::fmt;

/// Declaration type used when a manifest type name is not in the table
pub const DEFAULT_TYPE: &str = "int";

/// Declaration type the `function` marker maps to before prototype substitution
pub const DELEGATE_TYPE: &str = "delegate";

const REF_PREFIX: &str = "ref ";

/// Manifest type name -> C# declaration type. Array variants carry a `*` suffix.
pub const TYPE_TABLE: &[(&str, &str)] = &[
    ("void", "void"),
    ("bool", "bool"),
    ("char8", "char"),
    ("char16", "short"),
    ("int8", "sbyte"),
    ("int16", "short"),
    ("int32", "int"),
    ("int64", "long"),
    ("uint8", "byte"),
    ("uint16", "ushort"),
    ("uint32", "uint"),
    ("uint64", "ulong"),
    ("ptr64", "IntPtr"),
    ("float", "float"),
    ("double", "double"),
    ("function", DELEGATE_TYPE),
    ("string", "string"),
    ("bool*", "bool[]"),
    ("char8*", "char[]"),
    ("char16*", "short[]"),
    ("int8*", "sbyte[]"),
    ("int16*", "short[]"),
    ("int32*", "int[]"),
    ("int64*", "long[]"),
    ("uint8*", "byte[]"),
    ("uint16*", "ushort[]"),
    ("uint32*", "uint[]"),
    ("uint64*", "ulong[]"),
    ("ptr64*", "IntPtr[]"),
    ("float*", "float[]"),
    ("double*", "double[]"),
    ("string*", "string[]"),
];

static TYPES: Lazy<AHashMap<&'static str, &'static str>> =
    Lazy::new(|| TYPE_TABLE.iter().copied().collect());

/// Result of a type lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedType {
    base: &'static str,
    by_ref: bool,
    known: bool,
}

impl MappedType {
    /// The declaration type without any reference marker
    pub fn base(&self) -> &'static str {
        self.base
    }

    pub fn is_by_ref(&self) -> bool {
        self.by_ref
    }

    /// False when the lookup fell back to [`DEFAULT_TYPE`]
    pub fn is_known(&self) -> bool {
        self.known
    }

    pub fn is_delegate(&self) -> bool {
        self.base == DELEGATE_TYPE
    }
}

impl fmt::Display for MappedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.by_ref {
            f.write_str(REF_PREFIX)?;
        }
        f.write_str(self.base)
    }
}

/// Map a manifest type name to its declaration type
pub fn map_type(type_name: &str, by_ref: bool) -> MappedType {
    let (base, known) = match TYPES.get(type_name) {
        Some(base) => (*base, true),
        None => (DEFAULT_TYPE, false),
    };
    MappedType {
        base,
        by_ref,
        known,
    }
}

pub fn is_known_type(type_name: &str) -> bool {
    TYPES.contains_key(type_name)
}

#[cfg(test)]
mod tests {
    use crate::type_map::*;

    #[test]
    fn test_every_table_entry_maps_exactly() {
        for (name, expected) in TYPE_TABLE {
            let mapped = map_type(name, false);
            assert_eq!(mapped.to_string(), *expected, "mapping for {}", name);
            assert!(mapped.is_known());
        }
    }

    #[test]
    fn test_table_has_no_duplicate_keys() {
        assert_eq!(TYPES.len(), TYPE_TABLE.len());
    }

    #[test]
    fn test_primitives() {
        assert_eq!(map_type("int32", false).to_string(), "int");
        assert_eq!(map_type("uint64", false).to_string(), "ulong");
        assert_eq!(map_type("ptr64", false).to_string(), "IntPtr");
        assert_eq!(map_type("char16", false).to_string(), "short");
        assert_eq!(map_type("string*", false).to_string(), "string[]");
    }

    #[test]
    fn test_unknown_falls_back_to_int() {
        for name in ["int128", "", "Int32", "vec3", "float**"] {
            let mapped = map_type(name, false);
            assert_eq!(mapped.to_string(), DEFAULT_TYPE);
            assert!(!mapped.is_known());
            assert!(!is_known_type(name));
        }
    }

    #[test]
    fn test_ref_wraps_same_base() {
        for (name, _) in TYPE_TABLE {
            let plain = map_type(name, false);
            let by_ref = map_type(name, true);
            assert_eq!(plain.base(), by_ref.base());
            assert_eq!(by_ref.to_string(), format!("ref {}", plain));
        }
        assert_eq!(map_type("nonsense", true).to_string(), "ref int");
    }

    #[test]
    fn test_ref_preserves_array() {
        let mapped = map_type("double*", true);
        assert_eq!(mapped.base(), "double[]");
        assert!(mapped.is_by_ref());
        assert_eq!(mapped.to_string(), "ref double[]");
    }

    #[test]
    fn test_function_marker() {
        assert!(map_type("function", false).is_delegate());
        assert!(map_type("function", true).is_delegate());
        assert!(!map_type("int32", false).is_delegate());
    }
}

//! Identifier sanitization against C# keywords
//!
//! Parameter and prototype names that collide with a reserved keyword get a
//! single trailing underscore. Matching is exact and case-sensitive.

use ahash::AHashSet;
use once_cell::sync::Lazy;
use std::borrow::Cow;

/// Appended to an identifier that collides with a reserved word
pub const RESERVED_SUFFIX: char = '_';

/// Reserved C# keywords
///
/// Contextual keywords (`var`, `async`, `value`, ...) are legal identifiers
/// and are not listed.
pub const RESERVED_WORDS: &[&str] = &[
    "abstract",
    "as",
    "base",
    "bool",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "checked",
    "class",
    "const",
    "continue",
    "decimal",
    "default",
    "delegate",
    "do",
    "double",
    "else",
    "enum",
    "event",
    "explicit",
    "extern",
    "false",
    "finally",
    "fixed",
    "float",
    "for",
    "foreach",
    "goto",
    "if",
    "implicit",
    "in",
    "int",
    "interface",
    "internal",
    "is",
    "lock",
    "long",
    "namespace",
    "new",
    "null",
    "object",
    "operator",
    "out",
    "override",
    "params",
    "private",
    "protected",
    "public",
    "readonly",
    "ref",
    "return",
    "sbyte",
    "sealed",
    "short",
    "sizeof",
    "stackalloc",
    "static",
    "string",
    "struct",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "uint",
    "ulong",
    "unchecked",
    "unsafe",
    "ushort",
    "using",
    "virtual",
    "void",
    "volatile",
    "while",
];

static RESERVED: Lazy<AHashSet<&'static str>> =
    Lazy::new(|| RESERVED_WORDS.iter().copied().collect());

pub fn is_reserved(name: &str) -> bool {
    RESERVED.contains(name)
}

/// Escape `name` if it is a reserved word, otherwise borrow it unchanged
///
/// Not idempotent: `class_` is not reserved, but callers must only apply
/// this once per raw manifest name.
pub fn sanitize_identifier(name: &str) -> Cow<'_, str> {
    if is_reserved(name) {
        let mut escaped = String::with_capacity(name.len() + 1);
        escaped.push_str(name);
        escaped.push(RESERVED_SUFFIX);
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(name)
    }
}

//! Parameter list rendering
//!
//! A parameter's declared type is its mapped manifest type, except that a
//! `function` typed parameter carrying a prototype is declared with the
//! prototype's (sanitized) name instead of the generic delegate marker.

use icallgen_manifest::TypeRef;
use std::borrow::Cow;

use crate::naming::sanitize_identifier;
use crate::type_map::map_type;

const PARAM_SEPARATOR: &str = ", ";

/// Which parts of each parameter to render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRender {
    /// `int, float`
    Types,
    /// `a, b`
    Names,
    /// `int a, float b`
    TypesNames,
}

/// Declaration type for a parameter or return type
pub fn declared_type(type_ref: &TypeRef) -> Cow<'_, str> {
    let mapped = map_type(&type_ref.type_name, type_ref.by_ref);
    match type_ref.prototype.as_deref() {
        Some(prototype) if mapped.is_delegate() => sanitize_identifier(&prototype.name),
        _ if mapped.is_by_ref() => Cow::Owned(mapped.to_string()),
        _ => Cow::Borrowed(mapped.base()),
    }
}

/// Sanitized parameter name, or `arg<index>` when the manifest gives none
pub fn param_name(type_ref: &TypeRef, index: usize) -> Cow<'_, str> {
    match type_ref.name.as_deref() {
        Some(name) if !name.is_empty() => sanitize_identifier(name),
        _ => Cow::Owned(format!("arg{}", index)),
    }
}

/// Render a parameter list as a comma separated fragment without parentheses
pub fn render_params(params: &[TypeRef], mode: ParamRender) -> String {
    let rendered: Vec<String> = params
        .iter()
        .enumerate()
        .map(|(index, param)| match mode {
            ParamRender::Types => declared_type(param).into_owned(),
            ParamRender::Names => param_name(param, index).into_owned(),
            ParamRender::TypesNames => {
                format!("{} {}", declared_type(param), param_name(param, index))
            }
        })
        .collect();
    rendered.join(PARAM_SEPARATOR)
}

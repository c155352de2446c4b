//! Manifest shape validation
//!
//! [`validate_manifest`] is deliberately shallow: it checks only what is
//! needed to decode the method list without crashing. [`validate_strict`]
//! layers per-signature checks on top for callers that want them.
//!
//! Both collect every error before returning so a manifest author can fix
//! all problems in one pass.

use serde_json::{Map, Value};

use crate::types::FUNCTION_TYPE;

pub(crate) const ROOT_METHODS: &str = "root.exportedMethods";

/// Shallow shape check over a raw manifest document
pub fn validate_manifest(doc: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let Some(methods) = doc.get("exportedMethods").and_then(Value::as_array) else {
        errors.push(format!("{} not array", ROOT_METHODS));
        return errors;
    };

    for (i, method) in methods.iter().enumerate() {
        match method.as_object() {
            Some(obj) => {
                if obj.get("type").is_some_and(|t| !t.is_string()) {
                    errors.push(format!("{}[{}].type not string", ROOT_METHODS, i));
                }
            }
            None => errors.push(format!("{}[{}] not object", ROOT_METHODS, i)),
        }
    }

    errors
}

/// Shallow check followed by full signature checks on every method
///
/// `is_known_type` decides vocabulary membership; the mapping table lives
/// with the code generator.
pub fn validate_strict<F>(doc: &Value, is_known_type: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    let mut errors = validate_manifest(doc);

    let Some(methods) = doc.get("exportedMethods").and_then(Value::as_array) else {
        return errors;
    };

    let mut checker = StrictChecker {
        is_known_type: &is_known_type,
        errors: &mut errors,
    };

    for (i, method) in methods.iter().enumerate() {
        let Some(obj) = method.as_object() else {
            continue;
        };
        let path = format!("{}[{}]", ROOT_METHODS, i);
        checker.check_name(obj, &path);
        checker.check_signature(obj, &path);
    }

    errors
}

struct StrictChecker<'a> {
    is_known_type: &'a dyn Fn(&str) -> bool,
    errors: &'a mut Vec<String>,
}

impl StrictChecker<'_> {
    fn check_name(&mut self, obj: &Map<String, Value>, path: &str) {
        match obj.get("name") {
            Some(Value::String(name)) if !name.is_empty() => {}
            Some(Value::String(_)) => self.errors.push(format!("{}.name empty", path)),
            Some(_) => self.errors.push(format!("{}.name not string", path)),
            None => self.errors.push(format!("{}.name missing", path)),
        }
    }

    fn check_signature(&mut self, obj: &Map<String, Value>, path: &str) {
        match obj.get("retType") {
            Some(ret) => self.check_type_ref(ret, &format!("{}.retType", path), false),
            None => self.errors.push(format!("{}.retType missing", path)),
        }

        match obj.get("paramTypes") {
            Some(Value::Array(params)) => {
                for (j, param) in params.iter().enumerate() {
                    self.check_type_ref(param, &format!("{}.paramTypes[{}]", path, j), true);
                }
            }
            Some(_) => self.errors.push(format!("{}.paramTypes not array", path)),
            None => self.errors.push(format!("{}.paramTypes missing", path)),
        }
    }

    fn check_type_ref(&mut self, value: &Value, path: &str, needs_name: bool) {
        let Some(obj) = value.as_object() else {
            self.errors.push(format!("{} not object", path));
            return;
        };

        let type_name = match obj.get("type") {
            Some(Value::String(type_name)) => {
                if !(self.is_known_type)(type_name) {
                    self.errors
                        .push(format!("{}.type unknown '{}'", path, type_name));
                }
                Some(type_name.as_str())
            }
            Some(_) => {
                self.errors.push(format!("{}.type not string", path));
                None
            }
            None => {
                self.errors.push(format!("{}.type missing", path));
                None
            }
        };

        if needs_name {
            self.check_name(obj, path);
        }

        if obj.get("ref").is_some_and(|r| !r.is_boolean()) {
            self.errors.push(format!("{}.ref not bool", path));
        }

        if let Some(prototype) = obj.get("prototype") {
            let proto_path = format!("{}.prototype", path);
            if type_name != Some(FUNCTION_TYPE) {
                self.errors.push(format!(
                    "{} only allowed on '{}' type",
                    proto_path, FUNCTION_TYPE
                ));
            }
            match prototype.as_object() {
                Some(proto) => {
                    self.check_name(proto, &proto_path);
                    self.check_signature(proto, &proto_path);
                }
                None => self.errors.push(format!("{} not object", proto_path)),
            }
        }
    }
}

//! Delegate discovery and declaration
//!
//! Every prototype reachable from a method signature becomes one `delegate`
//! declaration inside the namespace, in first-discovery order: methods in
//! manifest order, and per method the return type before the parameters.

use ahash::AHashSet;
use icallgen_manifest::{FunctionPrototype, Manifest, TypeRef};

use crate::naming::sanitize_identifier;
use crate::signature::{declared_type, render_params, ParamRender};

/// How repeated prototypes are handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DelegatePolicy {
    /// One declaration per sanitized prototype name, including prototypes
    /// nested inside other prototypes' signatures
    #[default]
    Deduplicate,
    /// One declaration per top-level occurrence; nested prototypes are not
    /// declared. Repeated names produce duplicate declarations.
    PerOccurrence,
}

/// Collect the prototypes to declare, in emission order
pub fn collect_prototypes(manifest: &Manifest, policy: DelegatePolicy) -> Vec<&FunctionPrototype> {
    match policy {
        DelegatePolicy::PerOccurrence => manifest
            .signature_types()
            .filter_map(|type_ref| type_ref.prototype.as_deref())
            .collect(),
        DelegatePolicy::Deduplicate => {
            let mut collector = PrototypeCollector::default();
            for type_ref in manifest.signature_types() {
                collector.visit(type_ref);
            }
            collector.found
        }
    }
}

#[derive(Default)]
struct PrototypeCollector<'a> {
    seen: AHashSet<String>,
    found: Vec<&'a FunctionPrototype>,
}

impl<'a> PrototypeCollector<'a> {
    fn visit(&mut self, type_ref: &'a TypeRef) {
        let Some(prototype) = type_ref.prototype.as_deref() else {
            return;
        };
        if !self.seen.insert(sanitize_identifier(&prototype.name).into_owned()) {
            return;
        }
        self.found.push(prototype);
        for nested in prototype.signature_types() {
            self.visit(nested);
        }
    }
}

/// Render one namespace-level delegate declaration line
pub fn render_delegate(prototype: &FunctionPrototype) -> String {
    format!(
        "\tdelegate {} {}({});\n",
        declared_type(&prototype.ret_type),
        sanitize_identifier(&prototype.name),
        render_params(&prototype.param_types, ParamRender::TypesNames)
    )
}

#[cfg(test)]
mod tests {
    use crate::delegates::*;
    use icallgen_manifest::ExportedMethod;

    fn proto(name: &str) -> FunctionPrototype {
        FunctionPrototype::new(
            name,
            TypeRef::new("int32"),
            vec![TypeRef::new("string").named("msg")],
        )
    }

    fn names(prototypes: &[&FunctionPrototype]) -> Vec<String> {
        prototypes.iter().map(|p| p.name.clone()).collect()
    }

    fn sample_manifest() -> Manifest {
        Manifest::new(vec![
            ExportedMethod::new(
                "GetHandler",
                TypeRef::function(proto("Handler")),
                vec![TypeRef::function(proto("Filter")).named("filter")],
            ),
            ExportedMethod::new(
                "SetHandler",
                TypeRef::void(),
                vec![
                    TypeRef::new("int32").named("id"),
                    TypeRef::function(proto("Handler")).named("handler"),
                ],
            ),
        ])
    }

    #[test]
    fn test_discovery_order_return_before_params() {
        let manifest = sample_manifest();
        let found = collect_prototypes(&manifest, DelegatePolicy::Deduplicate);
        assert_eq!(names(&found), vec!["Handler", "Filter"]);
    }

    #[test]
    fn test_per_occurrence_repeats_names() {
        let manifest = sample_manifest();
        let found = collect_prototypes(&manifest, DelegatePolicy::PerOccurrence);
        assert_eq!(names(&found), vec!["Handler", "Filter", "Handler"]);
    }

    #[test]
    fn test_nested_prototypes_are_declared_when_deduplicating() {
        let inner = proto("Inner");
        let outer = FunctionPrototype::new(
            "Outer",
            TypeRef::void(),
            vec![TypeRef::function(inner).named("inner")],
        );
        let manifest = Manifest::new(vec![ExportedMethod::new(
            "Register",
            TypeRef::void(),
            vec![TypeRef::function(outer).named("outer")],
        )]);

        let dedup = collect_prototypes(&manifest, DelegatePolicy::Deduplicate);
        assert_eq!(names(&dedup), vec!["Outer", "Inner"]);

        let per_occurrence = collect_prototypes(&manifest, DelegatePolicy::PerOccurrence);
        assert_eq!(names(&per_occurrence), vec!["Outer"]);
    }

    #[test]
    fn test_no_prototypes() {
        let manifest = Manifest::new(vec![ExportedMethod::new(
            "Plain",
            TypeRef::new("int32"),
            vec![TypeRef::new("int32").named("x")],
        )]);
        assert!(collect_prototypes(&manifest, DelegatePolicy::default()).is_empty());
    }

    #[test]
    fn test_render_delegate() {
        let prototype = FunctionPrototype::new(
            "OnMessage",
            TypeRef::new("bool"),
            vec![
                TypeRef::new("string").named("text"),
                TypeRef::new("int32").named("ref").by_ref(),
            ],
        );
        assert_eq!(
            render_delegate(&prototype),
            "\tdelegate bool OnMessage(string text, ref int ref_);\n"
        );
    }

    #[test]
    fn test_render_delegate_without_params() {
        let prototype = FunctionPrototype::new("Tick", TypeRef::void(), vec![]);
        assert_eq!(render_delegate(&prototype), "\tdelegate void Tick();\n");
    }

    #[test]
    fn test_render_delegate_nested_reference() {
        let prototype = FunctionPrototype::new(
            "Outer",
            TypeRef::function(proto("Inner")),
            vec![TypeRef::function(proto("Other")).named("other")],
        );
        assert_eq!(
            render_delegate(&prototype),
            "\tdelegate Inner Outer(Other other);\n"
        );
    }
}

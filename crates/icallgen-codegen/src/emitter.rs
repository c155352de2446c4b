//! Binding document assembly
//!
//! Layout of the generated file:
//!
//! ```text
//! using System;
//! using System.Runtime.CompilerServices;
//! using System.Runtime.InteropServices;
//!
//! namespace <Unit>
//! {
//!     delegate <T> <Prototype>(<params>);
//!
//!     public static class <Unit>
//!     {
//!         [MethodImplAttribute(MethodImplOptions.InternalCall)]
//!         internal static extern <T> <Method>(<params>);
//!     }
//! }
//! ```
//!
//! Indentation is tabs and line endings are `\n`.

use icallgen_manifest::{ExportedMethod, Manifest};

use crate::delegates::{collect_prototypes, render_delegate, DelegatePolicy};
use crate::signature::{declared_type, render_params, ParamRender};

pub const IMPORTS: [&str; 3] = [
    "using System;",
    "using System.Runtime.CompilerServices;",
    "using System.Runtime.InteropServices;",
];

pub const INTERNAL_CALL_ATTRIBUTE: &str = "[MethodImplAttribute(MethodImplOptions.InternalCall)]";

/// Renders one manifest into a binding document
#[derive(Debug, Clone, Copy)]
pub struct BindingEmitter<'a> {
    unit_name: &'a str,
    delegate_policy: DelegatePolicy,
}

impl<'a> BindingEmitter<'a> {
    /// `unit_name` names both the namespace and the static class
    pub fn new(unit_name: &'a str) -> Self {
        BindingEmitter {
            unit_name,
            delegate_policy: DelegatePolicy::default(),
        }
    }

    pub fn with_delegate_policy(mut self, policy: DelegatePolicy) -> Self {
        self.delegate_policy = policy;
        self
    }

    pub fn emit(&self, manifest: &Manifest) -> String {
        let mut content = String::new();

        for import in IMPORTS {
            content.push_str(import);
            content.push('\n');
        }
        content.push('\n');

        content.push_str(&format!("namespace {}\n{{\n", self.unit_name));
        for prototype in collect_prototypes(manifest, self.delegate_policy) {
            content.push_str(&render_delegate(prototype));
        }

        content.push_str(&format!("\n\tpublic static class {}\n\t{{\n", self.unit_name));
        for method in &manifest.exported_methods {
            content.push_str(&render_method(method));
        }
        content.push_str("\t}\n");
        content.push_str("}\n");

        content
    }
}

/// Render the attribute line and extern stub for one method
///
/// The method name is emitted as written in the manifest; only parameter
/// and prototype names are sanitized.
pub fn render_method(method: &ExportedMethod) -> String {
    format!(
        "\t\t{}\n\t\tinternal static extern {} {}({});\n",
        INTERNAL_CALL_ATTRIBUTE,
        declared_type(&method.ret_type),
        method.name,
        render_params(&method.param_types, ParamRender::TypesNames)
    )
}

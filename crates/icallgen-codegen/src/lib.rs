//! Internal-call binding generation
//!
//! Turns a validated plugin manifest into a C# source file that declares one
//! `extern` stub per exported method, bound with
//! `MethodImplOptions.InternalCall`, plus a `delegate` type for every
//! callback prototype the methods reference.
//!
//! The pieces, leaf to root:
//! - [`type_map`]: manifest type names to C# types, never failing
//! - [`naming`]: keyword escaping for parameter and prototype names
//! - [`signature`]: parameter list rendering with prototype substitution
//! - [`delegates`]: prototype discovery and `delegate` declarations
//! - [`emitter`]: the full document
//!
//! [`generate_bindings`] runs validation and rendering in one step.

pub mod delegates;
pub mod emitter;
pub mod errors;
pub mod generate;
pub mod naming;
pub mod signature;
pub mod type_map;

pub use delegates::DelegatePolicy;
pub use emitter::BindingEmitter;
pub use errors::GenerateError;
pub use generate::{
    generate_bindings, render_manifest, GenerateOptions, GeneratedBinding, GenerationReport,
};
pub use naming::sanitize_identifier;
pub use signature::{render_params, ParamRender};
pub use type_map::{map_type, MappedType};

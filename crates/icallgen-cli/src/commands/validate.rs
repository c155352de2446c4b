use clap::Args;
use icallgen_codegen::{generate_bindings, GenerateOptions};
use icallgen_logger as logger;
use icallgen_manifest::read_document;
use std::path::PathBuf;

use crate::common::GlobalOpts;
use crate::errors::GenerateCommandError;
use crate::output::unit_name;

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the plugin manifest (JSON)
    pub manifest: PathBuf,
    /// Check every method signature and reject unknown type names
    #[arg(long)]
    pub strict: bool,
}

/// Check a manifest without writing anything
pub fn handle_validate(args: ValidateArgs, _opts: GlobalOpts) -> Result<(), GenerateCommandError> {
    if !args.manifest.is_file() {
        return Err(GenerateCommandError::ManifestNotFound(args.manifest));
    }
    let unit = unit_name(&args.manifest)
        .ok_or_else(|| GenerateCommandError::InvalidManifestName(args.manifest.clone()))?;

    let doc = read_document(&args.manifest)?;
    let options = GenerateOptions {
        strict: args.strict,
        ..Default::default()
    };
    let binding = generate_bindings(&doc, &unit, &options)?;

    for type_name in &binding.report.unknown_types {
        logger::warn(&format!("Unknown type '{}' will be mapped to int", type_name));
    }
    logger::success(&format!(
        "{} is valid ({} method(s), {} delegate(s))",
        args.manifest.display(),
        binding.report.methods,
        binding.report.delegates
    ));
    Ok(())
}

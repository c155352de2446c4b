use clap::Args;
use icallgen_codegen::{generate_bindings, DelegatePolicy, GenerateOptions, GenerationReport};
use icallgen_config::Config;
use icallgen_logger as logger;
use icallgen_manifest::read_document;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::common::{load_config, GlobalOpts};
use crate::errors::GenerateCommandError;
use crate::output::{write_atomic, OutputTarget};

/// Flags shared by `generate` and `batch`
#[derive(Args, Debug, Clone, Default)]
pub struct GenerationFlags {
    /// Replace an existing binding file
    #[arg(long = "override")]
    pub override_existing: bool,
    /// Check every method signature and reject unknown type names
    #[arg(long)]
    pub strict: bool,
    /// Emit one delegate per prototype occurrence instead of one per name
    #[arg(long)]
    pub per_occurrence_delegates: bool,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Path to the plugin manifest (JSON)
    pub manifest: PathBuf,
    /// Existing directory that receives the bindings
    pub output: PathBuf,
    #[command(flatten)]
    pub flags: GenerationFlags,
}

/// Effective settings after merging flags over config over defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSettings {
    pub output_subdir: String,
    pub file_extension: String,
    pub override_existing: bool,
    pub options: GenerateOptions,
}

impl GenerationSettings {
    pub fn resolve(flags: &GenerationFlags, config: &Config) -> Self {
        let delegate_policy = if flags.per_occurrence_delegates || !config.dedupe_delegates() {
            DelegatePolicy::PerOccurrence
        } else {
            DelegatePolicy::Deduplicate
        };

        GenerationSettings {
            output_subdir: config.output_subdir().to_string(),
            file_extension: config.file_extension().to_string(),
            override_existing: flags.override_existing || config.override_existing(),
            options: GenerateOptions {
                strict: flags.strict || config.strict(),
                delegate_policy,
            },
        }
    }
}

/// A binding file that was written
#[derive(Debug, Clone)]
pub struct GenerateOutcome {
    pub path: PathBuf,
    pub report: GenerationReport,
}

/// Generate the binding file for one manifest
///
/// Nothing is written unless every check passes and the manifest validates.
pub fn generate_one(
    manifest_path: &Path,
    output_dir: &Path,
    settings: &GenerationSettings,
) -> Result<GenerateOutcome, GenerateCommandError> {
    if !manifest_path.is_file() {
        return Err(GenerateCommandError::ManifestNotFound(
            manifest_path.to_path_buf(),
        ));
    }
    if !output_dir.is_dir() {
        return Err(GenerateCommandError::OutputDirNotFound(
            output_dir.to_path_buf(),
        ));
    }

    let target = OutputTarget::resolve(
        manifest_path,
        output_dir,
        &settings.output_subdir,
        &settings.file_extension,
    )?;

    if !target.dir.exists() {
        debug!("Creating output directory {:?}", target.dir);
        fs::create_dir_all(&target.dir)?;
    }
    if target.path.is_file() && !settings.override_existing {
        return Err(GenerateCommandError::OutputExists(target.path));
    }

    let doc = read_document(manifest_path)?;
    let binding = generate_bindings(&doc, &target.unit_name, &settings.options)?;
    logger::info(&format!(
        "Rendered unit '{}' from {}",
        binding.unit_name,
        manifest_path.display()
    ));

    write_atomic(&target.path, &binding.content)?;
    debug!("Wrote {} bytes to {:?}", binding.content.len(), target.path);

    Ok(GenerateOutcome {
        path: target.path,
        report: binding.report,
    })
}

pub fn handle_generate(args: GenerateArgs, _opts: GlobalOpts) -> Result<(), GenerateCommandError> {
    let config = load_config();
    let settings = GenerationSettings::resolve(&args.flags, &config);
    logger::step(&format!(
        "Generating bindings for {} into {}",
        args.manifest.display(),
        args.output.display()
    ));

    let outcome = generate_one(&args.manifest, &args.output, &settings)?;
    report_outcome(&outcome);
    Ok(())
}

pub(crate) fn report_outcome(outcome: &GenerateOutcome) {
    for type_name in &outcome.report.unknown_types {
        logger::warn(&format!(
            "Unknown type '{}' in {} mapped to int",
            type_name,
            outcome.path.display()
        ));
    }
    logger::success(&format!(
        "Generated {} ({} method(s), {} delegate(s))",
        outcome.path.display(),
        outcome.report.methods,
        outcome.report.delegates
    ));
}

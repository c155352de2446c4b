use ahash::AHashMap;
use clap::Args;
use icallgen_logger as logger;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use super::generate::{generate_one, report_outcome, GenerateOutcome, GenerationFlags, GenerationSettings};
use crate::common::{load_config, GlobalOpts};
use crate::errors::GenerateCommandError;
use crate::output::unit_name;

#[derive(Args, Debug, Clone)]
pub struct BatchArgs {
    /// Existing directory that receives the bindings
    pub output: PathBuf,
    /// Plugin manifests to generate bindings for
    #[arg(required = true)]
    pub manifests: Vec<PathBuf>,
    #[command(flatten)]
    pub flags: GenerationFlags,
}

/// Generate every manifest independently, in parallel
///
/// Results come back in the order the manifests were given.
pub fn generate_all(
    manifests: &[PathBuf],
    output_dir: &Path,
    settings: &GenerationSettings,
) -> Vec<Result<GenerateOutcome, GenerateCommandError>> {
    manifests
        .par_iter()
        .map(|manifest| generate_one(manifest, output_dir, settings))
        .collect()
}

/// Two manifests with the same file stem would write the same binding file
pub fn check_unique_units(manifests: &[PathBuf]) -> Result<(), GenerateCommandError> {
    let mut seen: AHashMap<String, &PathBuf> = AHashMap::new();
    for manifest in manifests {
        let Some(unit) = unit_name(manifest) else {
            continue;
        };
        if let Some(first) = seen.get(&unit) {
            return Err(GenerateCommandError::DuplicateUnit {
                unit,
                first: first.display().to_string(),
                second: manifest.display().to_string(),
            });
        }
        seen.insert(unit, manifest);
    }
    Ok(())
}

pub fn handle_batch(args: BatchArgs, _opts: GlobalOpts) -> Result<(), GenerateCommandError> {
    check_unique_units(&args.manifests)?;

    let config = load_config();
    let settings = GenerationSettings::resolve(&args.flags, &config);
    let total = args.manifests.len();

    logger::spinner_start(&format!("Generating bindings for {} manifest(s)", total));
    let results = generate_all(&args.manifests, &args.output, &settings);
    logger::spinner_stop();

    let mut failed = 0;
    for (manifest, result) in args.manifests.iter().zip(results) {
        match result {
            Ok(outcome) => report_outcome(&outcome),
            Err(e) => {
                failed += 1;
                logger::error(&format!("{}: {}", manifest.display(), e));
            }
        }
    }

    if failed > 0 {
        return Err(GenerateCommandError::BatchFailed { failed, total });
    }
    Ok(())
}

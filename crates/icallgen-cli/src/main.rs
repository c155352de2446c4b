use clap::{Parser, Subcommand};
use icallgen::{
    commands::{
        batch::{self, BatchArgs},
        config::{self, ConfigAction},
        generate::{self, GenerateArgs},
        validate::{self, ValidateArgs},
    },
    common, GlobalOpts,
};
use icallgen_logger as logger;

#[derive(Parser)]
#[command(name = "icallgen")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Internal-call binding generator",
    long_about = "icallgen turns a native plugin's interface manifest into C# internal-call bindings."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalOpts,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the binding file for one manifest
    Generate(GenerateArgs),
    /// Generate binding files for several manifests in parallel
    Batch(BatchArgs),
    /// Validate a manifest without writing output
    Validate(ValidateArgs),
    /// Configure icallgen
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init_with_verbosity(cli.global.verbosity_level(), cli.global.no_stdout)
    {
        eprintln!("Warning: Failed to initialize logger: {}", e);
    }
    common::init_tracing();

    let result = match cli.command {
        Commands::Generate(args) => {
            generate::handle_generate(args, cli.global).map_err(anyhow::Error::from)
        }
        Commands::Batch(args) => batch::handle_batch(args, cli.global).map_err(anyhow::Error::from),
        Commands::Validate(args) => {
            validate::handle_validate(args, cli.global).map_err(anyhow::Error::from)
        }
        Commands::Config { action } => config::handle_config(action, cli.global),
    };

    if let Err(e) = result {
        logger::error(&format!("{:#}", e));
        if let Some(path) = logger::log_path() {
            logger::debug(&format!("Log file: {}", path.display()));
        }
        std::process::exit(1);
    }
}

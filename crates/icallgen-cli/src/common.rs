//! Common types and utilities shared across commands

use clap::Parser;
use icallgen_config::Config;
use icallgen_logger as logger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Global CLI options available to all commands
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    #[arg(short, long, global = true, help = "Decrease verbosity")]
    pub quiet: bool,

    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Increase verbosity (-v for debug, -vv for trace)")]
    pub verbose: u8,

    #[arg(long, global = true, help = "Suppress success messages on the console")]
    pub no_stdout: bool,
}

impl GlobalOpts {
    /// Get the effective verbosity level
    /// - 0: quiet/warn only
    /// - 1: debug (-v)
    /// - 2: trace (-vv)
    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}

/// Install the `tracing` subscriber used by the library crates
///
/// `RUST_LOG` wins over the verbosity flags when set.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(logger::verbosity_to_filter()));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init();
}

/// Load the user config, falling back to defaults with a warning
pub fn load_config() -> Config {
    match Config::load() {
        Ok(config) => {
            logger::debug(&format!("Loaded config from {}", Config::path().display()));
            config
        }
        Err(e) => {
            logger::warn(&format!("Failed to load config, using defaults: {}", e));
            Config::default()
        }
    }
}

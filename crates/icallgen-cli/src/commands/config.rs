use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use icallgen_config::config::{read_pointer, set_pointer, CONFIG_KEYS};
use icallgen_config::Config;
use icallgen_logger as logger;

use crate::common::GlobalOpts;

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigAction {
    /// Show the values set in the config file
    Show,
    /// Set a config value
    Set { key: String, value: String },
    /// Get or set the path to the config file.
    /// If `new_path` is provided, later runs read the config from that path.
    /// If omitted, prints the current configuration file path.
    Path {
        /// Optional new config path to set
        new_path: Option<String>,
    },
}

pub fn handle_config(action: ConfigAction, opts: GlobalOpts) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::load().context("Failed to load config")?;
            println!("{}", "Configuration:".bold().green());
            if config.is_empty() {
                if opts.verbosity_level() > 0 {
                    println!("  {}", "(empty)".yellow());
                }
            } else {
                for (key, value) in config.values_iter() {
                    println!("  {}: {}", key.cyan(), value);
                }
            }
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load().context("Failed to load config")?;
            config.set(&key, &value).with_context(|| {
                format!("Cannot set {}. Supported keys: {}", key, CONFIG_KEYS.join(", "))
            })?;
            config.save().context("Failed to save config")?;
            logger::success(&format!("Set {} = {}", key, value));
        }
        ConfigAction::Path { new_path } => {
            let config_path = Config::path();
            logger::debug(&format!("Reading config from: {}", config_path.display()));

            match new_path {
                Some(p) => {
                    let pointer = set_pointer(&p).context("Failed to set config path")?;
                    logger::debug(&format!("Wrote pointer file {}", pointer.display()));
                    logger::success(&format!("Config path set to {}", p));
                }
                None => {
                    println!("{}", config_path.display());
                    if let Some(target) = read_pointer(&Config::default_path()) {
                        println!("{} {}", "overridden-by".cyan(), target.display());
                    }
                }
            }
        }
    }
    Ok(())
}

//! Configuration for the icallgen CLI
//!
//! Settings live in a TOML file whose location can be redirected with the
//! `ICALLGEN_CONFIG` environment variable or a pointer file.

pub mod config;

pub use config::{Config, ConfigError};

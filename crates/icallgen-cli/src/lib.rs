//! icallgen library - expose modules for testing
//!
//! The binary is a thin clap front end over these modules.

pub mod commands;
pub mod common;
pub mod errors;
pub mod output;

pub use common::GlobalOpts;

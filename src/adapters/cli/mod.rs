//! CLI Adapter
//!
//! Command-line interface for pump-launcher.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, CreateCmd, DeriveCmd, InspectCmd, StatusCmd};

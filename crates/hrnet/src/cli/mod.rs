//! Command-line interface for hrnet.
//!
//! This module provides the CLI structure for the `hrnet` binary. Each
//! subcommand corresponds to one page or one maintenance task.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::logging::Verbosity;

pub use commands::{
    ConfigCommand, CreateCommand, ListCommand, OpenCommand, OptionList, OptionsCommand,
    OutputFormat, StatusCommand,
};

/// hrnet - Employee records from the terminal
///
/// Create employees through a validated form and browse them in a
/// searchable, sortable, paginated table.
#[derive(Debug, Parser)]
#[command(name = "hrnet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit the create-employee form
    Create(CreateCommand),

    /// Show the current employees table
    List(ListCommand),

    /// Render the page for a route path
    Open(OpenCommand),

    /// Show the state or department options
    Options(OptionsCommand),

    /// Show storage status
    Status(StatusCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }
}

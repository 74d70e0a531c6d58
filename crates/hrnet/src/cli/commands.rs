//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::employee::Field;

/// Create command arguments: one flag per form field.
#[derive(Debug, Args)]
pub struct CreateCommand {
    /// First name
    #[arg(long)]
    pub first_name: Option<String>,

    /// Last name
    #[arg(long)]
    pub last_name: Option<String>,

    /// Date of birth (MM/DD/YYYY or YYYY-MM-DD), not in the future
    #[arg(long, value_name = "DATE")]
    pub date_of_birth: Option<String>,

    /// Start date (MM/DD/YYYY or YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start_date: Option<String>,

    /// Street address
    #[arg(long)]
    pub street: Option<String>,

    /// City
    #[arg(long)]
    pub city: Option<String>,

    /// State name or abbreviation
    #[arg(long)]
    pub state: Option<String>,

    /// Zip code (12345 or 12345-6789)
    #[arg(long)]
    pub zip_code: Option<String>,

    /// Department
    #[arg(long)]
    pub department: Option<String>,
}

impl CreateCommand {
    /// The raw value given for `field`, if any.
    #[must_use]
    pub fn value(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::DateOfBirth => &self.date_of_birth,
            Field::StartDate => &self.start_date,
            Field::Street => &self.street,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::ZipCode => &self.zip_code,
            Field::Department => &self.department,
        };
        value.as_deref()
    }

}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Only show rows with a cell containing this text
    #[arg(short, long)]
    pub search: Option<String>,

    /// Sort by this column key (e.g. lastName, startDate)
    #[arg(long, value_name = "COLUMN")]
    pub sort: Option<String>,

    /// Sort descending instead of ascending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show, starting at 1
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Rows per page: 10, 25, 50 or 100 (defaults to the configured size)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,
}

/// Open command arguments.
#[derive(Debug, Args)]
pub struct OpenCommand {
    /// Route path: `/`, `/create` or `/employees`
    #[arg(default_value = "/")]
    pub path: String,
}

/// Options command arguments.
#[derive(Debug, Args)]
pub struct OptionsCommand {
    /// Which option list to show
    #[arg(value_enum)]
    pub list: OptionList,

    /// Only show options whose label contains this text
    #[arg(short, long)]
    pub filter: Option<String>,
}

/// Status command arguments.
#[derive(Debug, Args)]
pub struct StatusCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// The select option lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OptionList {
    /// US states
    States,
    /// Departments
    Departments,
}

/// Output format for commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Plain text output
    Plain,
    /// Formatted table
    #[default]
    Table,
    /// JSON output
    Json,
}

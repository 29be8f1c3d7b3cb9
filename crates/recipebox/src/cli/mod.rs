//! Command-line interface for recipebox.
//!
//! This module provides the CLI structure for the `recipebox` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    AddCommand, ConfigCommand, ListCommand, SearchCommand, ShopCommand, ShowCommand,
    StatusCommand,
};

/// recipebox - Organize recipes, plan shopping
///
/// Stores your recipes, searches them by ingredient, and keeps a shopping
/// list you can fill straight from a recipe.
#[derive(Debug, Parser)]
#[command(name = "recipebox")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Path to the data file (overrides configuration)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub data: Option<PathBuf>,

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
    /// List all recipes
    List(ListCommand),

    /// Find recipes by ingredient
    Search(SearchCommand),

    /// Show a recipe's details
    Show(ShowCommand),

    /// Add a homemade recipe
    Add(AddCommand),

    /// Manage the shopping list
    #[command(subcommand)]
    Shop(ShopCommand),

    /// Show data file and collection status
    Status(StatusCommand),

    /// Start an interactive session
    Shell,

    /// View or check configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}

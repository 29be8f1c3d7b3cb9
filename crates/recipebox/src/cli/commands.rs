//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::recipe::RecipeDraft;

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Search command arguments.
#[derive(Debug, Args)]
pub struct SearchCommand {
    /// Comma separated ingredients; recipes using any of them match
    pub query: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// Recipe name
    pub name: String,
}

/// Add command arguments, mirroring the add-recipe form.
#[derive(Debug, Args)]
pub struct AddCommand {
    /// Recipe name
    #[arg(short, long)]
    pub name: String,

    /// Ingredients, comma separated
    #[arg(short, long)]
    pub ingredients: String,

    /// Steps, comma separated
    #[arg(short, long)]
    pub steps: String,

    /// Cooking time in minutes
    #[arg(short, long, value_name = "MINUTES")]
    pub time: String,

    /// Where the recipe comes from (defaults to the configured source)
    #[arg(long)]
    pub source: Option<String>,
}

impl AddCommand {
    /// The form fields as a draft for validation.
    #[must_use]
    pub fn draft(&self) -> RecipeDraft {
        RecipeDraft {
            name: self.name.clone(),
            ingredients: self.ingredients.clone(),
            steps: self.steps.clone(),
            cooking_time: self.time.clone(),
        }
    }
}

/// Shopping list commands.
#[derive(Debug, Subcommand)]
pub enum ShopCommand {
    /// Show the shopping list, next item first
    List,

    /// Put one item at the back of the list
    Add {
        /// Item to buy
        item: String,
    },

    /// Put a recipe's ingredients on the list, skipping ones already there
    Recipe {
        /// Recipe name
        name: String,
    },

    /// Mark the next item as acquired
    Done,
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

//! `recipebox` - A personal recipe organizer
//!
//! This library keeps a collection of recipes searchable by ingredient, a
//! shopping queue that can be filled from a recipe's ingredient list, and a
//! history of viewed recipes, all persisted to a single JSON file.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod book;
pub mod cli;
pub mod config;
pub mod error;
pub mod history;
pub mod logging;
pub mod recipe;
pub mod render;
pub mod seed;
pub mod session;
pub mod shopping;
pub mod storage;
pub mod store;

pub use book::RecipeBook;
pub use config::Config;
pub use error::{Error, Result};
pub use history::HistoryStack;
pub use logging::init_logging;
pub use recipe::{Recipe, RecipeDraft, RecipeKind};
pub use session::Session;
pub use shopping::ShoppingQueue;
pub use storage::{DataFile, LoadStatus, Loaded};
pub use store::RecipeStore;

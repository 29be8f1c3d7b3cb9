//! Error types for recipebox.
//!
//! This module defines all error types used throughout the recipebox crate,
//! providing detailed context for debugging and user-friendly error messages.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for recipebox operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Recipe Errors ===
    /// A user-entered field is missing or malformed.
    #[error("invalid {field}: {reason}")]
    Validation {
        /// Name of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// A recipe with the same name is already in the store.
    #[error("recipe '{name}' already exists")]
    DuplicateRecipe {
        /// The conflicting recipe name.
        name: String,
    },

    /// No recipe with the given name exists.
    #[error("recipe '{name}' not found")]
    RecipeNotFound {
        /// The name that was looked up.
        name: String,
    },

    // === Persistence Errors ===
    /// The data file exists but could not be read.
    #[error("failed to read data file {path}: {source}")]
    DataRead {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The data file could not be written.
    #[error("failed to write data file {path}: {source}")]
    DataWrite {
        /// Path to the data file.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Serialization Errors ===
    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for recipebox operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a validation error for the given field.
    #[must_use]
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Create a duplicate recipe error.
    #[must_use]
    pub fn duplicate(name: impl Into<String>) -> Self {
        Self::DuplicateRecipe { name: name.into() }
    }

    /// Create a recipe not found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::RecipeNotFound { name: name.into() }
    }

    /// Check if this error is a rejected user input.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Check if this error is a duplicate-name conflict.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateRecipe { .. })
    }

    /// Check if this error indicates a missing recipe.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RecipeNotFound { .. })
    }
}

//! Storage layer for recipebox.
//!
//! Recipes and the shopping queue are kept in a single JSON file that is
//! rewritten on every save. Loading never fails: a missing file means no
//! prior data, and an unreadable or malformed one is logged, set aside and
//! reported through [`LoadStatus`] so the caller can tell the user.

pub mod format;

use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use crate::book::RecipeBook;
use crate::error::{Error, Result};
use crate::recipe::DEFAULT_SOURCE;
use crate::shopping::ShoppingQueue;
use crate::store::RecipeStore;

pub use format::{DataDocument, RecipeRecord};

/// How a load went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    /// The file was read and parsed.
    Loaded,
    /// There was no file yet.
    Missing,
    /// The file could not be read or parsed; nothing was loaded.
    Corrupt {
        /// What went wrong.
        reason: String,
    },
}

impl LoadStatus {
    /// Whether the data came from an existing file.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded)
    }
}

impl std::fmt::Display for LoadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded => write!(f, "loaded"),
            Self::Missing => write!(f, "no data file"),
            Self::Corrupt { reason } => write!(f, "unreadable ({reason})"),
        }
    }
}

/// Result of [`DataFile::load`].
#[derive(Debug, Clone)]
pub struct Loaded {
    /// Recovered recipes (empty unless [`LoadStatus::Loaded`]).
    pub store: RecipeStore,
    /// Recovered shopping queue, in file order.
    pub queue: ShoppingQueue,
    /// How the load went.
    pub status: LoadStatus,
}

impl Loaded {
    fn empty(status: LoadStatus) -> Self {
        Self {
            store: RecipeStore::new(),
            queue: ShoppingQueue::new(),
            status,
        }
    }

    /// Assemble a recipe book from the loaded parts.
    #[must_use]
    pub fn into_book(self) -> RecipeBook {
        RecipeBook::from_parts(self.store, self.queue)
    }
}

/// Facts about the data file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFileStats {
    /// Whether the file exists.
    pub exists: bool,
    /// Size of the file in bytes (0 if missing).
    pub size_bytes: u64,
}

/// The JSON file recipes and the shopping queue persist to.
#[derive(Debug, Clone)]
pub struct DataFile {
    /// Path to the data file.
    path: PathBuf,
    /// Source given to homemade records that lack one.
    default_source: String,
    /// Write through a temporary file and rename over the target.
    atomic_writes: bool,
}

impl DataFile {
    /// A data file at `path` with default settings.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            default_source: DEFAULT_SOURCE.to_string(),
            atomic_writes: true,
        }
    }

    /// Set the source given to homemade records that lack one.
    #[must_use]
    pub fn with_default_source(mut self, source: impl Into<String>) -> Self {
        self.default_source = source.into();
        self
    }

    /// Choose between atomic (temp file + rename) and in-place writes.
    #[must_use]
    pub fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic_writes = atomic;
        self
    }

    /// Get the path to the data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load recipes and the shopping queue.
    ///
    /// Never fails; see [`LoadStatus`] for what happened.
    #[must_use]
    pub fn load(&self) -> Loaded {
        debug!("Loading data from {}", self.path.display());

        let content = match fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "Data file {} not found, starting empty",
                    self.path.display()
                );
                return Loaded::empty(LoadStatus::Missing);
            }
            Err(source) => {
                let err = Error::DataRead {
                    path: self.path.clone(),
                    source,
                };
                error!("{}; starting empty", err);
                if self.path.is_file() {
                    self.set_aside();
                }
                return Loaded::empty(LoadStatus::Corrupt {
                    reason: err.to_string(),
                });
            }
        };

        match serde_json::from_slice::<DataDocument>(&content) {
            Ok(document) => {
                let (store, queue) = document.into_state(&self.default_source);
                info!(
                    "Loaded {} recipes and {} shopping items from {}",
                    store.len(),
                    queue.len(),
                    self.path.display()
                );
                Loaded {
                    store,
                    queue,
                    status: LoadStatus::Loaded,
                }
            }
            Err(e) => {
                let err = Error::from(e);
                error!(
                    "Data file {} is malformed: {}; starting empty",
                    self.path.display(),
                    err
                );
                self.set_aside();
                Loaded::empty(LoadStatus::Corrupt {
                    reason: err.to_string(),
                })
            }
        }
    }

    /// Write recipes and the shopping queue, replacing the file.
    ///
    /// Creates parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, directory creation or the write
    /// fails. The previous file is left intact when atomic writes are on.
    pub fn try_save(&self, store: &RecipeStore, queue: &ShoppingQueue) -> Result<()> {
        let document = DataDocument::from_state(store, queue);
        let json = serde_json::to_string_pretty(&document)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        if self.atomic_writes {
            let temp = self.sibling("tmp");
            fs::write(&temp, &json).map_err(|source| Error::DataWrite {
                path: temp.clone(),
                source,
            })?;
            fs::rename(&temp, &self.path).map_err(|source| {
                let _ = fs::remove_file(&temp);
                Error::DataWrite {
                    path: self.path.clone(),
                    source,
                }
            })?;
        } else {
            fs::write(&self.path, &json).map_err(|source| Error::DataWrite {
                path: self.path.clone(),
                source,
            })?;
        }

        info!(
            "Saved {} recipes and {} shopping items to {}",
            store.len(),
            queue.len(),
            self.path.display()
        );
        Ok(())
    }

    /// Write recipes and the shopping queue, logging instead of failing.
    ///
    /// Returns `true` if the data was written.
    pub fn save(&self, store: &RecipeStore, queue: &ShoppingQueue) -> bool {
        match self.try_save(store, queue) {
            Ok(()) => true,
            Err(e) => {
                error!("Error saving data: {}", e);
                false
            }
        }
    }

    /// [`DataFile::save`] for a whole recipe book.
    pub fn save_book(&self, book: &RecipeBook) -> bool {
        self.save(book.store(), book.queue())
    }

    /// Whether the file exists and how large it is.
    #[must_use]
    pub fn stats(&self) -> DataFileStats {
        match fs::metadata(&self.path) {
            Ok(meta) => DataFileStats {
                exists: true,
                size_bytes: meta.len(),
            },
            Err(_) => DataFileStats {
                exists: false,
                size_bytes: 0,
            },
        }
    }

    /// Path next to the data file with an extra extension appended.
    fn sibling(&self, extension: &str) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".");
        name.push(extension);
        PathBuf::from(name)
    }

    /// Copy a malformed or unreadable data file to `<path>.corrupt`.
    ///
    /// A file that cannot be copied is renamed instead, so the next save
    /// never replaces the only copy.
    fn set_aside(&self) {
        let backup = self.sibling("corrupt");
        let copy_err = match fs::copy(&self.path, &backup) {
            Ok(_) => {
                warn!("Copied malformed data file to {}", backup.display());
                return;
            }
            Err(e) => e,
        };
        match fs::rename(&self.path, &backup) {
            Ok(()) => warn!(
                "Could not copy data file ({}); moved it to {}",
                copy_err,
                backup.display()
            ),
            Err(e) => error!(
                "Could not set aside data file {}: {}",
                self.path.display(),
                e
            ),
        }
    }
}

//! A single-file store for the whole [`Document`].
//!
//! Every save rewrites the file completely. A file that cannot be read back
//! is treated as an empty document rather than an error, since losing a
//! corrupt file is preferable to refusing to start.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error;
use tracing::instrument;

use crate::{Document, storage::transfer};

/// Directory under the root that holds the data file and configuration.
pub const DATA_DIR: &str = "data";

/// Name of the data file inside [`DATA_DIR`].
pub const DOCUMENT_FILE: &str = "trees.json";

const CONFIG_FILE: &str = "config.toml";

/// The persisted document could not be read back.
///
/// [`Store::load`] recovers from this by starting with an empty document.
#[derive(Debug, Error)]
pub enum CorruptStoreError {
    /// The file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// The data file.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The file content is not a valid document.
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        /// The data file.
        path: PathBuf,
        /// The underlying error.
        source: serde_json::Error,
    },
}

/// The document could not be written.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A filesystem operation failed.
    #[error("failed to write {}: {source}", path.display())]
    Io {
        /// The file or directory being written.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
    /// The document could not be serialized.
    #[error("failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A document persisted as one pretty-printed JSON file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    /// Opens the store under `root`, creating the data directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the data directory cannot be created.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        let dir = root.join(DATA_DIR);
        fs::create_dir_all(&dir).map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self::at(dir.join(DOCUMENT_FILE)))
    }

    /// A store backed by the given file. No directories are created.
    #[must_use]
    pub const fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// The data file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configuration file that sits alongside the data file.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.path.with_file_name(CONFIG_FILE)
    }

    /// Reads the document, reporting corruption to the caller.
    ///
    /// A missing file is not an error: it yields an empty document.
    ///
    /// # Errors
    ///
    /// Returns [`CorruptStoreError`] if the file exists but cannot be read or
    /// parsed.
    pub fn try_load(&self) -> Result<Document, CorruptStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("No data file at {}, starting empty", self.path.display());
                return Ok(Document::new());
            }
            Err(source) => {
                return Err(CorruptStoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&content).map_err(|source| CorruptStoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Reads the document, falling back to an empty one if the file is
    /// corrupt.
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    #[must_use]
    pub fn load(&self) -> Document {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!("Starting with an empty document: {e}");
            Document::new()
        })
    }

    /// Overwrites the file with the full document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the document cannot be serialized or the file
    /// cannot be written.
    #[instrument(level = "debug", skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, document: &Document) -> Result<(), StoreError> {
        let bytes = transfer::export(document)?;
        fs::write(&self.path, bytes).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(trees = document.len(), "saved document");
        Ok(())
    }

    /// Replaces the stored document with an empty one.
    ///
    /// # Errors
    ///
    /// See [`Store::save`].
    pub fn reset(&self) -> Result<(), StoreError> {
        self.save(&Document::new())
    }
}

//! The load-mutate-save cycle.
//!
//! A [`Workspace`] holds a [`Store`] together with the [`Document`] loaded from
//! it. Every successful mutation is immediately followed by a full save; a
//! rejected mutation leaves both the document and the file untouched.

use std::path::Path;

use thiserror::Error;
use tracing::instrument;

use crate::{
    Config, Document, Record, RecordDraft, Tree, TreeDraft, TreeId, ValidationError,
    storage::{ImportFormatError, Store, StoreError, transfer},
};

/// Errors returned by [`Workspace`] operations.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// The user input was incomplete.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// An imported file was not a document.
    #[error(transparent)]
    Import(#[from] ImportFormatError),
    /// No tree has the given id.
    #[error("tree #{0} not found")]
    TreeNotFound(TreeId),
    /// The document could not be saved.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A document bound to the store it was loaded from.
#[derive(Debug)]
pub struct Workspace {
    store: Store,
    document: Document,
    config: Config,
}

impl Workspace {
    /// Opens the workspace under `root`.
    ///
    /// The data directory is created if it does not exist. A corrupt data file
    /// is replaced by an empty document in memory; it is only overwritten on
    /// the next save.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the data directory cannot be created.
    pub fn open(root: &Path) -> Result<Self, StoreError> {
        Ok(Self::with_store(Store::open(root)?))
    }

    /// Loads a workspace from an existing store.
    #[must_use]
    pub fn with_store(store: Store) -> Self {
        let document = store.load();
        let config = Config::load_or_default(&store.config_path());
        tracing::debug!(
            trees = document.len(),
            records = document.record_count(),
            "opened workspace"
        );
        Self {
            store,
            document,
            config,
        }
    }

    /// The current document.
    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Display preferences loaded alongside the document.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The backing store.
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Registers a tree and saves.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Validation`] if the name or location is
    /// blank (nothing is saved), or [`WorkspaceError::Store`] if saving
    /// fails.
    #[instrument(level = "debug", skip(self))]
    pub fn add_tree(&mut self, draft: TreeDraft) -> Result<Tree, WorkspaceError> {
        let tree = self.document.create(draft)?.clone();
        self.store.save(&self.document)?;
        tracing::info!("Registered {}", tree.label());
        Ok(tree)
    }

    /// Appends an observation record to a tree and saves.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::TreeNotFound`] for an unknown id,
    /// [`WorkspaceError::Validation`] for a blank title (nothing is saved in
    /// either case), or [`WorkspaceError::Store`] if saving fails.
    #[instrument(level = "debug", skip(self))]
    pub fn add_record(
        &mut self,
        id: &TreeId,
        draft: RecordDraft,
    ) -> Result<Record, WorkspaceError> {
        let tree = self
            .document
            .find_mut(id)
            .ok_or_else(|| WorkspaceError::TreeNotFound(id.clone()))?;
        let record = tree.append(draft)?.clone();
        self.store.save(&self.document)?;
        tracing::info!("Recorded '{}' for #{id}", record.title);
        Ok(record)
    }

    /// Serializes the current document for download.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Store`] if serialization fails.
    pub fn export(&self) -> Result<Vec<u8>, WorkspaceError> {
        transfer::export(&self.document).map_err(|e| StoreError::from(e).into())
    }

    /// Replaces the whole document with an imported one and saves.
    ///
    /// Nothing is merged: trees not present in the import are gone.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Import`] if the bytes are not a document (the
    /// current document is kept), or [`WorkspaceError::Store`] if saving
    /// fails.
    #[instrument(level = "debug", skip_all, fields(bytes = bytes.len()))]
    pub fn import(&mut self, bytes: &[u8]) -> Result<&Document, WorkspaceError> {
        let document = transfer::import(bytes)?;
        self.document = document;
        self.store.save(&self.document)?;
        tracing::info!(
            "Imported {} trees with {} records",
            self.document.len(),
            self.document.record_count()
        );
        Ok(&self.document)
    }

    /// Deletes every tree and record and saves the empty document.
    ///
    /// # Errors
    ///
    /// Returns [`WorkspaceError::Store`] if saving fails.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) -> Result<(), WorkspaceError> {
        self.store.reset()?;
        self.document = Document::new();
        tracing::info!("Reset all data");
        Ok(())
    }
}

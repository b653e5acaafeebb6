//! School Tree Map
//!
//! Campus trees, the observations logged against them, and a small catalog of
//! learning cards. All data lives in a single JSON document that is loaded,
//! mutated and written back as a whole.

pub mod domain;
pub use domain::{
    Config, Document, DocumentError, Field, Record, RecordDraft, Stamp, Tree, TreeDraft, TreeId,
    ValidationError,
};

pub mod catalog;
pub use catalog::LearningCard;

/// On-disk persistence, import/export and the load-mutate-save workspace.
pub mod storage;
pub use storage::{
    CorruptStoreError, ImportFormatError, Store, StoreError, Workspace, WorkspaceError,
};

mod store;
/// Import and export of whole documents.
pub mod transfer;
mod workspace;

pub use store::{CorruptStoreError, DATA_DIR, DOCUMENT_FILE, Store, StoreError};
pub use transfer::{EXPORT_FILE_NAME, EXPORT_MIME_TYPE, ImportFormatError};
pub use workspace::{Workspace, WorkspaceError};

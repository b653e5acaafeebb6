//! Domain models for the tree map.
//!
//! This module contains the persisted types (the document, its trees and
//! their observation records), tree identifiers, timestamps, input validation
//! and configuration.

mod config;
pub use config::Config;

/// The root persisted document and the tree registry operations.
pub mod document;
pub use document::{Document, DocumentError};

/// Short opaque tree identifiers.
pub mod id;
pub use id::TreeId;

mod record;
pub use record::{Record, RecordDraft};

mod stamp;
pub use stamp::Stamp;

mod tree;
pub use tree::{Tree, TreeDraft};

mod validation;
pub use validation::{Field, ValidationError};

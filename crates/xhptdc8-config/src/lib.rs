//! Validation and application of xHPTDC8 configuration documents.
//!
//! A document (YAML or JSON, parsed into a generic [`Node`] tree) describes a
//! subset of the manager configuration. Applying it validates every field
//! against the fixed schema and either writes the whole document into a
//! [`ManagerConfig`] or reports the first violation with a stable
//! [`ErrorCode`].

mod apply;
mod document;
mod error;
mod export;
mod keys;
mod loader;
mod model;
mod yaml;

/// Observers notified about applied fields.
pub use apply::{AppliedValue, ApplyObserver, LogObserver, NoopObserver};
/// Generic document tree.
pub use document::Node;
/// Error types and the stable error code table.
pub use error::{ApplyError, CoercionError, ConfigError, ErrorCode};
/// Document loading helpers.
pub use loader::{apply_status, load_document_file, load_document_str};
/// Configuration schema models.
pub use model::*;

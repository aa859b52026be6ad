//! Error kinds for slntree operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on the kind to decide whether to report, skip or abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// The requested input format or operation is not supported
    Unsupported,

    // =========================================================================
    // Snapshot errors
    // =========================================================================
    /// A record could not be turned into a node or edge
    InvalidRecord,

    /// Failed to decode a record source (CSV, JSON)
    DeserializationFailed,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File or directory not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

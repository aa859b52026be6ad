//! # slntree-error
//!
//! Unified error handling for slntree.
//!
//! - **ErrorKind**: what went wrong (e.g. `InvalidRecord`, `FileNotFound`)
//! - **Context**: key/value pairs naming the file, row or option involved
//! - **Source**: the underlying error, boxed so raw types do not leak
//!
//! ```rust
//! use slntree_error::{Error, ErrorKind};
//!
//! fn load() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::InvalidRecord, "unknown reference type")
//!         .with_operation("collect::references")
//!         .with_context("file", "references.csv")
//!         .with_context("row", "7"))
//! }
//! ```
//!
//! Per-record and per-edge anomalies are absorbed where they happen (skipped
//! and logged); an `Error` is only returned when a whole input or setting is
//! unusable.

mod error;
mod kind;

pub use error::Error;
pub use kind::ErrorKind;

/// Result type alias using the slntree [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

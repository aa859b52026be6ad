//! Snapshot ingestion for slntree.
//!
//! Reads the nodes and references extracted from a set of solutions and
//! builds a [`DependencyGraph`](slntree_core::DependencyGraph) from them.
//!
//! # Module Structure
//!
//! - [`types`]: record shapes, the loaded snapshot and its diagnostics
//! - [`collect`]: CSV directory and JSON file loading

mod collect;
mod types;

pub use collect::{
    ASSEMBLIES_FILE, PROJECTS_FILE, REFERENCES_FILE, SOLUTIONS_FILE, load_directory, load_json,
    load_snapshot,
};
pub use types::{Diagnostics, NodeRecord, ReferenceRecord, SkippedRow, Snapshot, SnapshotFile};

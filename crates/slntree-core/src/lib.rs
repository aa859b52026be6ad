//! Graph model for solution/project/assembly reference trees.
//!
//! - [`node`]: typed nodes and stable identifiers
//! - [`catalog`]: the node index and the project → assembly association
//! - [`edge`]: the deduplicated reference edge store
//! - [`reach`]: shallowest-depth analysis from a root
//! - [`graph`]: a complete snapshot bundling all of the above

pub mod catalog;
pub mod edge;
pub mod graph;
pub mod node;
pub mod reach;

pub use catalog::{AssemblyMap, NodeCatalog};
pub use edge::{Edge, EdgeStore, GraphKind, ReferenceType};
pub use graph::DependencyGraph;
pub use node::{Node, NodeDetail, NodeId, NodeKind, compare_display, file_stem, normalize_path};
pub use reach::{DepthTable, shallowest_depths};
pub use slntree_error::{Error, ErrorKind, Result};

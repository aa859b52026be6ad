//! Dependency tree rendering for slntree.
//!
//! Turns a [`DependencyGraph`] into plain-text trees, one per solution, that
//! expand every project once at its shallowest occurrence.
//!
//! # Module Structure
//!
//! - [`options`]: rendering settings
//! - [`tree`]: the per-root tree renderer
//! - [`report`]: orphan detection and statistics
//! - [`document`]: the full report (header, forest, orphans, footer)

pub mod document;
pub mod options;
pub mod report;
pub mod tree;

pub use document::{RenderOutcome, Report, ReportHeader, render_report};
pub use options::RenderOptions;
pub use report::{Statistics, orphans, statistics};
pub use slntree_core::DependencyGraph;
pub use tree::{Annotation, RenderedTree, TreeRenderer, TreeStats};

//! slntree command-line interface.
//!
pub mod config;
pub mod options;
pub mod output;
pub mod pipeline;

use std::path::PathBuf;

use slntree_render::RenderOptions;

pub use config::FileConfig;
pub use options::RenderArgs;
pub use output::write_report;
pub use pipeline::build_report;

/// Options for running slntree.
#[derive(Debug, Clone)]
pub struct SlntreeOptions {
    /// Snapshot directory or `.json` file.
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub render: RenderOptions,
    pub revision: Option<String>,
}

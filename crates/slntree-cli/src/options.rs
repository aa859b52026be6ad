//! Rendering flags shared by the CLI and its tests.

use clap::Args;

use slntree_render::RenderOptions;

use crate::config::FileConfig;

/// Flags controlling tree rendering. Unset flags fall back to the config
/// file, then to the renderer defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    /// Maximum depth to expand below each solution (default: 3)
    #[arg(long = "max-depth", value_name = "N")]
    pub max_depth: Option<usize>,

    /// Do not nest assembly dependency sub-trees under projects
    #[arg(long = "no-assemblies")]
    pub no_assemblies: bool,

    /// Only render the solution with exactly this name
    #[arg(long = "root", value_name = "NAME")]
    pub root: Option<String>,

    /// Source-control revision to stamp in the report header
    #[arg(long = "revision", value_name = "REV")]
    pub revision: Option<String>,
}

impl RenderArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_no_assemblies(mut self, no_assemblies: bool) -> Self {
        self.no_assemblies = no_assemblies;
        self
    }

    pub fn with_root(mut self, root: Option<String>) -> Self {
        self.root = root;
        self
    }

    /// Merge with the config file: flag, then file, then default.
    pub fn resolve(&self, config: &FileConfig) -> RenderOptions {
        let defaults = RenderOptions::default();
        let max_depth = self
            .max_depth
            .or(config.max_depth)
            .unwrap_or(defaults.max_depth);
        let include_assemblies = !self.no_assemblies
            && config
                .include_assembly_dependencies
                .unwrap_or(defaults.include_assembly_dependencies);

        defaults
            .with_max_depth(max_depth)
            .with_assembly_dependencies(include_assemblies)
            .with_root_filter(self.root.clone().or_else(|| config.root.clone()))
    }

    pub fn resolve_revision(&self, config: &FileConfig) -> Option<String> {
        self.revision.clone().or_else(|| config.revision.clone())
    }
}

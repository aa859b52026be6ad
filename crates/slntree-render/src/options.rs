/// Default depth limit for rendered trees.
pub const DEFAULT_MAX_DEPTH: usize = 3;

/// Options for tree rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Nodes at this depth are emitted but their children are not.
    pub max_depth: usize,
    /// Nest each expanded project's assembly dependency sub-tree under it.
    pub include_assembly_dependencies: bool,
    /// Only render the solution with exactly this name.
    pub root_filter: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            include_assembly_dependencies: true,
            root_filter: None,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_assembly_dependencies(mut self, include: bool) -> Self {
        self.include_assembly_dependencies = include;
        self
    }

    pub fn with_root_filter(mut self, root: Option<String>) -> Self {
        self.root_filter = root;
        self
    }
}

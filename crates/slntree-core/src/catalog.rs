use std::collections::HashMap;

use tracing::debug;

use crate::node::{Node, NodeId, NodeKind, compare_display, file_stem};

/// Index of every known node, keyed by id, in insertion order.
#[derive(Debug, Default, Clone)]
pub struct NodeCatalog {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
}

impl NodeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. A node whose id is already present is the same entity
    /// and is dropped; returns whether the node was added.
    pub fn insert(&mut self, node: Node) -> bool {
        if self.index.contains_key(node.id()) {
            debug!(id = %node.id(), name = node.name(), "duplicate node id ignored");
            return false;
        }
        self.index.insert(node.id().clone(), self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Nodes of one kind in insertion order.
    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |node| node.is_kind(kind))
    }

    /// Nodes of one kind in display order.
    pub fn sorted_of_kind(&self, kind: NodeKind) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.of_kind(kind).collect();
        nodes.sort_by(|a, b| compare_display(a, b));
        nodes
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Nodes of `kind` whose display name equals `name` exactly.
    pub fn find_by_name(&self, kind: NodeKind, name: &str) -> Vec<&Node> {
        self.of_kind(kind).filter(|node| node.name() == name).collect()
    }

    /// Associate each project with the assembly it presumably produces.
    ///
    /// An assembly matches a project when its name equals the project's
    /// display name or the project file's base name (ASCII case-insensitive).
    /// The first matching assembly in catalog order wins, whichever key it
    /// matched on.
    pub fn build_assembly_map(&self) -> AssemblyMap {
        // lowercase name -> (catalog position, id) of its first assembly
        let mut by_name: HashMap<String, (usize, &NodeId)> = HashMap::new();
        for (position, assembly) in self.of_kind(NodeKind::Assembly).enumerate() {
            by_name
                .entry(assembly.name().to_ascii_lowercase())
                .or_insert((position, assembly.id()));
        }

        let mut map = AssemblyMap::default();
        for project in self.of_kind(NodeKind::Project) {
            let by_display = by_name.get(&project.name().to_ascii_lowercase());
            let by_stem = by_name.get(&file_stem(project.path()).to_ascii_lowercase());
            let found = by_display
                .into_iter()
                .chain(by_stem)
                .min_by_key(|(position, _)| *position);
            if let Some(&(_, assembly)) = found {
                map.by_project.insert(project.id().clone(), assembly.clone());
            }
        }

        debug!(
            projects = self.count(NodeKind::Project),
            mapped = map.len(),
            "project to assembly association built"
        );
        map
    }
}

/// Project id → id of the assembly it produces. At most one per project.
#[derive(Debug, Default, Clone)]
pub struct AssemblyMap {
    by_project: HashMap<NodeId, NodeId>,
}

impl AssemblyMap {
    pub fn get(&self, project: &str) -> Option<&NodeId> {
        self.by_project.get(project)
    }

    pub fn len(&self) -> usize {
        self.by_project.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_project.is_empty()
    }
}

//! Orphan detection and statistics over a rendered forest.

use std::collections::{BTreeMap, HashSet};

use strum::IntoEnumIterator;

use slntree_core::{
    DependencyGraph, EdgeStore, GraphKind, Node, NodeCatalog, NodeKind, ReferenceType,
};

use crate::tree::{RenderedTree, TreeStats};

/// Projects that no solution references, in display order.
///
/// Project → Project references do not rescue a project: only an incoming
/// Solution → Project edge does.
pub fn orphans<'g>(catalog: &'g NodeCatalog, edges: &EdgeStore) -> Vec<&'g Node> {
    catalog
        .sorted_of_kind(NodeKind::Project)
        .into_iter()
        .filter(|project| {
            !edges
                .incoming(project.id().as_str(), GraphKind::Project)
                .any(|edge| edge.from_kind() == NodeKind::Solution)
        })
        .collect()
}

/// Totals reported in the footer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Statistics {
    pub nodes_by_kind: BTreeMap<NodeKind, usize>,
    /// Every reference type is present, zero when no edge has it.
    pub edges_by_type: BTreeMap<ReferenceType, usize>,
    pub orphan_count: usize,
    /// Projects not reachable from any rendered root.
    pub unreached_projects: usize,
    pub trees: usize,
    pub render: TreeStats,
}

impl Statistics {
    pub fn total_edges(&self) -> usize {
        self.edges_by_type.values().sum()
    }

    pub fn nodes(&self, kind: NodeKind) -> usize {
        self.nodes_by_kind.get(&kind).copied().unwrap_or(0)
    }

    pub fn edges(&self, reference_type: ReferenceType) -> usize {
        self.edges_by_type.get(&reference_type).copied().unwrap_or(0)
    }

    /// Footer lines.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for (reference_type, count) in &self.edges_by_type {
            lines.push(format!("{reference_type} references: {count}"));
        }
        lines.push(format!("Total references: {}", self.total_edges()));
        lines.push(format!("Orphaned projects: {}", self.orphan_count));
        lines.push(format!(
            "Projects unreachable from rendered solutions: {}",
            self.unreached_projects
        ));
        lines.push(format!("Trees rendered: {}", self.trees));
        lines.push(format!("Expanded nodes: {}", self.render.expanded));
        lines.push(format!("Back-references (*): {}", self.render.back_references));
        lines.push(format!("Deferred to shallower occurrence (...): {}", self.render.deferred));
        lines.push(format!("Circular references: {}", self.render.circular));
        lines.push(format!("Truncated at max depth: {}", self.render.truncated));
        lines.push(format!("Assembly sub-trees: {}", self.render.assembly_subtrees));
        lines.push(format!(
            "Skipped references to unknown nodes: {}",
            self.render.missing_references
        ));
        lines
    }
}

/// Tally the graph and the trees rendered from it.
pub fn statistics(
    graph: &DependencyGraph,
    trees: &[RenderedTree],
    orphan_count: usize,
) -> Statistics {
    let catalog = graph.catalog();
    let nodes_by_kind = NodeKind::iter()
        .map(|kind| (kind, catalog.count(kind)))
        .collect();

    let mut edges_by_type: BTreeMap<ReferenceType, usize> =
        ReferenceType::iter().map(|reference_type| (reference_type, 0)).collect();
    for (reference_type, count) in graph.edges().count_by_type() {
        edges_by_type.insert(reference_type, count);
    }

    let reached: HashSet<&str> = trees
        .iter()
        .flat_map(|tree| tree.reached.iter().map(|id| id.as_str()))
        .collect();
    let unreached_projects = catalog
        .of_kind(NodeKind::Project)
        .filter(|project| !reached.contains(project.id().as_str()))
        .count();

    let mut render = TreeStats::default();
    for tree in trees {
        render.merge(&tree.stats);
    }

    Statistics {
        nodes_by_kind,
        edges_by_type,
        orphan_count,
        unreached_projects,
        trees: trees.len(),
        render,
    }
}

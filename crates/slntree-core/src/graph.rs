use tracing::{debug, info};

use crate::catalog::{AssemblyMap, NodeCatalog};
use crate::edge::{EdgeStore, GraphKind};
use crate::node::{Node, NodeId, NodeKind};
use crate::reach::{DepthTable, shallowest_depths};

/// A complete, immutable extraction snapshot: nodes, edges and the project →
/// assembly association derived from them.
#[derive(Debug, Default, Clone)]
pub struct DependencyGraph {
    catalog: NodeCatalog,
    edges: EdgeStore,
    assemblies: AssemblyMap,
}

impl DependencyGraph {
    pub fn new(catalog: NodeCatalog, edges: EdgeStore) -> Self {
        let assemblies = catalog.build_assembly_map();
        info!(
            nodes = catalog.len(),
            edges = edges.len(),
            mapped_assemblies = assemblies.len(),
            "dependency graph ready"
        );
        if assemblies.is_empty() && catalog.count(NodeKind::Assembly) > 0 {
            debug!("no project matches a cataloged assembly");
        }
        Self {
            catalog,
            edges,
            assemblies,
        }
    }

    pub fn catalog(&self) -> &NodeCatalog {
        &self.catalog
    }

    pub fn edges(&self) -> &EdgeStore {
        &self.edges
    }

    pub fn assemblies(&self) -> &AssemblyMap {
        &self.assemblies
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.catalog.get(id)
    }

    /// The assembly node a project produces, if one is known.
    pub fn assembly_of(&self, project: &str) -> Option<&Node> {
        self.assemblies
            .get(project)
            .and_then(|id| self.catalog.get(id.as_str()))
    }

    /// Solutions in display order: the roots of the rendered forest.
    pub fn roots(&self) -> Vec<&Node> {
        self.catalog.sorted_of_kind(NodeKind::Solution)
    }

    pub fn depths_from(&self, root: &NodeId, graph: GraphKind) -> DepthTable {
        shallowest_depths(&self.edges, root, graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::ReferenceType;

    #[test]
    fn test_roots_sorted_and_assembly_lookup() {
        let mut catalog = NodeCatalog::new();
        catalog.insert(Node::solution("s2", "Zeta", "/z.sln"));
        catalog.insert(Node::solution("s1", "alpha", "/a.sln"));
        catalog.insert(Node::project("p", "Core", "/Core.csproj"));
        catalog.insert(Node::assembly("a", "Core", "/Core.csproj", "Core.dll"));
        let mut edges = EdgeStore::new();
        edges.add("s1", "p", ReferenceType::SolutionToProject);

        let graph = DependencyGraph::new(catalog, edges);
        let roots: Vec<_> = graph.roots().iter().map(|n| n.name()).collect();
        assert_eq!(roots, vec!["alpha", "Zeta"]);
        assert_eq!(graph.assembly_of("p").map(Node::name), Some("Core"));
        assert!(graph.assembly_of("s1").is_none());
        assert_eq!(
            graph.depths_from(&NodeId::new("s1"), GraphKind::Project).get("p"),
            Some(1)
        );
    }
}

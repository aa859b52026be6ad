use std::collections::{HashMap, VecDeque};

use crate::edge::{EdgeStore, GraphKind};
use crate::node::NodeId;

/// Shallowest depth of every node reachable from one root.
///
/// The root sits at depth 0. Nodes that cannot be reached are absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthTable {
    depths: HashMap<NodeId, usize>,
    /// Ids in discovery order.
    order: Vec<NodeId>,
}

impl DepthTable {
    pub fn get(&self, id: &str) -> Option<usize> {
        self.depths.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.depths.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `(id, depth)` pairs in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, usize)> {
        self.order.iter().map(|id| (id, self.depths[id]))
    }

    pub fn max_depth(&self) -> usize {
        self.depths.values().copied().max().unwrap_or(0)
    }

    fn record(&mut self, id: &NodeId, depth: usize) -> bool {
        if self.depths.contains_key(id) {
            return false;
        }
        self.depths.insert(id.clone(), depth);
        self.order.push(id.clone());
        true
    }
}

/// Breadth-first search from `root` over one graph.
///
/// A node's depth is fixed the first time it is discovered, so it equals the
/// length of a shortest path; ties follow adjacency insertion order.
pub fn shallowest_depths(edges: &EdgeStore, root: &NodeId, graph: GraphKind) -> DepthTable {
    let mut table = DepthTable::default();
    let mut queue = VecDeque::new();

    table.record(root, 0);
    queue.push_back((root, 0usize));

    while let Some((current, depth)) = queue.pop_front() {
        for next in edges.adjacency(current.as_str(), graph) {
            if table.record(next, depth + 1) {
                queue.push_back((next, depth + 1));
            }
        }
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edge::ReferenceType;

    fn store(pairs: &[(&str, &str)]) -> EdgeStore {
        let mut store = EdgeStore::new();
        for (from, to) in pairs {
            store.add(*from, *to, ReferenceType::ProjectToProject);
        }
        store
    }

    #[test]
    fn test_root_is_depth_zero() {
        let table = shallowest_depths(&store(&[]), &NodeId::new("r"), GraphKind::Project);
        assert_eq!(table.get("r"), Some(0));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_shortest_path_wins() {
        // r -> e -> d and r -> d
        let edges = store(&[("r", "e"), ("e", "d"), ("r", "d"), ("d", "x")]);
        let table = shallowest_depths(&edges, &NodeId::new("r"), GraphKind::Project);
        assert_eq!(table.get("e"), Some(1));
        assert_eq!(table.get("d"), Some(1));
        assert_eq!(table.get("x"), Some(2));
        assert_eq!(table.max_depth(), 2);
    }

    #[test]
    fn test_cycles_terminate_and_unreachable_absent() {
        let edges = store(&[("a", "b"), ("b", "a"), ("b", "b"), ("z", "a")]);
        let table = shallowest_depths(&edges, &NodeId::new("a"), GraphKind::Project);
        assert_eq!(table.get("a"), Some(0));
        assert_eq!(table.get("b"), Some(1));
        assert!(!table.contains("z"));
    }

    #[test]
    fn test_discovery_order_follows_insertion() {
        let edges = store(&[("r", "m"), ("r", "c"), ("c", "k")]);
        let table = shallowest_depths(&edges, &NodeId::new("r"), GraphKind::Project);
        let order: Vec<_> = table.iter().map(|(id, d)| (id.as_str(), d)).collect();
        assert_eq!(order, vec![("r", 0), ("m", 1), ("c", 1), ("k", 2)]);
    }

    #[test]
    fn test_graphs_do_not_mix() {
        let mut edges = store(&[("a", "b")]);
        edges.add("b", "c", ReferenceType::AssemblyToAssembly);
        let table = shallowest_depths(&edges, &NodeId::new("a"), GraphKind::Project);
        assert!(!table.contains("c"));
    }
}

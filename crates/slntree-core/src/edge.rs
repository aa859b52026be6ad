use std::collections::{BTreeMap, HashMap, HashSet};
use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use slntree_error::{Error, ErrorKind, Result};

use crate::node::{NodeId, NodeKind};

/// Kind of reference an edge records.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
pub enum ReferenceType {
    #[strum(serialize = "Solution-to-Project")]
    SolutionToProject,
    #[strum(serialize = "Project-to-Project")]
    ProjectToProject,
    #[strum(serialize = "Assembly-to-Assembly")]
    AssemblyToAssembly,
}

impl ReferenceType {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    pub fn parse(raw: &str) -> Result<Self> {
        ReferenceType::from_str(raw.trim()).map_err(|_| {
            Error::new(
                ErrorKind::InvalidRecord,
                format!("unknown reference type '{raw}'"),
            )
            .with_operation("edge::parse_reference_type")
        })
    }

    /// Endpoint kinds `(from, to)` this reference type connects.
    pub fn endpoints(&self) -> (NodeKind, NodeKind) {
        match self {
            ReferenceType::SolutionToProject => (NodeKind::Solution, NodeKind::Project),
            ReferenceType::ProjectToProject => (NodeKind::Project, NodeKind::Project),
            ReferenceType::AssemblyToAssembly => (NodeKind::Assembly, NodeKind::Assembly),
        }
    }

    pub fn graph(&self) -> GraphKind {
        match self {
            ReferenceType::SolutionToProject | ReferenceType::ProjectToProject => {
                GraphKind::Project
            }
            ReferenceType::AssemblyToAssembly => GraphKind::Assembly,
        }
    }
}

/// The two disjoint reference graphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum GraphKind {
    /// Solution → Project and Project → Project references.
    Project,
    /// Assembly → Assembly references.
    Assembly,
}

/// A directed reference between two nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    from: NodeId,
    to: NodeId,
    reference_type: ReferenceType,
}

impl Edge {
    pub fn new(
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        reference_type: ReferenceType,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            reference_type,
        }
    }

    /// Build an edge from raw endpoint kinds, rejecting kinds that do not
    /// match the reference type.
    pub fn with_kinds(
        from: NodeId,
        from_kind: NodeKind,
        to: NodeId,
        to_kind: NodeKind,
        reference_type: ReferenceType,
    ) -> Result<Self> {
        let expected = reference_type.endpoints();
        if (from_kind, to_kind) != expected {
            return Err(Error::new(
                ErrorKind::InvalidRecord,
                format!("{reference_type} reference cannot connect {from_kind} to {to_kind}"),
            )
            .with_operation("edge::with_kinds")
            .with_context("from", from.to_string())
            .with_context("to", to.to_string()));
        }
        Ok(Self::new(from, to, reference_type))
    }

    pub fn from(&self) -> &NodeId {
        &self.from
    }

    pub fn to(&self) -> &NodeId {
        &self.to
    }

    pub fn from_kind(&self) -> NodeKind {
        self.reference_type.endpoints().0
    }

    pub fn to_kind(&self) -> NodeKind {
        self.reference_type.endpoints().1
    }

    pub fn reference_type(&self) -> ReferenceType {
        self.reference_type
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// One reference graph: edges in insertion order plus adjacency views.
#[derive(Debug, Default, Clone)]
struct EdgeSet {
    edges: Vec<Edge>,
    pairs: HashSet<(NodeId, NodeId)>,
    outgoing: HashMap<NodeId, Vec<NodeId>>,
    incoming: HashMap<NodeId, Vec<usize>>,
}

impl EdgeSet {
    fn insert(&mut self, edge: Edge) -> bool {
        let pair = (edge.from.clone(), edge.to.clone());
        if self.pairs.contains(&pair) {
            return false;
        }
        self.pairs.insert(pair);
        self.outgoing
            .entry(edge.from.clone())
            .or_default()
            .push(edge.to.clone());
        self.incoming
            .entry(edge.to.clone())
            .or_default()
            .push(self.edges.len());
        self.edges.push(edge);
        true
    }
}

/// Deduplicated reference edges, split into the project-level and the
/// assembly-level graph.
///
/// Endpoints are not checked against the catalog: dangling edges stay here
/// and are skipped when rendering.
#[derive(Debug, Default, Clone)]
pub struct EdgeStore {
    project: EdgeSet,
    assembly: EdgeSet,
}

impl EdgeStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, graph: GraphKind) -> &EdgeSet {
        match graph {
            GraphKind::Project => &self.project,
            GraphKind::Assembly => &self.assembly,
        }
    }

    /// Insert an edge unless the same `(from, to)` pair already exists in its
    /// graph. The first insertion wins; returns whether the edge was added.
    pub fn add_edge(&mut self, edge: Edge) -> bool {
        match edge.reference_type.graph() {
            GraphKind::Project => self.project.insert(edge),
            GraphKind::Assembly => self.assembly.insert(edge),
        }
    }

    pub fn add(
        &mut self,
        from: impl Into<NodeId>,
        to: impl Into<NodeId>,
        reference_type: ReferenceType,
    ) -> bool {
        self.add_edge(Edge::new(from, to, reference_type))
    }

    /// Direct successors of `node` in insertion order; empty for unknown ids.
    pub fn adjacency(&self, node: &str, graph: GraphKind) -> &[NodeId] {
        self.set(graph)
            .outgoing
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Edges pointing at `node` in one graph.
    pub fn incoming(&self, node: &str, graph: GraphKind) -> impl Iterator<Item = &Edge> {
        let set = self.set(graph);
        set.incoming
            .get(node)
            .into_iter()
            .flatten()
            .map(move |&idx| &set.edges[idx])
    }

    pub fn edges(&self, graph: GraphKind) -> &[Edge] {
        &self.set(graph).edges
    }

    pub fn iter(&self) -> impl Iterator<Item = &Edge> {
        self.project.edges.iter().chain(self.assembly.edges.iter())
    }

    pub fn len(&self) -> usize {
        self.project.edges.len() + self.assembly.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of edges per reference type. Types without edges are absent.
    pub fn count_by_type(&self) -> BTreeMap<ReferenceType, usize> {
        let mut counts = BTreeMap::new();
        for edge in self.iter() {
            *counts.entry(edge.reference_type).or_insert(0) += 1;
        }
        counts
    }
}

//! Record shapes and the loaded snapshot.

use serde::{Deserialize, Serialize};

use slntree_core::{DependencyGraph, Edge, Error, ErrorKind, Node, NodeId, NodeKind, Result};
use slntree_core::{ReferenceType, file_stem};

// Records

/// One solution, project or assembly row.
///
/// Every column is optional at the serde level; [`NodeRecord::into_node`]
/// decides which combinations are usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct NodeRecord {
    pub id: String,
    pub name: String,
    pub path: String,
    /// Assemblies only.
    pub output_file: String,
}

impl NodeRecord {
    pub fn new(id: &str, name: &str, path: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            path: path.to_string(),
            output_file: String::new(),
        }
    }

    pub fn with_output_file(mut self, output_file: &str) -> Self {
        self.output_file = output_file.to_string();
        self
    }

    /// Validate the record and fill derived columns.
    ///
    /// - an empty `Name` falls back to the file stem of `Path`
    /// - an empty `Id` is derived from `Path` (and the name, for assemblies)
    /// - an empty `OutputFile` becomes `<Name>.dll`
    pub fn into_node(self, kind: NodeKind) -> Result<Node> {
        let id = self.id.trim();
        let path = self.path.trim();
        if id.is_empty() && path.is_empty() {
            return Err(invalid("record has neither Id nor Path"));
        }

        let name = match self.name.trim() {
            "" => file_stem(path),
            name => name,
        };
        if name.is_empty() {
            return Err(invalid("record has no Name and no usable Path"));
        }

        let id = match (id, kind) {
            ("", NodeKind::Assembly) => NodeId::for_assembly(path, name),
            ("", _) => NodeId::for_path(path),
            (id, _) => NodeId::new(id),
        };

        Ok(match kind {
            NodeKind::Solution => Node::solution(id, name, path),
            NodeKind::Project => Node::project(id, name, path),
            NodeKind::Assembly => {
                let output_file = match self.output_file.trim() {
                    "" => format!("{name}.dll"),
                    output_file => output_file.to_string(),
                };
                Node::assembly(id, name, path, output_file)
            }
        })
    }
}

/// One reference row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ReferenceRecord {
    pub from_id: String,
    pub from_kind: String,
    pub from_name: String,
    pub to_id: String,
    pub to_kind: String,
    pub to_name: String,
    pub reference_type: String,
}

impl ReferenceRecord {
    pub fn new(from_id: &str, to_id: &str, reference_type: ReferenceType) -> Self {
        Self {
            from_id: from_id.to_string(),
            to_id: to_id.to_string(),
            reference_type: reference_type.to_string(),
            ..Self::default()
        }
    }

    /// Validate the record. Empty kind columns are implied by the reference
    /// type; present ones must agree with it.
    pub fn into_edge(self) -> Result<Edge> {
        let from = self.from_id.trim();
        let to = self.to_id.trim();
        if from.is_empty() || to.is_empty() {
            return Err(invalid("reference is missing FromId or ToId"));
        }

        let reference_type = ReferenceType::parse(&self.reference_type)?;
        let (from_default, to_default) = reference_type.endpoints();
        let from_kind = parse_kind(&self.from_kind, from_default)?;
        let to_kind = parse_kind(&self.to_kind, to_default)?;

        Edge::with_kinds(
            NodeId::new(from),
            from_kind,
            NodeId::new(to),
            to_kind,
            reference_type,
        )
    }
}

fn parse_kind(raw: &str, implied: NodeKind) -> Result<NodeKind> {
    if raw.trim().is_empty() {
        Ok(implied)
    } else {
        NodeKind::parse(raw)
    }
}

fn invalid(reason: &str) -> Error {
    Error::new(ErrorKind::InvalidRecord, reason)
}

/// JSON snapshot layout: one array per record family.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SnapshotFile {
    pub solutions: Vec<NodeRecord>,
    pub projects: Vec<NodeRecord>,
    pub assemblies: Vec<NodeRecord>,
    pub references: Vec<ReferenceRecord>,
}

// Snapshot

/// A row that was read but not loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRow {
    pub source: String,
    /// 1-based, header excluded.
    pub row: usize,
    pub reason: String,
}

/// What happened while loading a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub rows_read: usize,
    pub nodes: usize,
    pub edges: usize,
    /// Node rows whose id was already in the catalog.
    pub duplicate_nodes: usize,
    /// References whose (from, to) pair was already in the same graph.
    pub duplicate_edges: usize,
    pub skipped: Vec<SkippedRow>,
    /// Expected source files that were absent.
    pub missing_sources: Vec<String>,
}

impl Diagnostics {
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.missing_sources.is_empty()
    }
}

/// A loaded graph plus the diagnostics gathered while building it.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub graph: DependencyGraph,
    pub diagnostics: Diagnostics,
}

//! Typed nodes: solutions, projects and assemblies.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};
use uuid::Uuid;

use slntree_error::{Error, ErrorKind, Result};

/// Stable node identifier.
///
/// Ids come from the extraction stage. When a record carries none, one is
/// derived from the normalized path with [`NodeId::for_path`] or
/// [`NodeId::for_assembly`], so an unchanged tree reproduces identical ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Derive the id of a solution or project file.
    pub fn for_path(path: &str) -> Self {
        let key = normalize_path(path);
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes()).to_string())
    }

    /// Derive the id of the assembly a project produces.
    pub fn for_assembly(project_path: &str, assembly_name: &str) -> Self {
        let key = format!(
            "{}|{}",
            normalize_path(project_path),
            assembly_name.to_lowercase()
        );
        Self(Uuid::new_v5(&Uuid::NAMESPACE_URL, key.as_bytes()).to_string())
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Lowercase the path, use `/` as the only separator and drop trailing ones.
pub fn normalize_path(path: &str) -> String {
    let mut normalized = path.trim().replace('\\', "/").to_lowercase();
    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}

/// File name without directory or extension, accepting either separator.
pub fn file_stem(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

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
pub enum NodeKind {
    Solution,
    Project,
    Assembly,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    pub fn parse(raw: &str) -> Result<Self> {
        NodeKind::from_str(raw.trim()).map_err(|_| {
            Error::new(ErrorKind::InvalidRecord, format!("unknown node kind '{raw}'"))
                .with_operation("node::parse_kind")
        })
    }
}

/// Kind-specific node data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDetail {
    Solution,
    Project,
    Assembly {
        /// Produced file, e.g. `Contoso.Core.dll`.
        output_file: String,
    },
}

impl NodeDetail {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeDetail::Solution => NodeKind::Solution,
            NodeDetail::Project => NodeKind::Project,
            NodeDetail::Assembly { .. } => NodeKind::Assembly,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    id: NodeId,
    name: String,
    path: String,
    detail: NodeDetail,
}

impl Node {
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        path: impl Into<String>,
        detail: NodeDetail,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            path: path.into(),
            detail,
        }
    }

    pub fn solution(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::new(id.into(), name, path, NodeDetail::Solution)
    }

    pub fn project(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::new(id.into(), name, path, NodeDetail::Project)
    }

    pub fn assembly(
        id: impl Into<NodeId>,
        name: impl Into<String>,
        path: impl Into<String>,
        output_file: impl Into<String>,
    ) -> Self {
        Self::new(
            id.into(),
            name,
            path,
            NodeDetail::Assembly {
                output_file: output_file.into(),
            },
        )
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn detail(&self) -> &NodeDetail {
        &self.detail
    }

    pub fn kind(&self) -> NodeKind {
        self.detail.kind()
    }

    pub fn output_file(&self) -> Option<&str> {
        match &self.detail {
            NodeDetail::Assembly { output_file } => Some(output_file),
            _ => None,
        }
    }

    pub fn is_kind(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }
}

/// Display ordering used everywhere output is sorted: case-insensitive name,
/// then exact name, then id.
pub fn compare_display(a: &Node, b: &Node) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.id.cmp(&b.id))
}

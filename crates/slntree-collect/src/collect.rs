//! Snapshot loading from a CSV directory or a JSON file.

use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use slntree_core::{DependencyGraph, EdgeStore, NodeCatalog, NodeKind};
use slntree_error::{Error, ErrorKind, Result};

use crate::types::{Diagnostics, NodeRecord, ReferenceRecord, SkippedRow, Snapshot, SnapshotFile};

pub const SOLUTIONS_FILE: &str = "solutions.csv";
pub const PROJECTS_FILE: &str = "projects.csv";
pub const ASSEMBLIES_FILE: &str = "assemblies.csv";
pub const REFERENCES_FILE: &str = "references.csv";

const NODE_FILES: [(&str, NodeKind); 3] = [
    (SOLUTIONS_FILE, NodeKind::Solution),
    (PROJECTS_FILE, NodeKind::Project),
    (ASSEMBLIES_FILE, NodeKind::Assembly),
];

/// Load a snapshot from a directory of CSV files or from a `.json` file.
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<Snapshot> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string())
            .with_operation("collect::load_snapshot"));
    }

    if path.is_dir() {
        load_directory(path)
    } else if path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    {
        load_json(path)
    } else {
        Err(Error::unsupported(
            "snapshot must be a directory of CSV files or a .json file",
        )
        .with_operation("collect::load_snapshot")
        .with_context("path", path.display().to_string()))
    }
}

/// Load `solutions.csv`, `projects.csv`, `assemblies.csv` and
/// `references.csv` from `dir`. A missing file counts as empty.
pub fn load_directory(dir: &Path) -> Result<Snapshot> {
    let mut builder = SnapshotBuilder::default();

    for (file, kind) in NODE_FILES {
        let path = dir.join(file);
        if !path.is_file() {
            builder.missing(file);
            continue;
        }
        for (row, record) in read_csv::<NodeRecord>(&path)? {
            match record {
                Ok(record) => builder.node(file, row, record, kind),
                Err(err) => builder.skip(file, row, err),
            }
        }
    }

    let path = dir.join(REFERENCES_FILE);
    if path.is_file() {
        for (row, record) in read_csv::<ReferenceRecord>(&path)? {
            match record {
                Ok(record) => builder.reference(REFERENCES_FILE, row, record),
                Err(err) => builder.skip(REFERENCES_FILE, row, err),
            }
        }
    } else {
        builder.missing(REFERENCES_FILE);
    }

    Ok(builder.finish())
}

/// Load a snapshot serialized as a [`SnapshotFile`].
pub fn load_json(path: &Path) -> Result<Snapshot> {
    let file = File::open(path).map_err(|err| {
        Error::from(err)
            .with_operation("collect::load_json")
            .with_context("path", path.display().to_string())
    })?;
    let snapshot: SnapshotFile =
        serde_json::from_reader(BufReader::new(file)).map_err(|err| {
            Error::new(ErrorKind::DeserializationFailed, "malformed snapshot JSON")
                .with_operation("collect::load_json")
                .with_context("path", path.display().to_string())
                .set_source(err)
        })?;
    Ok(Snapshot::from_records(snapshot))
}

impl Snapshot {
    /// Build a snapshot from in-memory records.
    pub fn from_records(file: SnapshotFile) -> Self {
        let mut builder = SnapshotBuilder::default();
        let families = [
            ("solutions", NodeKind::Solution, file.solutions),
            ("projects", NodeKind::Project, file.projects),
            ("assemblies", NodeKind::Assembly, file.assemblies),
        ];
        for (source, kind, records) in families {
            for (index, record) in records.into_iter().enumerate() {
                builder.node(source, index + 1, record, kind);
            }
        }
        for (index, record) in file.references.into_iter().enumerate() {
            builder.reference("references", index + 1, record);
        }
        builder.finish()
    }
}

/// Open a CSV file and deserialize every row, keeping per-row failures.
/// Rows are numbered from 1, header excluded.
fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<Vec<(usize, Result<T>)>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|err| {
            Error::new(ErrorKind::IoFailed, "cannot open CSV file")
                .with_operation("collect::read_csv")
                .with_context("path", path.display().to_string())
                .set_source(err)
        })?;

    let rows = reader
        .deserialize::<T>()
        .enumerate()
        .map(|(index, result)| {
            let record = result.map_err(|err| {
                Error::new(ErrorKind::DeserializationFailed, err.to_string())
                    .with_operation("collect::read_csv")
            });
            (index + 1, record)
        })
        .collect();
    Ok(rows)
}

/// Accumulates records into a catalog and an edge store.
#[derive(Default)]
struct SnapshotBuilder {
    catalog: NodeCatalog,
    edges: EdgeStore,
    diagnostics: Diagnostics,
}

impl SnapshotBuilder {
    fn node(&mut self, source: &str, row: usize, record: NodeRecord, kind: NodeKind) {
        self.diagnostics.rows_read += 1;
        match record.into_node(kind) {
            Ok(node) => {
                let id = node.id().clone();
                if self.catalog.insert(node) {
                    self.diagnostics.nodes += 1;
                } else {
                    debug!(source, row, %id, "duplicate node id, keeping the first");
                    self.diagnostics.duplicate_nodes += 1;
                }
            }
            Err(err) => self.record_skip(source, row, err.message()),
        }
    }

    fn reference(&mut self, source: &str, row: usize, record: ReferenceRecord) {
        self.diagnostics.rows_read += 1;
        match record.into_edge() {
            Ok(edge) => {
                if self.edges.add_edge(edge) {
                    self.diagnostics.edges += 1;
                } else {
                    self.diagnostics.duplicate_edges += 1;
                }
            }
            Err(err) => self.record_skip(source, row, err.message()),
        }
    }

    /// A row that failed to deserialize.
    fn skip(&mut self, source: &str, row: usize, err: Error) {
        self.diagnostics.rows_read += 1;
        self.record_skip(source, row, err.message());
    }

    fn record_skip(&mut self, source: &str, row: usize, reason: impl Display) {
        let reason = reason.to_string();
        let err = Error::invalid_record(source, row, reason.as_str())
            .with_operation("collect::snapshot_builder");
        warn!(error = %err, "skipping row");
        self.diagnostics.skipped.push(SkippedRow {
            source: source.to_string(),
            row,
            reason,
        });
    }

    fn missing(&mut self, file: &str) {
        warn!(file, "snapshot file not found, treating as empty");
        self.diagnostics.missing_sources.push(file.to_string());
    }

    fn finish(self) -> Snapshot {
        let diagnostics = self.diagnostics;
        info!(
            rows = diagnostics.rows_read,
            nodes = diagnostics.nodes,
            edges = diagnostics.edges,
            skipped = diagnostics.skipped.len(),
            "snapshot loaded"
        );
        Snapshot {
            graph: DependencyGraph::new(self.catalog, self.edges),
            diagnostics,
        }
    }
}

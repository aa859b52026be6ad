//! The full text report: header, one tree per solution, orphans, footer.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{info, warn};

use slntree_core::{DependencyGraph, NodeId, NodeKind, compare_display};

use crate::options::RenderOptions;
use crate::report::{Statistics, orphans, statistics};
use crate::tree::{Annotation, RenderedTree, TreeRenderer};

const RULE_WIDTH: usize = 80;
const MAX_ROOT_HINTS: usize = 10;
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Metadata stamped at the top of a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportHeader {
    pub generated_at: DateTime<Utc>,
    pub revision: Option<String>,
}

impl ReportHeader {
    pub fn new(generated_at: DateTime<Utc>) -> Self {
        Self {
            generated_at,
            revision: None,
        }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn with_revision(mut self, revision: Option<String>) -> Self {
        self.revision = revision.filter(|r| !r.trim().is_empty());
        self
    }
}

/// A finished report.
#[derive(Debug, Clone)]
pub struct Report {
    pub lines: Vec<String>,
    pub trees: Vec<RenderedTree>,
    pub orphans: Vec<NodeId>,
    pub statistics: Statistics,
}

impl Report {
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Result of [`render_report`].
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    Rendered(Report),
    /// The edge store is empty.
    NothingToRender,
    /// The root filter matched no solution.
    NoRootMatched {
        filter: String,
        /// Up to ten solution names, sorted.
        available: Vec<String>,
    },
}

impl RenderOutcome {
    /// Human-readable summary, suitable for stderr.
    pub fn message(&self) -> String {
        match self {
            RenderOutcome::Rendered(report) => {
                format!("rendered {} dependency tree(s)", report.trees.len())
            }
            RenderOutcome::NothingToRender => {
                "no references found in the snapshot, nothing to render".to_string()
            }
            RenderOutcome::NoRootMatched { filter, available } if available.is_empty() => {
                format!("no solution named '{filter}', and the snapshot has no solutions")
            }
            RenderOutcome::NoRootMatched { filter, available } => {
                format!(
                    "no solution named '{filter}'. Available solutions: {}",
                    available.join(", ")
                )
            }
        }
    }
}

/// Render every solution (or the one named by the root filter) into a report.
pub fn render_report(
    graph: &DependencyGraph,
    options: &RenderOptions,
    header: &ReportHeader,
) -> RenderOutcome {
    if graph.edges().is_empty() {
        warn!("edge store is empty");
        return RenderOutcome::NothingToRender;
    }

    let all_roots = graph.roots();
    let roots = match options.root_filter.as_deref() {
        Some(filter) => {
            let mut matched = graph.catalog().find_by_name(NodeKind::Solution, filter);
            matched.sort_by(|a, b| compare_display(a, b));
            matched
        }
        None => all_roots.clone(),
    };

    if roots.is_empty()
        && let Some(filter) = options.root_filter.clone()
    {
        let available = all_roots
            .iter()
            .take(MAX_ROOT_HINTS)
            .map(|root| root.name().to_string())
            .collect();
        return RenderOutcome::NoRootMatched { filter, available };
    }

    let renderer = TreeRenderer::new(graph, options);
    let trees: Vec<RenderedTree> = roots
        .par_iter()
        .filter_map(|root| renderer.render(root.id().as_str()))
        .collect();

    let orphan_nodes = orphans(graph.catalog(), graph.edges());
    let statistics = statistics(graph, &trees, orphan_nodes.len());

    let mut lines = header_lines(options, header, &statistics);
    for tree in &trees {
        lines.push(String::new());
        lines.push(rule());
        lines.push(format!("Solution: {}", tree.root_name));
        lines.push(format!("Path: {}", tree.root_path));
        lines.push(rule());
        lines.extend(tree.lines.iter().cloned());
    }

    lines.push(String::new());
    lines.extend(banner(&format!("ORPHANED PROJECTS ({})", orphan_nodes.len())));
    if orphan_nodes.is_empty() {
        lines.push("  (none)".to_string());
    }
    for node in &orphan_nodes {
        lines.push(format!("  - {} ({})", node.name(), node.path()));
    }

    lines.push(String::new());
    lines.extend(banner("STATISTICS"));
    lines.extend(statistics.lines());

    info!(
        trees = trees.len(),
        orphans = orphan_nodes.len(),
        lines = lines.len(),
        "report rendered"
    );

    RenderOutcome::Rendered(Report {
        lines,
        trees,
        orphans: orphan_nodes.iter().map(|node| node.id().clone()).collect(),
        statistics,
    })
}

fn header_lines(
    options: &RenderOptions,
    header: &ReportHeader,
    statistics: &Statistics,
) -> Vec<String> {
    let mut lines = banner("SOLUTION DEPENDENCY TREES");
    lines.push(format!(
        "Generated: {}",
        header.generated_at.format(TIMESTAMP_FORMAT)
    ));
    if let Some(revision) = &header.revision {
        lines.push(format!("Revision: {revision}"));
    }

    lines.push(String::new());
    for (kind, count) in &statistics.nodes_by_kind {
        lines.push(format!("{kind} nodes: {count}"));
    }
    for (reference_type, count) in &statistics.edges_by_type {
        lines.push(format!("{reference_type} references: {count}"));
    }

    lines.push(String::new());
    lines.push(format!("Max depth: {}", options.max_depth));
    lines.push(format!(
        "Assembly dependencies: {}",
        if options.include_assembly_dependencies {
            "included"
        } else {
            "excluded"
        }
    ));
    if let Some(filter) = &options.root_filter {
        lines.push(format!("Root filter: {filter}"));
    }

    lines.push(String::new());
    lines.push("Legend:".to_string());
    for (annotation, meaning) in [
        (Annotation::BackReference, "already expanded earlier in this tree"),
        (Annotation::Deferred, "expanded at a shallower depth elsewhere in this tree"),
        (Annotation::Circular, "circular reference back to an ancestor"),
        (Annotation::MaxDepth, "children hidden by the depth limit"),
    ] {
        lines.push(format!("  {:<20} {meaning}", annotation.marker()));
    }
    lines
}

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn banner(title: &str) -> Vec<String> {
    vec![rule(), title.to_string(), rule()]
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use slntree_core::{EdgeStore, Node, NodeCatalog, ReferenceType};

    use super::*;

    fn header() -> ReportHeader {
        ReportHeader::new(Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 5).unwrap())
    }

    fn graph() -> DependencyGraph {
        let mut catalog = NodeCatalog::new();
        catalog.insert(Node::solution("s2", "Zeta", "/zeta/Zeta.sln"));
        catalog.insert(Node::solution("s1", "Alpha", "/alpha/Alpha.sln"));
        catalog.insert(Node::project("a", "Core", "/alpha/Core.csproj"));
        catalog.insert(Node::project("b", "Web", "/zeta/Web.csproj"));
        catalog.insert(Node::project("c", "Legacy", "/old/Legacy.csproj"));
        let mut edges = EdgeStore::new();
        edges.add("s1", "a", ReferenceType::SolutionToProject);
        edges.add("s2", "b", ReferenceType::SolutionToProject);
        edges.add("b", "a", ReferenceType::ProjectToProject);
        DependencyGraph::new(catalog, edges)
    }

    fn rendered(outcome: RenderOutcome) -> Report {
        match outcome {
            RenderOutcome::Rendered(report) => report,
            other => panic!("expected a report, got {other:?}"),
        }
    }

    #[test]
    fn test_trees_sorted_by_solution_name() {
        let report = rendered(render_report(&graph(), &RenderOptions::new(), &header()));
        let names: Vec<_> = report.trees.iter().map(|t| t.root_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
        assert_eq!(report.trees[1].lines, vec!["Zeta", "+-- Web", "    +-- Core"]);
    }

    #[test]
    fn test_header_and_orphans() {
        let header = header().with_revision(Some("r42".into()));
        let report = rendered(render_report(&graph(), &RenderOptions::new(), &header));
        assert_eq!(report.lines[1], "SOLUTION DEPENDENCY TREES");
        assert_eq!(report.lines[3], "Generated: 2024-03-01 12:30:05 UTC");
        assert_eq!(report.lines[4], "Revision: r42");
        assert_eq!(report.orphans, vec![NodeId::new("c")]);

        let text = report.to_text();
        assert!(text.contains("ORPHANED PROJECTS (1)\n"));
        assert!(text.contains("  - Legacy (/old/Legacy.csproj)"));
        assert!(text.contains("Solution: Alpha\nPath: /alpha/Alpha.sln"));
    }

    #[test]
    fn test_blank_revision_is_dropped() {
        let header = header().with_revision(Some("  ".into()));
        assert_eq!(header.revision, None);
    }

    #[test]
    fn test_root_filter() {
        let options = RenderOptions::new().with_root_filter(Some("Zeta".into()));
        let report = rendered(render_report(&graph(), &options, &header()));
        assert_eq!(report.trees.len(), 1);
        assert_eq!(report.trees[0].root_name, "Zeta");
        assert_eq!(report.statistics.unreached_projects, 1);
    }

    #[test]
    fn test_root_filter_keeps_every_same_named_solution() {
        let mut catalog = NodeCatalog::new();
        catalog.insert(Node::solution("s9", "Zeta", "/new/Zeta.sln"));
        catalog.insert(Node::solution("s1", "Zeta", "/old/Zeta.sln"));
        catalog.insert(Node::solution("s5", "Alpha", "/Alpha.sln"));
        let mut edges = EdgeStore::new();
        edges.add("s9", "p", ReferenceType::SolutionToProject);
        let graph = DependencyGraph::new(catalog, edges);

        let options = RenderOptions::new().with_root_filter(Some("Zeta".into()));
        let report = rendered(render_report(&graph, &options, &header()));
        let paths: Vec<_> = report.trees.iter().map(|t| t.root_path.as_str()).collect();
        assert_eq!(paths, vec!["/old/Zeta.sln", "/new/Zeta.sln"]);
    }

    #[test]
    fn test_root_filter_without_match_lists_hints() {
        let options = RenderOptions::new().with_root_filter(Some("zeta".into()));
        match render_report(&graph(), &options, &header()) {
            RenderOutcome::NoRootMatched { filter, available } => {
                assert_eq!(filter, "zeta");
                assert_eq!(available, vec!["Alpha", "Zeta"]);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_hints_are_capped() {
        let mut catalog = NodeCatalog::new();
        let mut edges = EdgeStore::new();
        for i in 0..15 {
            let id = format!("s{i:02}");
            catalog.insert(Node::solution(id.as_str(), format!("S{i:02}"), "/s.sln"));
            edges.add(id.as_str(), "p", ReferenceType::SolutionToProject);
        }
        let graph = DependencyGraph::new(catalog, edges);
        let options = RenderOptions::new().with_root_filter(Some("missing".into()));
        match render_report(&graph, &options, &header()) {
            RenderOutcome::NoRootMatched { available, .. } => {
                assert_eq!(available.len(), 10);
                assert_eq!(available[0], "S00");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn test_no_edges_means_nothing_to_render() {
        let mut catalog = NodeCatalog::new();
        catalog.insert(Node::solution("s", "Lonely", "/Lonely.sln"));
        let graph = DependencyGraph::new(catalog, EdgeStore::new());
        let outcome = render_report(&graph, &RenderOptions::new(), &header());
        assert!(matches!(outcome, RenderOutcome::NothingToRender));
        assert!(outcome.message().contains("nothing to render"));
    }
}

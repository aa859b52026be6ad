use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

use slntree_core::{DependencyGraph, EdgeStore, Node, NodeCatalog, ReferenceType};
use slntree_render::{RenderOptions, RenderOutcome, Report, ReportHeader, render_report};

fn shop() -> DependencyGraph {
    let mut catalog = NodeCatalog::new();
    catalog.insert(Node::solution("s1", "Shop", "/shop/Shop.sln"));
    catalog.insert(Node::solution("s2", "Admin", "/admin/Admin.sln"));
    catalog.insert(Node::project("w", "Web", "/shop/Web.csproj"));
    catalog.insert(Node::project("c", "Core", "/shop/Core.csproj"));
    catalog.insert(Node::project("d", "Data", "/shop/Data.csproj"));
    catalog.insert(Node::project("l", "Legacy", "/old/Legacy.csproj"));
    catalog.insert(Node::assembly("wa", "Web", "/shop/Web.csproj", "Web.dll"));
    catalog.insert(Node::assembly(
        "nj",
        "Newtonsoft.Json",
        "",
        "Newtonsoft.Json.dll",
    ));

    let mut edges = EdgeStore::new();
    edges.add("s1", "w", ReferenceType::SolutionToProject);
    edges.add("s1", "c", ReferenceType::SolutionToProject);
    edges.add("s2", "c", ReferenceType::SolutionToProject);
    edges.add("w", "c", ReferenceType::ProjectToProject);
    edges.add("c", "d", ReferenceType::ProjectToProject);
    edges.add("wa", "nj", ReferenceType::AssemblyToAssembly);
    DependencyGraph::new(catalog, edges)
}

fn header() -> ReportHeader {
    ReportHeader::new(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap())
}

fn report(options: &RenderOptions) -> Report {
    match render_report(&shop(), options, &header()) {
        RenderOutcome::Rendered(report) => report,
        other => panic!("expected a rendered report, got {other:?}"),
    }
}

fn lines_from<'a>(report: &'a Report, marker: &str) -> Vec<&'a str> {
    let start = report
        .lines
        .iter()
        .position(|line| line == marker)
        .unwrap_or_else(|| panic!("no line '{marker}' in report"));
    report.lines[start..].iter().map(String::as_str).collect()
}

#[test]
fn full_report_body() {
    let report = report(&RenderOptions::new());
    let rule = "=".repeat(80);
    let rule = rule.as_str();

    assert_eq!(
        lines_from(&report, "Solution: Admin"),
        vec![
            "Solution: Admin",
            "Path: /admin/Admin.sln",
            rule,
            "Admin",
            "+-- Core",
            "    +-- Data",
            "",
            rule,
            "Solution: Shop",
            "Path: /shop/Shop.sln",
            rule,
            "Shop",
            "|-- Core",
            "|   +-- Data",
            "+-- Web",
            "    |-- [assembly] Web.dll",
            "    |   +-- Newtonsoft.Json",
            "    +-- Core *",
            "",
            rule,
            "ORPHANED PROJECTS (2)",
            rule,
            "  - Data (/shop/Data.csproj)",
            "  - Legacy (/old/Legacy.csproj)",
            "",
            rule,
            "STATISTICS",
            rule,
            "Solution-to-Project references: 3",
            "Project-to-Project references: 2",
            "Assembly-to-Assembly references: 1",
            "Total references: 6",
            "Orphaned projects: 2",
            "Projects unreachable from rendered solutions: 1",
            "Trees rendered: 2",
            "Expanded nodes: 9",
            "Back-references (*): 1",
            "Deferred to shallower occurrence (...): 0",
            "Circular references: 0",
            "Truncated at max depth: 0",
            "Assembly sub-trees: 1",
            "Skipped references to unknown nodes: 0",
        ]
    );
}

#[test]
fn header_lists_counts_and_settings() {
    let report = report(&RenderOptions::new().with_max_depth(1));
    let header: Vec<_> = report.lines[3..14].iter().map(String::as_str).collect();
    assert_eq!(
        header,
        vec![
            "Generated: 2024-05-06 07:08:09 UTC",
            "",
            "Solution nodes: 2",
            "Project nodes: 4",
            "Assembly nodes: 2",
            "Solution-to-Project references: 3",
            "Project-to-Project references: 2",
            "Assembly-to-Assembly references: 1",
            "",
            "Max depth: 1",
            "Assembly dependencies: included",
        ]
    );
    assert!(report.lines.iter().any(|line| line.starts_with("  [*CIRCULAR*]")));
}

#[test]
fn depth_limit_applies_per_tree() {
    let options = RenderOptions::new()
        .with_max_depth(1)
        .with_assembly_dependencies(false)
        .with_root_filter(Some("Shop".into()));
    let report = report(&options);

    assert_eq!(report.trees.len(), 1);
    assert_eq!(
        report.trees[0].lines,
        vec!["Shop", "|-- Core [MAX DEPTH REACHED]", "+-- Web [MAX DEPTH REACHED]"]
    );
    assert_eq!(report.statistics.render.truncated, 2);
    assert!(report.to_text().contains("Assembly dependencies: excluded"));
    assert!(report.to_text().contains("Root filter: Shop"));
}

#[test]
fn orphan_listed_once_despite_many_project_references() {
    let mut catalog = NodeCatalog::new();
    catalog.insert(Node::solution("s", "Suite", "/Suite.sln"));
    for id in ["a", "b", "c", "p"] {
        catalog.insert(Node::project(id, id.to_uppercase(), format!("/{id}.csproj")));
    }
    let mut edges = EdgeStore::new();
    for id in ["a", "b", "c"] {
        edges.add("s", id, ReferenceType::SolutionToProject);
        edges.add(id, "p", ReferenceType::ProjectToProject);
    }
    let graph = DependencyGraph::new(catalog, edges);

    let RenderOutcome::Rendered(report) =
        render_report(&graph, &RenderOptions::new(), &header())
    else {
        panic!("expected a rendered report");
    };
    assert_eq!(report.orphans.len(), 1);
    assert_eq!(report.orphans[0].as_str(), "p");
    assert_eq!(
        report.lines.iter().filter(|line| line.as_str() == "  - P (/p.csproj)").count(),
        1
    );
}

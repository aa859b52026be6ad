use std::fs;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;

use slntree::{FileConfig, RenderArgs, SlntreeOptions, build_report, write_report};
use slntree_render::RenderOutcome;

fn write_snapshot(dir: &Path) {
    fs::write(
        dir.join("solutions.csv"),
        "Id,Name,Path\ns1,Shop,/shop/Shop.sln\ns2,Tools,/tools/Tools.sln\n",
    )
    .unwrap();
    fs::write(
        dir.join("projects.csv"),
        "Id,Name,Path\nw,Web,/shop/Web.csproj\nc,Core,/shop/Core.csproj\n",
    )
    .unwrap();
    fs::write(
        dir.join("references.csv"),
        "FromId,ToId,ReferenceType\n\
         s1,w,Solution-to-Project\n\
         w,c,Project-to-Project\n\
         c,w,Project-to-Project\n",
    )
    .unwrap();
}

fn options(input: &Path, args: RenderArgs, config: &FileConfig) -> SlntreeOptions {
    SlntreeOptions {
        input: input.to_path_buf(),
        output: None,
        render: args.resolve(config),
        revision: args.resolve_revision(config),
    }
}

#[test]
fn report_written_to_output_file() {
    let dir = TempDir::new().unwrap();
    write_snapshot(dir.path());
    let opts = options(dir.path(), RenderArgs::new(), &FileConfig::default());

    let RenderOutcome::Rendered(report) = build_report(&opts).unwrap() else {
        panic!("expected a rendered report");
    };
    let out = dir.path().join("tree.txt");
    write_report(&report, Some(&out)).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.ends_with("Skipped references to unknown nodes: 0\n"));
    let shop: Vec<_> = text
        .lines()
        .skip_while(|line| *line != "Shop")
        .take(4)
        .collect();
    assert_eq!(
        shop,
        vec!["Shop", "+-- Web", "    +-- Core", "        +-- Web [*CIRCULAR*]"]
    );
    assert!(text.contains("Solution: Tools"));
}

#[test]
fn config_file_settings_apply_under_flags() {
    let dir = TempDir::new().unwrap();
    write_snapshot(dir.path());
    let config_path = dir.path().join("slntree.toml");
    fs::write(&config_path, "max_depth = 1\nroot = \"Shop\"\nrevision = \"abc123\"\n").unwrap();
    let config = FileConfig::from_file(&config_path).unwrap();

    let opts = options(dir.path(), RenderArgs::new(), &config);
    let RenderOutcome::Rendered(report) = build_report(&opts).unwrap() else {
        panic!("expected a rendered report");
    };
    assert_eq!(report.trees.len(), 1);
    assert_eq!(
        report.trees[0].lines,
        vec!["Shop", "+-- Web [MAX DEPTH REACHED]"]
    );
    assert!(report.lines.contains(&"Revision: abc123".to_string()));

    let args = RenderArgs::new().with_max_depth(Some(2));
    let RenderOutcome::Rendered(report) = build_report(&options(dir.path(), args, &config)).unwrap()
    else {
        panic!("expected a rendered report");
    };
    assert_eq!(
        report.trees[0].lines,
        vec!["Shop", "+-- Web", "    +-- Core [MAX DEPTH REACHED]"]
    );
}

#[test]
fn unmatched_root_lists_available_solutions() {
    let dir = TempDir::new().unwrap();
    write_snapshot(dir.path());
    let args = RenderArgs::new().with_root(Some("Missing".into()));
    let outcome = build_report(&options(dir.path(), args, &FileConfig::default())).unwrap();
    assert_eq!(
        outcome.message(),
        "no solution named 'Missing'. Available solutions: Shop, Tools"
    );
}

#[test]
fn snapshot_without_references_renders_nothing() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("solutions.csv"), "Id,Name,Path\ns,Lonely,/l.sln\n").unwrap();
    let opts = options(dir.path(), RenderArgs::new(), &FileConfig::default());
    assert!(matches!(
        build_report(&opts).unwrap(),
        RenderOutcome::NothingToRender
    ));
}

#[test]
fn missing_input_is_an_error() {
    let dir = TempDir::new().unwrap();
    let opts = options(
        &dir.path().join("absent"),
        RenderArgs::new(),
        &FileConfig::default(),
    );
    let err = build_report(&opts).unwrap_err();
    assert!(err.to_string().contains("Failed to load snapshot"));
}

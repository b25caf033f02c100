use pydeps::report::{Filter, RenderOptions, classify, render, render_collected};
use pydeps::{aggregate, collect, stdlib};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn run(
    selectors: &[String],
    keep_subpackages: bool,
    filter: Filter,
    show_globs: bool,
) -> String {
    let rules = [];
    let index = aggregate::aggregate(selectors, &rules, keep_subpackages).unwrap();
    let catalog = stdlib::catalog_for("3.11").unwrap();
    let entries = classify(index, &catalog);
    let options = RenderOptions {
        filter,
        show_globs,
        porcelain: false,
        max_show: 0,
        total_globs: selectors.len(),
    };
    let mut out = Vec::new();
    render(&mut out, &entries, &options).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn stdlib_only_sources_report_no_third_party_deps() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "app.py",
        "import sys\nfrom collections import OrderedDict\n",
    );
    let selectors = [dir.path().to_string_lossy().to_string()];

    let text = run(&selectors, false, Filter::ThirdParty, false);
    assert_eq!(text, "");

    let text = run(&selectors, false, Filter::All, false);
    assert_eq!(
        text,
        "collections is needed by 1 of the 1 input globs.\nsys is needed by 1 of the 1 input globs.\n"
    );
}

#[test]
fn third_party_imports_are_reported_by_default() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.py", "import requests\nimport os\n");
    let selectors = [dir.path().to_string_lossy().to_string()];

    let text = run(&selectors, false, Filter::ThirdParty, false);
    assert_eq!(text, "requests is needed by 1 of the 1 input globs.\n");
}

#[test]
fn subpackages_collapse_unless_kept() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.py", "import os\nimport os.path\n");
    let selectors = [dir.path().to_string_lossy().to_string()];

    let collapsed = run(&selectors, false, Filter::All, false);
    assert_eq!(collapsed, "os is needed by 1 of the 1 input globs.\n");

    let kept = run(&selectors, true, Filter::All, false);
    assert_eq!(
        kept,
        "os is needed by 1 of the 1 input globs.\nos.path is needed by 1 of the 1 input globs.\n"
    );
}

#[test]
fn selector_sets_union_across_globs() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a/one.py", "import requests\n");
    write(dir.path(), "b/two.py", "import requests\n");
    let selectors = [
        dir.path().join("a").to_string_lossy().to_string(),
        dir.path().join("b").to_string_lossy().to_string(),
    ];

    let text = run(&selectors, false, Filter::ThirdParty, false);
    assert_eq!(text, "requests is needed by 2 of the 2 input globs.\n");

    let text = run(&selectors, false, Filter::ThirdParty, true);
    assert_eq!(
        text,
        format!(
            "requests is needed by 2 of the 2 input globs, including {}, {}.\n",
            selectors[0], selectors[1]
        )
    );
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "app.py", "import flask\nimport os.path\nimport sys\n");
    write(dir.path(), "pkg/util.py", "from flask import request\n");
    let selectors = [dir.path().to_string_lossy().to_string()];

    let first = run(&selectors, false, Filter::All, true);
    let second = run(&selectors, false, Filter::All, true);
    assert_eq!(first, second);
}

#[test]
fn selector_matching_nothing_yields_an_empty_index() {
    let dir = TempDir::new().unwrap();
    let selectors = [dir.path().join("gone.py").to_string_lossy().to_string()];
    let rules = [];
    let index = aggregate::aggregate(&selectors, &rules, false).unwrap();
    assert!(index.is_empty());
}

#[test]
fn unparsable_source_is_fatal() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.py", "def broken(:\n");
    let selectors = [dir.path().to_string_lossy().to_string()];
    let rules = [];
    assert!(aggregate::aggregate(&selectors, &rules, false).is_err());
}

#[test]
fn invalid_version_exits_one_with_diagnostic() {
    let out = std::process::Command::new(env!("CARGO_BIN_EXE_pydeps"))
        .args(["--python-version", "9.9", "whatever/*.py"])
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("9.9"));
    assert!(text.contains("3.13"));
}

#[test]
fn collect_only_listing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a.py", "");
    write(dir.path(), "b.py", "");
    write(dir.path(), "sub/c.py", "");
    let rules = [];
    let files: Vec<_> = collect::collect(dir.path().to_str().unwrap(), &rules)
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let mut out = Vec::new();
    render_collected(&mut out, &files).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Collected 3 files:\n"));
    assert_eq!(text.lines().count(), 4);
    assert!(text.lines().skip(1).all(|line| line.starts_with('\t')));
}

// Planning scenarios over real temporary directory trees

use buildsweep::core::diagnostics::Diagnostics;
use buildsweep::core::planner::plan;
use buildsweep::core::request::{RemovalRequest, TestEntry};
use buildsweep::core::scanner::DirectoryScanner;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "content").unwrap();
}

#[test]
fn test_directory_swallows_its_children() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("styles/css")).unwrap();
    touch(&root.join("manifest.json"));

    let request = RemovalRequest::new(root)
        .include("styles/css")
        .include("styles")
        .include("manifest.json");
    let items = plan(&request, &mut Diagnostics::new()).unwrap();

    assert_eq!(items.directories, vec![root.join("styles")]);
    assert_eq!(items.files, vec![root.join("manifest.json")]);
}

#[test]
fn test_excluded_file_is_not_reported_missing() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(&root.join("a.txt"));
    let a = root.join("a.txt").to_string_lossy().to_string();

    let mut diagnostics = Diagnostics::new();
    let items = plan(
        &RemovalRequest::new(root).include(a.clone()).exclude(a),
        &mut diagnostics,
    )
    .unwrap();

    assert!(items.is_empty());
    assert!(diagnostics.warnings.is_empty());
}

#[test]
fn test_predicate_scan_selects_source_maps() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(&root.join("x.map"));
    touch(&root.join("sub/y.map"));
    touch(&root.join("z.txt"));

    let found = DirectoryScanner::new(root, true).scan(
        |path| path.to_string_lossy().ends_with(".map"),
        &mut Diagnostics::new(),
    );

    assert_eq!(found.len(), 2);
    assert!(found.contains(&root.join("x.map")));
    assert!(found.contains(&root.join("sub/y.map")));
    assert!(!found.contains(&root.join("z.txt")));
}

#[test]
fn test_root_test_folder_feeds_the_plan() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(&root.join("x.map"));
    touch(&root.join("sub/y.map"));
    touch(&root.join("z.txt"));

    let root_str = root.to_string_lossy().to_string();
    let request = RemovalRequest::new(root).test(TestEntry::new(
        root_str,
        |path| path.to_string_lossy().ends_with(".map"),
        true,
    ));
    let mut diagnostics = Diagnostics::new();
    let items = plan(&request, &mut diagnostics).unwrap();

    assert_eq!(items.files, vec![root.join("x.map"), root.join("sub/y.map")]);
    assert!(items.directories.is_empty());
    assert!(diagnostics.is_empty());
}

#[test]
fn test_root_cannot_remove_itself() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    let mut diagnostics = Diagnostics::new();
    let items = plan(
        &RemovalRequest::new(root).include(root.to_string_lossy().to_string()),
        &mut diagnostics,
    )
    .unwrap();

    assert!(items.is_empty());
    assert_eq!(diagnostics.warnings.len(), 1);
}

#[test]
fn test_excluded_paths_never_survive() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(&root.join("dist/app.js"));
    touch(&root.join("dist/app.js.map"));
    touch(&root.join("dist/vendor.js.map"));

    let request = RemovalRequest::new(root)
        .test(TestEntry::new(
            "dist",
            |path| path.to_string_lossy().ends_with(".map"),
            true,
        ))
        .exclude("dist/vendor.js.map")
        .exclude("./dist\\app.js");
    let items = plan(&request, &mut Diagnostics::new()).unwrap();

    assert_eq!(items.files, vec![root.join("dist/app.js.map")]);
    assert!(!items.iter().any(|p| p == &root.join("dist/vendor.js.map")));
}

#[test]
fn test_scanned_files_under_included_directory_collapse() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(&root.join("build/a/one.tmp"));
    touch(&root.join("build/b/two.tmp"));
    touch(&root.join("keep/three.tmp"));

    let request = RemovalRequest::new(root)
        .include("build")
        .test(TestEntry::new(".", |_| true, true))
        .test(TestEntry::new("build", |_| true, true))
        .test(TestEntry::new("keep", |_| true, false));
    let mut diagnostics = Diagnostics::new();
    let items = plan(&request, &mut diagnostics).unwrap();

    assert_eq!(items.directories, vec![root.join("build")]);
    assert_eq!(items.files, vec![root.join("keep/three.tmp")]);
    assert!(diagnostics.is_empty());
}

#[test]
fn test_same_config_plans_the_same_set() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    touch(&root.join("dist/a.js"));
    touch(&root.join("dist/b/c.js"));
    touch(&root.join("report.html"));

    let request = RemovalRequest::new(root)
        .include("report.html")
        .test(TestEntry::new("dist", |_| true, true));

    let first = plan(&request, &mut Diagnostics::new()).unwrap();
    let second = plan(&request, &mut Diagnostics::new()).unwrap();
    assert!(first.same_set(&second));
    assert_eq!(first.len(), 3);
}

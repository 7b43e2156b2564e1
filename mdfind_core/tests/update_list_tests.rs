//! Integration tests for rebuild detection

use mdfind_core::error::{IoError, IoErrorKind};
use mdfind_core::{
    CollectingSink, Diagnostic, Error, RebuildPair, StalenessConfig, TraversalConfig, Verbosity,
    compute_update_list, compute_update_list_with,
};
use mdfind_test_utils::{TestTree, TreeBuilder, set_mtime};
use std::path::PathBuf;

fn update_list(tree: &TestTree, recursive: bool) -> Vec<RebuildPair> {
    compute_update_list(
        Some(tree.source_dir().as_path()),
        Some(tree.dest_dir().as_path()),
        None,
        None,
        recursive,
        0,
    )
    .unwrap()
}

#[test]
fn test_empty_destination_rebuilds_everything() {
    let tree = TreeBuilder::new()
        .with_sources(&["b.md", "a.md"])
        .build()
        .unwrap();

    let pairs = update_list(&tree, false);

    assert_eq!(
        pairs,
        vec![
            RebuildPair::new(tree.source("a.md"), tree.output("a.html")),
            RebuildPair::new(tree.source("b.md"), tree.output("b.html")),
        ]
    );
}

#[test]
fn test_newer_output_is_skipped() {
    let tree = TreeBuilder::new()
        .with_source("a.md", 1_000)
        .with_source("b.md", 1_000)
        .with_output("a.html", 2_000)
        .build()
        .unwrap();

    let pairs = update_list(&tree, false);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].source(), tree.source("b.md"));
}

#[test]
fn test_older_output_is_rebuilt() {
    let tree = TreeBuilder::new()
        .with_source("a.md", 2_000)
        .with_output("a.html", 1_000)
        .build()
        .unwrap();

    let pairs = update_list(&tree, false);

    assert_eq!(
        pairs,
        vec![RebuildPair::new(tree.source("a.md"), tree.output("a.html"))]
    );
}

#[test]
fn test_equal_timestamps_are_not_rebuilt() {
    let tree = TreeBuilder::new()
        .with_source("a.md", 1_500)
        .with_output("a.html", 1_500)
        .build()
        .unwrap();

    assert!(update_list(&tree, false).is_empty());
}

#[test]
fn test_second_run_after_build_is_empty() {
    let tree = TreeBuilder::new()
        .with_source("a.md", 1_000)
        .with_source("guide/b.md", 1_000)
        .build()
        .unwrap();

    let first = update_list(&tree, true);
    assert_eq!(first.len(), 2);

    // Simulate the conversion step writing every output
    for pair in &first {
        let relative = pair.destination().strip_prefix(tree.dest_dir()).unwrap();
        tree.render(relative.to_str().unwrap(), 1_000).unwrap();
    }

    assert!(update_list(&tree, true).is_empty());
}

#[test]
fn test_touching_a_source_schedules_only_that_source() {
    let tree = TreeBuilder::new()
        .with_source("a.md", 1_000)
        .with_source("b.md", 1_000)
        .with_output("a.html", 1_000)
        .with_output("b.html", 1_000)
        .build()
        .unwrap();
    assert!(update_list(&tree, false).is_empty());

    set_mtime(&tree.source("b.md"), 5_000).unwrap();

    let pairs = update_list(&tree, false);
    assert_eq!(
        pairs,
        vec![RebuildPair::new(tree.source("b.md"), tree.output("b.html"))]
    );
}

#[test]
fn test_recursive_mirrors_directory_structure() {
    let tree = TreeBuilder::new()
        .with_sources(&["index.md", "guide/intro.md", "guide/api/calls.md"])
        .build()
        .unwrap();

    let pairs = update_list(&tree, true);
    let outputs: Vec<_> = pairs.iter().map(|p| p.destination().to_path_buf()).collect();

    assert_eq!(
        outputs,
        vec![
            tree.output("guide/api/calls.html"),
            tree.output("guide/intro.html"),
            tree.output("index.html"),
        ]
    );
}

#[test]
fn test_non_recursive_ignores_nested_sources() {
    let tree = TreeBuilder::new()
        .with_sources(&["index.md", "guide/intro.md"])
        .build()
        .unwrap();

    let pairs = update_list(&tree, false);

    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].destination(), tree.output("index.html"));
}

#[test]
fn test_without_destination_outputs_sit_beside_sources() {
    let tree = TreeBuilder::new()
        .with_source("a.md", 1_000)
        .with_source("b.md", 1_000)
        .build()
        .unwrap();
    let src = tree.source_dir();
    mdfind_test_utils::write_file_at(&src.join("b.html"), 2_000).unwrap();

    let pairs = compute_update_list(Some(src.as_path()), None, None, None, false, 0).unwrap();

    assert_eq!(
        pairs,
        vec![RebuildPair::new(src.join("a.md"), src.join("a.html"))]
    );
}

#[test]
fn test_custom_pattern_and_extension() {
    let tree = TreeBuilder::new()
        .with_sources(&["a.markdown", "b.md", "c.txt"])
        .build()
        .unwrap();

    let pairs = compute_update_list(
        Some(tree.source_dir().as_path()),
        Some(tree.dest_dir().as_path()),
        Some("*.{md,markdown}"),
        Some(".xhtml"),
        false,
        0,
    )
    .unwrap();

    let outputs: Vec<_> = pairs.iter().map(|p| p.destination().to_path_buf()).collect();
    assert_eq!(
        outputs,
        vec![tree.output("a.xhtml"), tree.output("b.xhtml")]
    );
}

#[test]
fn test_missing_destination_root_is_fatal() {
    let tree = TreeBuilder::new().with_sources(&["a.md"]).build().unwrap();
    let missing = tree.root().join("public");

    let err = compute_update_list(
        Some(tree.source_dir().as_path()),
        Some(missing.as_path()),
        None,
        None,
        false,
        0,
    )
    .unwrap_err();

    match err {
        Error::Io(IoError {
            kind: IoErrorKind::NotFound,
            path,
            ..
        }) => assert_eq!(path, Some(missing)),
        other => panic!("Expected not found error, got {other:?}"),
    }
}

#[test]
fn test_invalid_pattern_is_reported_before_roots() {
    let err = compute_update_list(
        Some(PathBuf::from("/nope/src").as_path()),
        Some(PathBuf::from("/nope/site").as_path()),
        Some("*.{md"),
        None,
        false,
        0,
    )
    .unwrap_err();

    assert!(err.is_pattern_error());
}

#[test]
fn test_detailed_diagnostics_list_destinations() {
    let tree = TreeBuilder::new()
        .with_source("a.md", 1_000)
        .with_source("b.md", 1_000)
        .with_output("b.html", 2_000)
        .build()
        .unwrap();
    let src = tree.source_dir();
    let sink = CollectingSink::new();

    compute_update_list_with(
        &TraversalConfig::new()
            .with_root(&src)
            .with_verbosity(Verbosity::Detailed),
        &StalenessConfig::new()
            .with_source_root(Some(src.as_path()))
            .with_dest_root(Some(tree.dest_dir().as_path())),
        &sink,
    )
    .unwrap();

    let events = sink.events();
    assert!(events.contains(&Diagnostic::Candidate(tree.output("a.html"))));
    assert!(!events.contains(&Diagnostic::Candidate(tree.output("b.html"))));
    assert_eq!(
        events.last(),
        Some(&Diagnostic::UpdateList(vec![tree.output("a.html")]))
    );
}

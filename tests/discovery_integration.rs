//! Integration tests for namespace discovery over real filesystem trees.

use anyhow::Result;
use graft::config::{write_default_config, ConfigLoader, ScanConfig};
use graft::discovery::Scanner;
use graft::entity::EntityFilter;
use graft::namespace::Namespace;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_merge_scenario_dual_location() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("Shapes").join("WORKINPROGRESS"))?;
    fs::write(root.join("Shapes").join("Circle.src"), "implemented circle")?;
    fs::write(
        root.join("Shapes").join("WORKINPROGRESS").join("Circle.src"),
        "stub circle",
    )?;

    let ns = Scanner::new().discover_for_merge(root, "Shapes")?;

    let circles = ns.entities_named("Circle", EntityFilter::Any);
    assert_eq!(circles.len(), 2);
    assert_eq!(circles.iter().filter(|e| e.is_stub()).count(), 1);
    assert_eq!(circles.iter().filter(|e| !e.is_stub()).count(), 1);
    assert!(ns.contains_entity_named("Circle", EntityFilter::Any));
    assert!(!ns.contains_entity_named("Square", EntityFilter::Any));
    Ok(())
}

#[test]
fn test_bootstrap_on_empty_root_is_idempotent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    let scanner = Scanner::new();

    let first = scanner.discover_for_merge(root, "New")?;
    assert!(first.is_empty());
    assert!(root.join("New").is_dir());
    assert!(root.join("New").join("WORKINPROGRESS").is_dir());

    let second = scanner.discover_for_merge(root, "New")?;
    assert!(second.is_empty());
    assert!(root.join("New").join("WORKINPROGRESS").is_dir());
    Ok(())
}

#[test]
fn test_referential_integrity_across_modes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let merge_root = temp_dir.path().join("merge");
    let generated_root = temp_dir.path().join("generated");
    fs::create_dir_all(merge_root.join("Shapes").join("WORKINPROGRESS"))?;
    fs::write(merge_root.join("Shapes").join("Circle.src"), "x")?;
    fs::write(
        merge_root.join("Shapes").join("WORKINPROGRESS").join("Square.src"),
        "y",
    )?;
    fs::create_dir_all(generated_root.join("Widgets"))?;
    fs::write(generated_root.join("Widgets").join("Button.src"), "z")?;

    let scanner = Scanner::new();
    let merged = scanner.discover_for_merge(&merge_root, "Shapes")?;
    let generated = scanner.discover_generated(&generated_root)?;

    for entity in merged.entities() {
        assert_eq!(entity.namespace(), merged.name());
    }
    for ns in &generated {
        for entity in ns.entities() {
            assert_eq!(entity.namespace(), ns.name());
        }
    }
    Ok(())
}

#[test]
fn test_filter_partition_after_discovery() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("Shapes").join("WORKINPROGRESS"))?;
    fs::write(root.join("Shapes").join("Circle.src"), "a")?;
    fs::write(root.join("Shapes").join("Circle.txt"), "b")?;
    fs::write(
        root.join("Shapes").join("WORKINPROGRESS").join("Circle.src"),
        "c",
    )?;

    let ns = Scanner::new().discover_for_merge(root, "Shapes")?;

    let any = ns.entities_named("Circle", EntityFilter::Any);
    let stubs = ns.entities_named("Circle", EntityFilter::StubOnly);
    let implemented = ns.entities_named("Circle", EntityFilter::ImplementedOnly);

    assert_eq!(any.len(), stubs.len() + implemented.len());
    for stub in &stubs {
        assert!(implemented.iter().all(|e| e.path() != stub.path()));
    }
    Ok(())
}

#[test]
fn test_generated_tree_denylist() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    for dir in ["Foo", "Foo.bin", "obj", "Properties", "Widgets.Properties"] {
        fs::create_dir(root.join(dir))?;
    }
    fs::write(root.join("Foo").join("Bar.src"), "stub")?;

    let namespaces = Scanner::new().discover_generated(root)?;

    assert_eq!(namespaces.len(), 1);
    assert_eq!(namespaces[0].name(), "Foo");
    assert!(namespaces[0].contains_entity_named("Bar", EntityFilter::StubOnly));
    Ok(())
}

#[test]
fn test_missing_roots_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nowhere");
    let scanner = Scanner::new();

    assert!(scanner.discover_for_merge(&missing, "Shapes").is_err());
    assert!(scanner.discover_generated(&missing).is_err());
}

#[test]
fn test_namespace_surface_serializes() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let root = temp_dir.path();
    fs::create_dir_all(root.join("Shapes").join("WORKINPROGRESS"))?;
    fs::write(root.join("Shapes").join("Circle.src"), "x")?;
    fs::write(
        root.join("Shapes").join("WORKINPROGRESS").join("Square.src"),
        "y",
    )?;

    let ns = Scanner::new().discover_for_merge(root, "Shapes")?;

    let json = serde_json::to_value(&ns)?;
    assert_eq!(json["name"], "Shapes");
    let entities = json["entities"].as_object().unwrap();
    assert_eq!(entities.len(), 2);
    let circle = entities
        .values()
        .find(|e| e["name"] == "Circle")
        .expect("Circle entity serialized");
    assert_eq!(circle["is_stub"], false);
    assert_eq!(circle["namespace"], "Shapes");
    Ok(())
}

#[test]
fn test_scanner_driven_by_workspace_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let workspace = temp_dir.path();
    fs::write(
        workspace.join("graft.toml"),
        r#"
[scan]
wip_dir_name = "pending"
excluded_dir_suffixes = ["Generated"]
"#,
    )?;

    let namespaces_root = workspace.join("namespaces");
    fs::create_dir_all(namespaces_root.join("Shapes").join("pending"))?;
    fs::write(
        namespaces_root.join("Shapes").join("pending").join("Circle.src"),
        "stub",
    )?;

    let config = ConfigLoader::load(workspace)?;
    let scanner = Scanner::with_config(config.scan);

    let ns = scanner.discover_for_merge(&namespaces_root, "Shapes")?;
    assert!(ns.contains_entity_named("Circle", EntityFilter::StubOnly));

    // denylist from the file replaces the defaults
    let generated_root = workspace.join("generated");
    fs::create_dir_all(generated_root.join("Widgets.Generated"))?;
    fs::create_dir_all(generated_root.join("obj"))?;
    let namespaces = scanner.discover_generated(&generated_root)?;
    let names: Vec<_> = namespaces.iter().map(Namespace::name).collect();
    assert_eq!(names, vec!["obj"]);
    Ok(())
}

#[test]
fn test_write_default_config_then_scan() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let workspace = temp_dir.path();

    assert!(write_default_config(workspace, false)?);
    let config = ConfigLoader::load(workspace)?;
    assert_eq!(config.scan.wip_dir_name, ScanConfig::default().wip_dir_name);

    let ns = Scanner::with_config(config.scan).discover_for_merge(workspace, "Fresh")?;
    assert!(ns.is_empty());
    assert!(workspace.join("Fresh").join("WORKINPROGRESS").is_dir());
    Ok(())
}

//! Namespace discovery: scanning namespace trees into in-memory models.
//!
//! Two modes. Merging discovery reads one namespace folder plus its nested
//! work-in-progress subfolder, bootstrapping the layout if absent, and tags
//! entities by location (root = implemented, work-in-progress = stub).
//! Generation-only discovery reads a flat tree of generated stub folders,
//! skipping build-artifact directories, and tags every file as a stub.
//!
//! Enumeration is a bounded sequence of blocking, depth-1 directory reads;
//! results are sorted by path so repeated scans of an unchanged tree produce
//! identical output. Not transactional against concurrent external
//! modification of the tree.

use crate::config::ScanConfig;
use crate::error::DiscoveryError;
use crate::namespace::Namespace;
use crate::paths;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Filesystem scanner for namespace discovery.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    config: ScanConfig,
}

impl Scanner {
    /// Create a scanner with the default scan configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner with custom scan configuration.
    pub fn with_config(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Scan configuration in use.
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Discover one namespace for merging: implemented entities directly
    /// under the namespace folder, stub entities under its work-in-progress
    /// subfolder.
    ///
    /// Bootstraps the folder layout if absent, so discovering a namespace
    /// that does not yet exist is valid and yields it empty. Fails with
    /// `NotFound` when `namespaces_root` itself is absent.
    pub fn discover_for_merge(
        &self,
        namespaces_root: &Path,
        namespace_name: &str,
    ) -> Result<Namespace, DiscoveryError> {
        let root = paths::absolutize_root(namespaces_root)?;
        let mut namespace = Namespace::new(&root, namespace_name);
        namespace.ensure_layout(&self.config.wip_dir_name)?;

        for path in files_directly_under(namespace.full_path())? {
            namespace.add_file(path, false);
        }

        let wip_path = namespace.full_path().join(&self.config.wip_dir_name);
        for path in files_directly_under(&wip_path)? {
            namespace.add_file(path, true);
        }

        debug!(
            namespace = %namespace.name(),
            entities = namespace.len(),
            "discovered namespace for merge"
        );
        Ok(namespace)
    }

    /// Discover every namespace in a generated-stub tree.
    ///
    /// Each surviving subdirectory of `namespaces_root` becomes a namespace
    /// whose files are all stubs; no layout bootstrap happens in this mode.
    /// Subdirectories whose name ends with a configured build-artifact
    /// suffix are skipped. Returns namespaces ordered by name; an empty root
    /// yields an empty collection. Fails with `NotFound` when
    /// `namespaces_root` is absent.
    pub fn discover_generated(
        &self,
        namespaces_root: &Path,
    ) -> Result<Vec<Namespace>, DiscoveryError> {
        let root = paths::absolutize_root(namespaces_root)?;
        let mut namespaces = Vec::new();

        for dir in directories_directly_under(&root)? {
            let dir_name = match dir.file_name() {
                Some(name) => name.to_string_lossy().into_owned(),
                None => continue,
            };
            if self.config.is_excluded_dir(&dir_name) {
                debug!(directory = %dir.display(), "skipping build-artifact directory");
                continue;
            }

            let mut namespace = Namespace::new(&root, &dir_name);
            for path in files_directly_under(&dir)? {
                namespace.add_file(path, true);
            }
            namespaces.push(namespace);
        }

        // directories come back sorted by path, so namespaces are already
        // ordered by name
        debug!(
            root = %root.display(),
            namespaces = namespaces.len(),
            "discovered generated namespaces"
        );
        Ok(namespaces)
    }
}

/// Enumerate regular files directly under `dir`, sorted by path.
fn files_directly_under(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    entries_directly_under(dir, |file_type| file_type.is_file())
}

/// Enumerate subdirectories directly under `dir`, sorted by path.
fn directories_directly_under(dir: &Path) -> Result<Vec<PathBuf>, DiscoveryError> {
    entries_directly_under(dir, |file_type| file_type.is_dir())
}

fn entries_directly_under(
    dir: &Path,
    keep: impl Fn(std::fs::FileType) -> bool,
) -> Result<Vec<PathBuf>, DiscoveryError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            DiscoveryError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Failed to enumerate {}: {}", dir.display(), e),
            ))
        })?;
        if keep(entry.file_type()) {
            entries.push(entry.into_path());
        }
    }

    entries.sort();
    Ok(entries)
}

//! Namespace model: a named grouping directory and its discovered entities.
//!
//! A namespace owns the entities found under its folder, keyed by path so
//! insertion is idempotent and iteration is deterministic. The entity set is
//! fixed once a scan completes; a later rescan produces a new value, not a
//! live-updating one. Lookup and filtering are pure in-memory queries.

use crate::entity::{Entity, EntityFilter};
use crate::error::DiscoveryError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A namespace and the entities discovered under it.
#[derive(Debug, Clone, Serialize)]
pub struct Namespace {
    name: String,
    full_path: PathBuf,
    entities: BTreeMap<PathBuf, Entity>,
}

impl Namespace {
    /// Create an empty namespace rooted at `join(namespaces_root, name)`.
    pub fn new(namespaces_root: &Path, name: &str) -> Self {
        Namespace {
            name: name.to_string(),
            full_path: namespaces_root.join(name),
            entities: BTreeMap::new(),
        }
    }

    /// True iff a directory named `name` exists directly under `root`.
    pub fn exists(root: &Path, name: &str) -> bool {
        root.join(name).is_dir()
    }

    /// Create the namespace directory and its nested work-in-progress
    /// subdirectory if absent.
    ///
    /// Idempotent: succeeds when the directories already exist. Fails with an
    /// I/O error when creation is blocked by permissions or a path collision
    /// with a non-directory item.
    pub fn ensure_layout(&self, wip_dir_name: &str) -> Result<(), DiscoveryError> {
        fs::create_dir_all(self.full_path.join(wip_dir_name))?;
        Ok(())
    }

    /// Namespace name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Root path joined with the namespace name.
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Record a discovered file as an entity of this namespace.
    ///
    /// Idempotent with respect to path: a duplicate path is a no-op and
    /// returns false.
    pub(crate) fn add_file(&mut self, path: PathBuf, is_stub: bool) -> bool {
        if self.entities.contains_key(&path) {
            return false;
        }
        let entity = Entity::new(&self.name, path.clone(), is_stub);
        self.entities.insert(path, entity);
        true
    }

    /// Whether any entity with the given name passes the filter.
    pub fn contains_entity_named(&self, name: &str, filter: EntityFilter) -> bool {
        self.entities
            .values()
            .any(|entity| entity.name() == name && filter.matches(entity))
    }

    /// All entities with the given name that pass the filter, ordered by path.
    ///
    /// Same-named entities of the same origin at different paths all come
    /// back; an ambiguous merge target shows up as more than one element.
    pub fn entities_named(&self, name: &str, filter: EntityFilter) -> Vec<&Entity> {
        self.entities
            .values()
            .filter(|entity| entity.name() == name && filter.matches(entity))
            .collect()
    }

    /// All entities of this namespace, ordered by path.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Number of entities discovered in this namespace.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Whether the namespace holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}

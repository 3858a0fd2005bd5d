//! Entity model: one discovered source unit at one filesystem location.
//!
//! An entity is a pure value object built during a namespace scan. Its name
//! is the file's base name without extension; its origin flag records
//! whether it came from the work-in-progress subfolder (stub) or from the
//! namespace root (implemented). The back-reference to the owning namespace
//! is the namespace name, a plain lookup handle, so entities stay trivially
//! clonable and the namespace remains the sole owner of its collection.

use crate::error::DiscoveryError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// A named source unit discovered at a filesystem location.
///
/// Identity is the path: a stub and an implemented entity with the same name
/// are two distinct entities. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    name: String,
    path: PathBuf,
    is_stub: bool,
    namespace: String,
}

impl Entity {
    /// Build an entity for a file belonging to the named namespace.
    ///
    /// The name is derived by stripping directory and extension from `path`.
    /// The path is accepted as given; the caller guarantees it exists as a
    /// file at construction time.
    pub fn new(namespace: &str, path: PathBuf, is_stub: bool) -> Self {
        let name = derive_name(&path);
        Entity {
            name,
            path,
            is_stub,
            namespace: namespace.to_string(),
        }
    }

    /// Base name of the source unit, without directory or extension.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Filesystem location this entity was discovered at.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this entity is a stub (work-in-progress) definition.
    pub fn is_stub(&self) -> bool {
        self.is_stub
    }

    /// Name of the owning namespace.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }
}

fn derive_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Origin filter for entity lookups.
///
/// Closed domain, matched exhaustively at every call site; adding a variant
/// is a compile-time-checked change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityFilter {
    /// Match by name regardless of origin.
    Any,
    /// Match by name where the entity is a stub.
    StubOnly,
    /// Match by name where the entity is implemented.
    ImplementedOnly,
}

impl EntityFilter {
    /// Whether the entity's origin passes this filter.
    pub fn matches(self, entity: &Entity) -> bool {
        match self {
            EntityFilter::Any => true,
            EntityFilter::StubOnly => entity.is_stub(),
            EntityFilter::ImplementedOnly => !entity.is_stub(),
        }
    }
}

impl FromStr for EntityFilter {
    type Err = DiscoveryError;

    /// Parse a filter from its configuration spelling.
    ///
    /// Unknown spellings are rejected rather than silently matching nothing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "any" => Ok(EntityFilter::Any),
            "stub" => Ok(EntityFilter::StubOnly),
            "implemented" => Ok(EntityFilter::ImplementedOnly),
            other => Err(DiscoveryError::UnknownFilter(other.to_string())),
        }
    }
}

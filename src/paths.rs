//! Path helpers for discovery roots.

use crate::error::DiscoveryError;
use std::path::{Path, PathBuf};

/// Resolve a discovery root to an absolute, canonical path.
///
/// Entity paths derived from the returned root are absolute regardless of
/// how the caller spelled it. A missing root is `NotFound`; a resolution
/// failure on an existing root is `InvalidPath`.
pub fn absolutize_root(path: &Path) -> Result<PathBuf, DiscoveryError> {
    if !path.exists() {
        return Err(DiscoveryError::NotFound(path.to_path_buf()));
    }

    // Use dunce for cross-platform canonicalization
    dunce::canonicalize(path).map_err(|e| {
        DiscoveryError::InvalidPath(format!(
            "Failed to canonicalize {}: {}",
            path.display(),
            e
        ))
    })
}

//! # Registry Layout
//!
//! Where the validator finds its three input documents. The relative paths
//! are fixed; only the root directory they hang off can change.

use std::path::{Path, PathBuf};

/// Container schema location, relative to the registry root.
pub const CONTAINER_SCHEMA_PATH: &str = "schemas/container-schema.json";

/// Verifier schema location, relative to the registry root.
pub const VERIFIER_SCHEMA_PATH: &str = "schemas/verifier-schema.json";

/// Registry document location, relative to the registry root.
pub const REGISTRY_PATH: &str = "registry.json";

/// Resolved locations of the registry inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryLayout {
    root: PathBuf,
}

impl Default for RegistryLayout {
    /// Paths relative to the current working directory.
    fn default() -> Self {
        Self::with_root(".")
    }
}

impl RegistryLayout {
    /// Layout rooted at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The registry root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn container_schema(&self) -> PathBuf {
        self.root.join(CONTAINER_SCHEMA_PATH)
    }

    pub fn verifier_schema(&self) -> PathBuf {
        self.root.join(VERIFIER_SCHEMA_PATH)
    }

    pub fn registry(&self) -> PathBuf {
        self.root.join(REGISTRY_PATH)
    }
}

//! # Registry Loader
//!
//! Reads the two schema documents and the registry document from a
//! [`RegistryLayout`]. Loading is all-or-nothing: the first file that is
//! missing, unreadable, or malformed aborts the load.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::RegistryError;
use crate::layout::RegistryLayout;

/// The registry document.
///
/// Entry maps keep the order in which they appear in the file, so the
/// report lists entries in document order.
#[derive(Debug, Clone, Deserialize)]
pub struct Registry {
    /// Registry version, printed in the success summary.
    #[serde(default)]
    pub version: Option<Value>,
    /// Container entries keyed by identifier.
    pub containers: Map<String, Value>,
    /// Verifier entries keyed by address.
    pub verifiers: Map<String, Value>,
}

impl Registry {
    /// Version rendered for display: strings verbatim, other values as JSON.
    pub fn version_label(&self) -> String {
        match &self.version {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "unspecified".to_string(),
        }
    }
}

/// A parsed JSON Schema together with the file it came from.
#[derive(Debug, Clone)]
pub struct SchemaDocument {
    pub path: PathBuf,
    pub value: Value,
}

/// Everything a validation run needs, fully loaded.
#[derive(Debug, Clone)]
pub struct RegistryInputs {
    pub container_schema: SchemaDocument,
    pub verifier_schema: SchemaDocument,
    pub registry: Registry,
}

impl RegistryInputs {
    /// Load the container schema, the verifier schema and the registry, in
    /// that order.
    ///
    /// # Errors
    ///
    /// Returns the first [`RegistryError`] encountered.
    pub fn load(layout: &RegistryLayout) -> Result<Self, RegistryError> {
        let container_schema = load_schema(&layout.container_schema())?;
        let verifier_schema = load_schema(&layout.verifier_schema())?;
        let registry = load_registry(&layout.registry())?;

        tracing::info!(
            root = %layout.root().display(),
            containers = registry.containers.len(),
            verifiers = registry.verifiers.len(),
            "loaded registry inputs"
        );

        Ok(Self {
            container_schema,
            verifier_schema,
            registry,
        })
    }
}

/// Read and parse a JSON document.
pub fn load_json(path: &Path) -> Result<Value, RegistryError> {
    let content = std::fs::read_to_string(path).map_err(|source| RegistryError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&content).map_err(|source| RegistryError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "parsed JSON document");
    Ok(value)
}

/// Load a schema document. Only objects and booleans are valid schemas.
pub fn load_schema(path: &Path) -> Result<SchemaDocument, RegistryError> {
    let value = load_json(path)?;
    if !(value.is_object() || value.is_boolean()) {
        return Err(RegistryError::Shape {
            path: path.to_path_buf(),
            reason: "a JSON Schema must be an object or a boolean".to_string(),
        });
    }
    Ok(SchemaDocument {
        path: path.to_path_buf(),
        value,
    })
}

/// Load the registry document and check its top-level shape.
pub fn load_registry(path: &Path) -> Result<Registry, RegistryError> {
    let value = load_json(path)?;
    serde_json::from_value(value).map_err(|e| RegistryError::Shape {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn load_json_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_json(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, RegistryError::Read { .. }), "got: {err}");
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn load_json_reports_malformed_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.json", "{ not json");
        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, RegistryError::Parse { .. }), "got: {err}");
    }

    #[test]
    fn load_schema_rejects_non_schema_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "schema.json", "[1, 2, 3]");
        let err = load_schema(&path).unwrap_err();
        assert!(matches!(err, RegistryError::Shape { .. }), "got: {err}");
    }

    #[test]
    fn load_schema_accepts_boolean_schema() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "schema.json", "true");
        let schema = load_schema(&path).unwrap();
        assert_eq!(schema.value, json!(true));
    }

    #[test]
    fn load_registry_requires_both_mappings() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "registry.json",
            r#"{"version": "1.0.0", "containers": {}}"#,
        );
        let err = load_registry(&path).unwrap_err();
        match err {
            RegistryError::Shape { reason, .. } => assert!(reason.contains("verifiers"), "{reason}"),
            other => panic!("expected Shape, got: {other}"),
        }
    }

    #[test]
    fn load_registry_rejects_non_object_mapping() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "registry.json",
            r#"{"version": "1.0.0", "containers": [], "verifiers": {}}"#,
        );
        assert!(matches!(
            load_registry(&path).unwrap_err(),
            RegistryError::Shape { .. }
        ));
    }

    #[test]
    fn load_registry_preserves_document_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "registry.json",
            r#"{"version": "2", "containers": {"zeta": {}, "alpha": {}, "mid": {}}, "verifiers": {}}"#,
        );
        let registry = load_registry(&path).unwrap();
        let keys: Vec<&str> = registry.containers.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn version_label_formats() {
        let mut registry: Registry =
            serde_json::from_value(json!({"version": "1.2.0", "containers": {}, "verifiers": {}}))
                .unwrap();
        assert_eq!(registry.version_label(), "1.2.0");

        registry.version = Some(json!(3));
        assert_eq!(registry.version_label(), "3");

        registry.version = None;
        assert_eq!(registry.version_label(), "unspecified");
    }
}

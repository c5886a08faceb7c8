//! # Entry Validation
//!
//! Compiles the container and verifier schemas once per run and checks
//! every registry entry against the schema for its kind. A failing entry
//! never stops the batch; its violations are recorded on its
//! [`EntryOutcome`] and the next entry is checked.
//!
//! ## Schema Resolution
//!
//! Remote `$ref` retrieval is disabled. References resolve only against
//! the `$id`s of the two loaded schemas; anything else fails compilation.
//! Format keywords (`date-time`, `uri`, `email`) are asserted. A schema
//! without a `$schema` declaration is compiled as Draft 7.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use jsonschema::{Draft, Retrieve, Uri, Validator};
use serde_json::{Map, Value};

use crate::error::RegistryError;
use crate::loader::{Registry, RegistryInputs, SchemaDocument};
use crate::report::ValidationReport;

/// Number of key characters shown next to a valid entry.
pub const KEY_PREFIX_CHARS: usize = 10;

/// The two kinds of registry entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Container,
    Verifier,
}

impl EntryKind {
    /// Lowercase name used in logs and errors.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Container => "container",
            Self::Verifier => "verifier",
        }
    }

    /// Capitalised name used in the console report.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Container => "Container",
            Self::Verifier => "Verifier",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// JSON Pointer to the violating value inside the entry.
    pub instance_path: String,
    /// JSON Pointer to the schema keyword that rejected it.
    pub schema_path: String,
    /// Message from the validation library.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let at = if self.instance_path.is_empty() {
            "(root)"
        } else {
            self.instance_path.as_str()
        };
        write!(f, "{at}: {} [schema: {}]", self.message, self.schema_path)
    }
}

/// Result of validating one registry entry.
#[derive(Debug, Clone)]
pub struct EntryOutcome {
    pub kind: EntryKind,
    /// Key of the entry in its registry mapping.
    pub key: String,
    /// The entry's `name`, or its key when it has no string name.
    pub display_name: String,
    /// Empty when the entry is valid.
    pub violations: Vec<Violation>,
}

impl EntryOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// First [`KEY_PREFIX_CHARS`] characters of the key.
    pub fn short_key(&self) -> String {
        self.key.chars().take(KEY_PREFIX_CHARS).collect()
    }
}

/// Resolves `$ref`s against the loaded schemas only.
struct LocalSchemaRetriever {
    schemas_by_uri: HashMap<String, Value>,
}

impl Retrieve for LocalSchemaRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        self.schemas_by_uri
            .get(uri_str)
            .cloned()
            .ok_or_else(|| format!("remote schema retrieval is disabled: {uri_str}").into())
    }
}

/// Compiled validators for both entry kinds.
pub struct RegistryValidator {
    container: Validator,
    verifier: Validator,
}

impl fmt::Debug for RegistryValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryValidator").finish_non_exhaustive()
    }
}

impl RegistryValidator {
    /// Compile both schemas.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::Compile`] if either schema is not a valid
    /// JSON Schema or references a schema that is not loaded.
    pub fn new(
        container_schema: &SchemaDocument,
        verifier_schema: &SchemaDocument,
    ) -> Result<Self, RegistryError> {
        let mut schemas_by_uri = HashMap::new();
        for doc in [container_schema, verifier_schema] {
            if let Some(id) = doc.value.get("$id").and_then(Value::as_str) {
                schemas_by_uri.insert(id.to_string(), doc.value.clone());
            }
        }

        let container = compile(EntryKind::Container, container_schema, &schemas_by_uri)?;
        let verifier = compile(EntryKind::Verifier, verifier_schema, &schemas_by_uri)?;
        Ok(Self { container, verifier })
    }

    /// Compile the schemas carried by `inputs`.
    pub fn from_inputs(inputs: &RegistryInputs) -> Result<Self, RegistryError> {
        Self::new(&inputs.container_schema, &inputs.verifier_schema)
    }

    /// Validate a single entry against the schema for `kind`.
    pub fn validate_entry(&self, kind: EntryKind, key: &str, entry: &Value) -> EntryOutcome {
        let validator = match kind {
            EntryKind::Container => &self.container,
            EntryKind::Verifier => &self.verifier,
        };

        let violations: Vec<Violation> = validator
            .iter_errors(entry)
            .map(|e| Violation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        let display_name = entry
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(key)
            .to_string();

        if violations.is_empty() {
            tracing::debug!(kind = %kind, key, "entry valid");
        } else {
            tracing::debug!(kind = %kind, key, violations = violations.len(), "entry invalid");
        }

        EntryOutcome {
            kind,
            key: key.to_string(),
            display_name,
            violations,
        }
    }

    /// Validate every entry of the registry, containers first.
    pub fn validate_registry(&self, registry: &Registry) -> ValidationReport {
        let containers = self.validate_all(EntryKind::Container, &registry.containers);
        let verifiers = self.validate_all(EntryKind::Verifier, &registry.verifiers);

        let report = ValidationReport {
            version: registry.version_label(),
            containers,
            verifiers,
        };

        tracing::info!(
            valid_containers = report.valid_containers(),
            total_containers = report.containers.len(),
            valid_verifiers = report.valid_verifiers(),
            total_verifiers = report.verifiers.len(),
            "registry validation finished"
        );

        report
    }

    fn validate_all(&self, kind: EntryKind, entries: &Map<String, Value>) -> Vec<EntryOutcome> {
        entries
            .iter()
            .map(|(key, entry)| self.validate_entry(kind, key, entry))
            .collect()
    }
}

/// Compile both schemas and validate the whole registry.
pub fn validate_inputs(inputs: &RegistryInputs) -> Result<ValidationReport, RegistryError> {
    let validator = RegistryValidator::from_inputs(inputs)?;
    Ok(validator.validate_registry(&inputs.registry))
}

fn compile(
    kind: EntryKind,
    schema: &SchemaDocument,
    schemas_by_uri: &HashMap<String, Value>,
) -> Result<Validator, RegistryError> {
    let draft = dialect(&schema.value);
    let validator = jsonschema::options()
        .with_draft(draft)
        .should_validate_formats(true)
        .with_retriever(LocalSchemaRetriever {
            schemas_by_uri: schemas_by_uri.clone(),
        })
        .build(&schema.value)
        .map_err(|e| compile_error(kind, &schema.path, e.to_string()))?;

    tracing::debug!(kind = %kind, path = %schema.path.display(), "compiled schema");
    Ok(validator)
}

/// Draft named by the schema's `$schema`, Draft 7 when absent or unknown.
fn dialect(schema: &Value) -> Draft {
    let Some(uri) = schema.get("$schema").and_then(Value::as_str) else {
        return Draft::Draft7;
    };
    if uri.contains("draft-04") {
        Draft::Draft4
    } else if uri.contains("draft-06") {
        Draft::Draft6
    } else if uri.contains("2019-09") {
        Draft::Draft201909
    } else if uri.contains("2020-12") {
        Draft::Draft202012
    } else {
        Draft::Draft7
    }
}

fn compile_error(kind: EntryKind, path: &Path, reason: String) -> RegistryError {
    RegistryError::Compile {
        kind: kind.as_str(),
        path: path.to_path_buf(),
        reason,
    }
}

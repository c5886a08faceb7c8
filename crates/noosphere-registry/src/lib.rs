//! # noosphere-registry — Registry Schema Validation
//!
//! Checks the Noosphere `registry.json` against the container and verifier
//! JSON Schemas and produces a printable report.
//!
//! A run has three phases:
//!
//! 1. [`RegistryInputs::load`] reads `schemas/container-schema.json`,
//!    `schemas/verifier-schema.json` and `registry.json` from a
//!    [`RegistryLayout`]. Any missing or malformed file is a fatal
//!    [`RegistryError`].
//! 2. [`RegistryValidator`] compiles both schemas once and validates every
//!    `containers` and `verifiers` entry. Failing entries are recorded,
//!    never fatal.
//! 3. [`ValidationReport::render`] prints the per-entry lines and the final
//!    tally; [`ValidationReport::exit_code`] gives the process status.
//!
//! ## Crate Policy
//!
//! - No network access: `$ref`s resolve only against the loaded schemas.
//! - Nothing on disk is written or mutated.

pub mod error;
pub mod layout;
pub mod loader;
pub mod report;
pub mod validate;

pub use error::RegistryError;
pub use layout::{RegistryLayout, CONTAINER_SCHEMA_PATH, REGISTRY_PATH, VERIFIER_SCHEMA_PATH};
pub use loader::{load_json, load_registry, load_schema, Registry, RegistryInputs, SchemaDocument};
pub use report::ValidationReport;
pub use validate::{
    validate_inputs, EntryKind, EntryOutcome, RegistryValidator, Violation, KEY_PREFIX_CHARS,
};

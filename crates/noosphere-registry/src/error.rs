//! # Error Types
//!
//! Every error in this crate is fatal to a validation run: it means one of
//! the input documents could not be turned into something the validator
//! can work with. Entry-level schema violations are not errors; they are
//! recorded as [`crate::Violation`]s on the entry outcome.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal error while loading the registry inputs or compiling a schema.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// The file could not be read (missing, permissions, not a file).
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file was read but is not valid JSON.
    #[error("failed to parse {} as JSON: {source}", path.display())]
    Parse {
        /// Path of the malformed document.
        path: PathBuf,
        /// Underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// The document is JSON but does not have the expected top-level shape.
    #[error("unexpected document shape in {}: {reason}", path.display())]
    Shape {
        /// Path of the offending document.
        path: PathBuf,
        /// Human-readable reason.
        reason: String,
    },

    /// The schema could not be compiled into a validator.
    #[error("failed to compile {kind} schema {}: {reason}", path.display())]
    Compile {
        /// Entity kind the schema belongs to ("container" or "verifier").
        kind: &'static str,
        /// Path of the schema document.
        path: PathBuf,
        /// Reason reported by the validation library.
        reason: String,
    },
}

//! # Error Handling
//!
//! This module defines the centralized error type for `mojo-support`. It uses
//! the `thiserror` library to describe every failure mode of the build
//! ordering and staleness logic as a variant of a single `Error` enum.
//!
//! ## Key Components
//!
//! - **`Error`**: The main enum covering every failure the crate can report.
//!   Variants carry the identities or paths a human needs to fix the input.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`.
//!
//! The variants fall into four groups:
//!
//! - Configuration errors: duplicate build-unit identity, malformed unit keys,
//!   conflicting staleness settings, unparsable configuration files.
//! - Structural errors: dependency or parent cycles between build units.
//! - Filesystem errors: failed directory scans and unreadable timestamps.
//! - Build verification errors: a check file that was not touched, or units
//!   still unresolved after a build pass.
//!
//! None of these are retried internally. Ordering and staleness are
//! deterministic over their inputs, so the same input reproduces the same
//! error.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for mojo-support operations
#[derive(Error, Debug)]
pub enum Error {
    /// Two build candidates share the same `groupId:artifactId`.
    ///
    /// `first` and `second` are the full `groupId:artifactId:version`
    /// identities of the clashing units.
    #[error("Project '{key}' is duplicated in build-candidate set: {first} and {second}")]
    DuplicateUnit {
        key: String,
        first: String,
        second: String,
    },

    /// A dependency edge closes a cycle between build candidates.
    #[error("Cycle detected with dependency: {dependency} of project: {project}\n\nCycle: {cycle}")]
    DependencyCycle {
        dependency: String,
        project: String,
        cycle: String,
    },

    /// A parent edge closes a cycle between build candidates.
    #[error("Cycle detected with parent: {parent} of project: {project}\n\nCycle: {cycle}")]
    ParentCycle {
        parent: String,
        project: String,
        cycle: String,
    },

    /// A `groupId:artifactId[:version]` string could not be parsed.
    #[error("Invalid unit key '{value}': {message}")]
    InvalidUnitKey { value: String, message: String },

    /// Staleness settings that cannot be combined under strict validation.
    #[error("Conflicting staleness configuration: {message}")]
    ConflictingPolicy { message: String },

    /// Walking a source root failed part way through.
    #[error("Error scanning source directory: {}: {message}", root.display())]
    Scan { root: PathBuf, message: String },

    /// The modification time of a file could not be read.
    #[error("Cannot read modification time of {}: {message}", path.display())]
    Timestamp { path: PathBuf, message: String },

    /// A check file was not modified by the step that should have written it.
    #[error("Check file: {} not changed.", path.display())]
    CheckFileUnchanged { path: PathBuf },

    /// Build units that are still missing after a build pass.
    #[error("Failed to resolve {} projects:{}", keys.len(), keys.iter().map(|k| format!("\n- {}", k)).collect::<String>())]
    UnresolvedUnits { keys: Vec<String> },

    /// An error occurred while parsing a YAML configuration document.
    #[error("Configuration parsing error: {message}{}", hint.as_ref().map(|h| format!("\n  hint: {}", h)).unwrap_or_default())]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A glob pattern error, wrapped from `glob::PatternError`.
    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

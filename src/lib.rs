//! # Mojo Support Library
//!
//! This library holds the decision logic shared by build plugins that wrap
//! external tools (annotation processors, `configure`/`make`, packagers):
//! in which order a set of projects must be built, and whether a tool has
//! anything to do at all. Invoking the tools is left to the caller.
//!
//! ## Quick Example
//!
//! ```
//! use mojo_support::ordering::order_dependency_projects;
//! use mojo_support::unit::{BuildUnit, UnitKey};
//!
//! let parent = BuildUnit::new("org.example", "parent", "1.0");
//! let lib = BuildUnit::new("org.example", "lib", "1.0")
//!     .with_parent(UnitKey::new("org.example", "parent"));
//! let app = BuildUnit::new("org.example", "app", "1.0")
//!     .with_dependency(UnitKey::new("org.example", "lib"));
//!
//! let order = order_dependency_projects(vec![app, lib, parent]).unwrap();
//! let ids: Vec<String> = order.iter().map(BuildUnit::id).collect();
//! assert_eq!(
//!     ids,
//!     ["org.example:parent:1.0", "org.example:lib:1.0", "org.example:app:1.0"]
//! );
//! ```
//!
//! ## Core Concepts
//!
//! - **Ordering (`unit`, `graph`, `ordering`, `resolution`)**: Build units
//!   keyed by `groupId:artifactId` are sorted so that dependencies and parents
//!   come first. Duplicate identities and cycles are fatal errors.
//! - **Staleness (`staleness`, `path`, `timestamp`)**: Source files are
//!   scanned with include/exclude globs and compared against their derived
//!   files by modification time. An empty result means the wrapped tool can
//!   be skipped.
//! - **Check files (`timestamp`)**: A single file snapshotted before a build
//!   step and required to be newer afterwards.
//! - **Configuration (`config`, `defaults`)**: YAML documents describing
//!   build units and staleness settings.
//!
//! Both the orderer and the stale scanner are synchronous and keep no state
//! between calls. Logging goes through the `log` facade; installing a logger
//! is up to the application.

pub mod config;
pub mod defaults;
pub mod error;
pub mod graph;
pub mod ordering;
pub mod path;
pub mod resolution;
pub mod staleness;
pub mod timestamp;
pub mod unit;

#[cfg(test)]
mod ordering_proptest;
#[cfg(test)]
mod path_proptest;

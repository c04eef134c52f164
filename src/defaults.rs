//! Default values for staleness scanning.
//!
//! This module provides centralized default values used by the stale-source
//! scanner and its configuration, ensuring consistency and avoiding
//! duplication.

use std::time::Duration;

/// Pattern selecting sources when no includes are configured.
pub const INCLUDE_PATTERN: &str = "**/*.java";

/// Suffix a source must carry to have derived files.
pub const SOURCE_SUFFIX: &str = ".java";

/// Target suffix used when neither output files nor output file endings are
/// configured.
pub const TARGET_SUFFIX: &str = ".java";

/// Targets must be strictly as new as their sources by default.
pub const STALE_GRANULARITY: Duration = Duration::ZERO;

/// Returns the default include patterns.
pub fn includes() -> Vec<String> {
    vec![INCLUDE_PATTERN.to_string()]
}

/// Returns the default exclude patterns (none).
pub fn excludes() -> Vec<String> {
    Vec::new()
}

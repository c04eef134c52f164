//! Source-to-target mappings
//!
//! A mapping tells the stale scanner which derived files a source produces.
//! A source for which a mapping yields no targets is never considered stale.

use std::fmt::Debug;
use std::path::{Path, PathBuf};

/// Resolve the derived files of one source
pub trait SourceMapping: Debug {
    /// Targets of `source` (a `/`-separated path relative to its source root)
    /// located under `target_dir`
    fn targets(&self, target_dir: &Path, source: &str) -> Vec<PathBuf>;
}

/// Each source maps to same-named files with a different suffix,
/// e.g. `org/Foo.java` to `org/Foo.class`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixMapping {
    source_suffix: String,
    target_suffixes: Vec<String>,
}

impl SuffixMapping {
    pub fn new<S: Into<String>>(
        source_suffix: impl Into<String>,
        target_suffixes: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            source_suffix: source_suffix.into(),
            target_suffixes: target_suffixes.into_iter().map(Into::into).collect(),
        }
    }
}

impl SourceMapping for SuffixMapping {
    fn targets(&self, target_dir: &Path, source: &str) -> Vec<PathBuf> {
        let Some(base) = source.strip_suffix(self.source_suffix.as_str()) else {
            return Vec::new();
        };

        self.target_suffixes
            .iter()
            .map(|suffix| target_dir.join(format!("{}{}", base, suffix)))
            .collect()
    }
}

/// Every source with the given suffix maps to one fixed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleTargetMapping {
    source_suffix: String,
    target: String,
}

impl SingleTargetMapping {
    pub fn new(source_suffix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_suffix: source_suffix.into(),
            target: target.into(),
        }
    }
}

impl SourceMapping for SingleTargetMapping {
    fn targets(&self, target_dir: &Path, source: &str) -> Vec<PathBuf> {
        if source.ends_with(self.source_suffix.as_str()) {
            vec![target_dir.join(&self.target)]
        } else {
            Vec::new()
        }
    }
}

//! # Configuration Parsing
//!
//! This module defines the YAML documents that describe the inputs of the
//! ordering and staleness logic, and turns them into the crate's own types.
//!
//! ## Key Components
//!
//! - **`UnitDescriptor`**: One entry of a build-unit list, with its full
//!   `groupId:artifactId:version` id, an optional parent and the keys of its
//!   dependencies. `parse_units` turns a YAML list of these into
//!   `BuildUnit`s.
//!
//! - **`StalenessConfig`**: The settings of one stale-source scan, using the
//!   same option names as the build plugins expose (`outputFiles`,
//!   `outputFileEndings`, `staleMillis`, ...). `policy` resolves them into
//!   exactly one `StalenessPolicy` and `request` into a `StaleScanRequest`.
//!
//! ## Example
//!
//! ```yaml
//! sourceRoots: [src/main/java]
//! outputDirectory: target/generated-sources/apt
//! outputFileEndings: [.txt]
//! staleMillis: 500
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::staleness::{StaleScanRequest, StalenessPolicy};
use crate::unit::{split_coordinates, BuildUnit, UnitKey};

/// One build unit as written in a units document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDescriptor {
    /// Full `groupId:artifactId:version` identity
    pub id: String,
    /// `groupId:artifactId` of the parent, if any
    #[serde(default)]
    pub parent: Option<UnitKey>,
    /// `groupId:artifactId` of each declared dependency
    #[serde(default)]
    pub dependencies: Vec<UnitKey>,
}

impl TryFrom<UnitDescriptor> for BuildUnit {
    type Error = Error;

    fn try_from(descriptor: UnitDescriptor) -> Result<Self> {
        let (key, version) = split_coordinates(&descriptor.id)?;
        let version = version.ok_or_else(|| Error::ConfigParse {
            message: format!("Unit '{}' has no version", descriptor.id),
            hint: Some("Use 'groupId:artifactId:version' for unit ids".to_string()),
        })?;

        let mut unit = BuildUnit::new(key.group_id(), key.artifact_id(), version);
        if let Some(parent) = descriptor.parent {
            unit = unit.with_parent(parent);
        }
        for dependency in descriptor.dependencies {
            unit = unit.with_dependency(dependency);
        }
        Ok(unit)
    }
}

/// Parse a YAML list of unit descriptors
pub fn parse_units(yaml_content: &str) -> Result<Vec<BuildUnit>> {
    let descriptors: Vec<UnitDescriptor> =
        serde_yaml::from_str(yaml_content).map_err(|e| Error::ConfigParse {
            message: e.to_string(),
            hint: Some(
                "Expected a list of entries with 'id', optional 'parent' and 'dependencies'"
                    .to_string(),
            ),
        })?;

    descriptors.into_iter().map(BuildUnit::try_from).collect()
}

/// Parse a units document from a file
pub fn units_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<BuildUnit>> {
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    parse_units(&content)
}

/// Settings of one stale-source scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct StalenessConfig {
    /// Directories holding the sources
    pub source_roots: Vec<PathBuf>,
    /// Extra source directories scanned after `source_roots`
    pub additional_source_roots: Vec<PathBuf>,
    /// Directory the derived files are written to
    pub output_directory: PathBuf,
    /// Include patterns; `**/*.java` when empty
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    /// Process every source without comparing timestamps
    pub force: bool,
    /// Aggregate files produced from all sources
    pub output_files: Vec<String>,
    /// Suffixes of the per-source derived files
    pub output_file_endings: Vec<String>,
    /// Suffix that marks a file as a source; `.java` when unset
    pub source_suffix: Option<String>,
    /// Timestamp granularity in milliseconds
    pub stale_millis: u64,
    /// Reject settings that would otherwise be ignored with a warning
    pub strict: bool,
}

impl StalenessConfig {
    /// Resolve the single active policy
    pub fn policy(&self) -> Result<StalenessPolicy> {
        if self.strict
            && !self.force
            && !self.output_files.is_empty()
            && !self.output_file_endings.is_empty()
        {
            return Err(Error::ConflictingPolicy {
                message: "outputFiles and outputFileEndings cannot be combined".to_string(),
            });
        }

        let source_suffix = self
            .source_suffix
            .as_deref()
            .unwrap_or(defaults::SOURCE_SUFFIX);

        Ok(StalenessPolicy::select(
            self.force,
            &self.output_files,
            &self.output_file_endings,
            source_suffix,
        ))
    }

    /// Build the scan request with paths as written
    pub fn request(&self) -> Result<StaleScanRequest> {
        self.request_relative_to(Path::new(""))
    }

    /// Build the scan request, resolving relative paths against `base_dir`
    pub fn request_relative_to(&self, base_dir: &Path) -> Result<StaleScanRequest> {
        let roots = self
            .source_roots
            .iter()
            .chain(&self.additional_source_roots)
            .map(|root| base_dir.join(root));

        let mut request =
            StaleScanRequest::new(roots, base_dir.join(&self.output_directory), self.policy()?)
                .with_excludes(&self.excludes)
                .with_stale_granularity(Duration::from_millis(self.stale_millis));
        if !self.includes.is_empty() {
            request = request.with_includes(&self.includes);
        }
        Ok(request)
    }
}

/// Parse staleness settings from YAML
pub fn parse_staleness(yaml_content: &str) -> Result<StalenessConfig> {
    serde_yaml::from_str(yaml_content).map_err(Error::Yaml)
}

/// Parse staleness settings from a file; relative paths in the returned
/// request are resolved against the file's directory
pub fn staleness_request_from_file<P: AsRef<Path>>(path: P) -> Result<StaleScanRequest> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(Error::Io)?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    parse_staleness(&content)?.request_relative_to(base_dir)
}

//! # Stale Source Detection
//!
//! Decides which source files must be handed to an expensive external tool
//! (annotation processors, code generators, native build steps) because
//! their derived files are missing or out of date. An empty answer means the
//! tool does not need to run at all.
//!
//! ## Key Components
//!
//! - **`StalenessPolicy`**: How a source maps to its derived files. Exactly
//!   one variant is active: explicit target files, suffix mapping, or
//!   "always stale" for forced runs.
//! - **`SourceScanner`**: Enumerates files under a source root using include
//!   and exclude glob patterns.
//! - **`SourceMapping`**: Resolves the target files of a single source.
//! - **`compute_stale_sources`**: The staleness verdict over all roots.
//! - **`plan_processing`**: The files to pass to the tool. With explicit
//!   targets every source is reprocessed once any of them is stale, since the
//!   targets are aggregates built from all sources.
//!
//! A source is stale when one of its targets is missing, or when the source
//! is newer than the target by more than the configured granularity. Roots
//! that do not exist contribute no files; any other filesystem error aborts
//! the computation.

pub mod mapping;
pub mod scanner;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{debug, info, warn};

use crate::defaults;
use crate::error::{Error, Result};
use crate::timestamp::{is_newer, last_modified};

pub use mapping::{SingleTargetMapping, SourceMapping, SuffixMapping};
pub use scanner::{SourceFile, SourceScanner};

/// How sources are mapped to the files they produce
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StalenessPolicy {
    /// Named output files built from all sources together
    ExplicitTargets {
        source_suffix: String,
        targets: Vec<String>,
    },
    /// One derived file per target suffix for each source
    SuffixMapping {
        source_suffix: String,
        target_suffixes: Vec<String>,
    },
    /// Every matched source is stale
    AlwaysStale,
}

impl StalenessPolicy {
    /// Pick the active policy from the raw settings.
    ///
    /// `force` wins over everything, then explicit targets, then target
    /// suffixes, then the default suffix mapping. Settings that lose are
    /// reported with a warning.
    pub fn select(
        force: bool,
        output_files: &[String],
        output_file_endings: &[String],
        source_suffix: &str,
    ) -> Self {
        if force {
            if !output_files.is_empty() || !output_file_endings.is_empty() {
                warn!("Not using staleness checking - ignoring outputFiles and outputFileEndings");
            }
            debug!("Processing all source files");
            return Self::AlwaysStale;
        }

        if !output_files.is_empty() {
            if !output_file_endings.is_empty() {
                warn!("Both outputFiles and outputFileEndings specified - using outputFiles");
            }
            debug!("Computing stale sources against target files {:?}", output_files);
            return Self::ExplicitTargets {
                source_suffix: source_suffix.to_string(),
                targets: output_files.to_vec(),
            };
        }

        let target_suffixes = if output_file_endings.is_empty() {
            vec![defaults::TARGET_SUFFIX.to_string()]
        } else {
            output_file_endings.to_vec()
        };
        debug!(
            "Computing stale sources against target file endings {:?}",
            target_suffixes
        );
        Self::SuffixMapping {
            source_suffix: source_suffix.to_string(),
            target_suffixes,
        }
    }

    /// The mappings to check, or `None` when no comparison is made
    pub fn mappings(&self) -> Option<Vec<Box<dyn SourceMapping>>> {
        match self {
            Self::ExplicitTargets {
                source_suffix,
                targets,
            } => Some(
                targets
                    .iter()
                    .map(|t| {
                        Box::new(SingleTargetMapping::new(source_suffix.as_str(), t.as_str()))
                            as Box<dyn SourceMapping>
                    })
                    .collect(),
            ),
            Self::SuffixMapping {
                source_suffix,
                target_suffixes,
            } => Some(vec![Box::new(SuffixMapping::new(
                source_suffix.as_str(),
                target_suffixes.iter().map(String::as_str),
            ))]),
            Self::AlwaysStale => None,
        }
    }
}

/// Everything needed for one staleness computation
#[derive(Debug, Clone)]
pub struct StaleScanRequest {
    pub source_roots: Vec<PathBuf>,
    /// Directory that target paths are resolved against
    pub target_dir: PathBuf,
    pub policy: StalenessPolicy,
    pub includes: Vec<String>,
    pub excludes: Vec<String>,
    /// A target counts as current if it is at most this much older than
    /// its source
    pub stale_granularity: Duration,
}

impl StaleScanRequest {
    /// Request with the default patterns and zero granularity
    pub fn new(
        source_roots: impl IntoIterator<Item = PathBuf>,
        target_dir: impl Into<PathBuf>,
        policy: StalenessPolicy,
    ) -> Self {
        Self {
            source_roots: source_roots.into_iter().collect(),
            target_dir: target_dir.into(),
            policy,
            includes: defaults::includes(),
            excludes: defaults::excludes(),
            stale_granularity: defaults::STALE_GRANULARITY,
        }
    }

    pub fn with_includes<S: Into<String>>(mut self, includes: impl IntoIterator<Item = S>) -> Self {
        self.includes = includes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_excludes<S: Into<String>>(mut self, excludes: impl IntoIterator<Item = S>) -> Self {
        self.excludes = excludes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_stale_granularity(mut self, granularity: Duration) -> Self {
        self.stale_granularity = granularity;
        self
    }
}

/// The set of sources that need reprocessing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StalenessResult {
    files: BTreeSet<PathBuf>,
}

impl StalenessResult {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.files.contains(path)
    }

    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.files.iter()
    }

    pub fn into_files(self) -> BTreeSet<PathBuf> {
        self.files
    }
}

/// Compute the stale sources across all roots of `request`
pub fn compute_stale_sources(request: &StaleScanRequest) -> Result<StalenessResult> {
    let scanner = SourceScanner::new(request.includes.as_slice(), request.excludes.as_slice())?;
    let mappings = request.policy.mappings();
    let mut files = BTreeSet::new();

    for root in &request.source_roots {
        let mut stale = Vec::new();
        for source in scanner.scan(root)? {
            let is_stale = match &mappings {
                None => true,
                Some(mappings) => {
                    source_is_stale(&source, mappings, &request.target_dir, request.stale_granularity)?
                }
            };
            if is_stale {
                stale.push(source.path);
            }
        }

        log_found("stale sources", root, &stale);
        files.extend(stale);
    }

    Ok(StalenessResult { files })
}

/// What to hand to the downstream tool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessingPlan {
    pub stale: StalenessResult,
    /// Sources to process, sorted; empty means the tool can be skipped
    pub sources: Vec<PathBuf>,
}

impl ProcessingPlan {
    pub fn is_up_to_date(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Decide which sources the downstream tool must process
pub fn plan_processing(request: &StaleScanRequest) -> Result<ProcessingPlan> {
    let stale = compute_stale_sources(request)?;

    if stale.is_empty() {
        info!("Nothing to process - all processor-generated files are up to date");
        return Ok(ProcessingPlan::default());
    }

    let sources = match request.policy {
        StalenessPolicy::ExplicitTargets { .. } => all_sources(request)?,
        _ => stale.files().cloned().collect(),
    };

    info!(
        "Processing {} source file{}",
        sources.len(),
        if sources.len() == 1 { "" } else { "s" }
    );

    Ok(ProcessingPlan { stale, sources })
}

/// A source is stale if any of its targets is missing or too old
fn source_is_stale(
    source: &SourceFile,
    mappings: &[Box<dyn SourceMapping>],
    target_dir: &Path,
    granularity: Duration,
) -> Result<bool> {
    let source_time = last_modified(&source.path)?.ok_or_else(|| Error::Timestamp {
        path: source.path.clone(),
        message: "source disappeared after it was scanned".to_string(),
    })?;

    for mapping in mappings {
        for target in mapping.targets(target_dir, &source.relative) {
            if is_newer(Some(source_time), last_modified(&target)?, granularity) {
                return Ok(true);
            }
        }
    }

    Ok(false)
}

/// Every matched source, regardless of timestamps
fn all_sources(request: &StaleScanRequest) -> Result<Vec<PathBuf>> {
    let scanner = SourceScanner::new(request.includes.as_slice(), request.excludes.as_slice())?;
    let mut files = BTreeSet::new();

    for root in &request.source_roots {
        let found: Vec<PathBuf> = scanner.scan(root)?.into_iter().map(|f| f.path).collect();
        log_found("sources", root, &found);
        files.extend(found);
    }

    Ok(files.into_iter().collect())
}

fn log_found(name: &str, root: &Path, files: &[PathBuf]) {
    if files.is_empty() {
        debug!("No {} found in {}", name, root.display());
    } else {
        debug!("Found {} {} in {}:", files.len(), name, root.display());
        for file in files {
            debug!("  {}", file.display());
        }
    }
}

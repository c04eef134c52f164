//! Modification-time comparisons
//!
//! Both stale-source scanning and check-file verification reduce to one
//! question: is this timestamp newer than that one? `is_newer` answers it for
//! a pair of optional timestamps, where `None` stands for a file that does not
//! exist.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use log::debug;

use crate::error::{Error, Result};

/// Read the modification time of `path`, or `None` if it does not exist
pub fn last_modified(path: &Path) -> Result<Option<SystemTime>> {
    let metadata = match fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(Error::Timestamp {
                path: path.to_path_buf(),
                message: e.to_string(),
            })
        }
    };

    metadata.modified().map(Some).map_err(|e| Error::Timestamp {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// True when `candidate` exists and is newer than `reference` by more than
/// `granularity`. A missing reference is older than any existing candidate.
pub fn is_newer(
    candidate: Option<SystemTime>,
    reference: Option<SystemTime>,
    granularity: Duration,
) -> bool {
    match (candidate, reference) {
        (None, _) => false,
        (Some(_), None) => true,
        (Some(candidate), Some(reference)) => match reference.checked_add(granularity) {
            Some(threshold) => candidate > threshold,
            None => false,
        },
    }
}

/// A file whose modification proves that a build step produced output.
///
/// Take a snapshot before running the step and call `verify_changed` after
/// it; the step counts as successful only if the file exists afterwards and
/// is strictly newer than it was at snapshot time.
#[derive(Debug, Clone)]
pub struct CheckFile {
    path: PathBuf,
    snapshot: Option<SystemTime>,
}

impl CheckFile {
    /// Record the current modification time of `path`
    pub fn snapshot(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let snapshot = last_modified(&path)?;
        debug!("Check file {} last modified {:?}", path.display(), snapshot);
        Ok(Self { path, snapshot })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_changed(&self) -> Result<bool> {
        let current = last_modified(&self.path)?;
        Ok(is_newer(current, self.snapshot, Duration::ZERO))
    }

    pub fn verify_changed(&self) -> Result<()> {
        if self.has_changed()? {
            Ok(())
        } else {
            Err(Error::CheckFileUnchanged {
                path: self.path.clone(),
            })
        }
    }
}

/// Run `step`, then require the optional check file to have been modified.
///
/// Without a check file this just runs the step.
pub fn run_checked<T>(check_file: Option<&Path>, step: impl FnOnce() -> Result<T>) -> Result<T> {
    let check = check_file.map(CheckFile::snapshot).transpose()?;
    let output = step()?;
    if let Some(check) = check {
        check.verify_changed()?;
    }
    Ok(output)
}

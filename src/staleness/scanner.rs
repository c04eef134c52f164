//! Source file enumeration
//!
//! Walks a source root and yields the files selected by the include and
//! exclude patterns. Paths are matched relative to the root in `/` form.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::path::{to_slash_path, PatternSet};

/// A matched file under a source root
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceFile {
    /// Path as found on disk (root joined with the relative path)
    pub path: PathBuf,
    /// Path relative to the source root, `/`-separated
    pub relative: String,
}

/// Selects source files by glob patterns
#[derive(Debug, Clone)]
pub struct SourceScanner {
    patterns: PatternSet,
}

impl SourceScanner {
    pub fn new<S: AsRef<str>>(includes: &[S], excludes: &[S]) -> Result<Self> {
        Ok(Self {
            patterns: PatternSet::new(includes, excludes)?,
        })
    }

    /// List matching files under `root`, sorted by path.
    ///
    /// A root that is not a directory contributes nothing. Symlinks whose
    /// target does not exist are skipped; any other error while walking an
    /// existing root aborts the scan.
    pub fn scan(&self, root: &Path) -> Result<Vec<SourceFile>> {
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if is_dangling_link(&e) => {
                    debug!("Skipping broken symlink {}", e.path().unwrap_or(root).display());
                    continue;
                }
                Err(e) => {
                    return Err(Error::Scan {
                        root: root.to_path_buf(),
                        message: e.to_string(),
                    })
                }
            };

            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(root)
                .map_err(|_| Error::Scan {
                    root: root.to_path_buf(),
                    message: format!("{} is outside the root", entry.path().display()),
                })?;
            let relative = to_slash_path(relative);

            if self.patterns.matches(&relative) {
                files.push(SourceFile {
                    path: entry.path().to_path_buf(),
                    relative,
                });
            }
        }

        Ok(files)
    }
}

/// A link that points at nothing; its target cannot be a source
fn is_dangling_link(error: &walkdir::Error) -> bool {
    let not_found = error
        .io_error()
        .is_some_and(|e| e.kind() == ErrorKind::NotFound);

    not_found
        && error
            .path()
            .and_then(|path| fs::symlink_metadata(path).ok())
            .is_some_and(|metadata| metadata.file_type().is_symlink())
}

//! Shared test utilities for integration tests.
//!
//! This module provides a temporary source tree fixture whose files carry
//! explicit modification times, plus common YAML documents.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new()
//!         .with_file_at("src/Foo.java", 1_000)
//!         .with_file_at("out/Foo.class", 2_000);
//!     // ... test code
//! }
//! ```

use assert_fs::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use super::configs;
    #[allow(unused_imports)]
    pub use super::{at, set_mtime};
    pub use super::TestFixture;
}

/// Common YAML documents for testing.
#[allow(dead_code)]
pub mod configs {
    /// A small multi-module project listed out of order.
    pub const REACTOR: &str = r#"
- id: org.example:app:1.0
  parent: org.example:parent
  dependencies:
    - org.example:core
    - org.apache:commons-lang
- id: org.example:core:1.0
  parent: org.example:parent
- id: org.example:parent:1.0
"#;

    /// Two units depending on each other.
    pub const CYCLE: &str = r#"
- id: org.example:a:1.0
  dependencies: [org.example:b]
- id: org.example:b:1.0
  dependencies: [org.example:a]
"#;

    /// Suffix mapping from sources to class files.
    pub const CLASSES: &str = r#"
sourceRoots: [src]
outputDirectory: out
outputFileEndings: [.class]
"#;

    /// Both policies set; explicit targets are used.
    pub const CONFLICTING: &str = r#"
sourceRoots: [src]
outputDirectory: out
outputFiles: [generated.xml]
outputFileEndings: [.txt]
"#;
}

/// Fixed point in time, `secs` seconds after the epoch
#[allow(dead_code)]
pub fn at(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
}

/// Set the modification time of an existing file
#[allow(dead_code)]
pub fn set_mtime(path: &Path, time: SystemTime) {
    File::options()
        .write(true)
        .open(path)
        .and_then(|file| file.set_modified(time))
        .expect("Failed to set modification time");
}

/// A temporary directory tree with controlled modification times.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Add an empty file modified `secs` seconds after the epoch.
    #[allow(dead_code)]
    pub fn with_file_at(self, path: &str, secs: u64) -> Self {
        self.with_file_modified(path, at(secs))
    }

    /// Add an empty file with the given modification time.
    #[allow(dead_code)]
    pub fn with_file_modified(self, path: &str, time: SystemTime) -> Self {
        let child = self.temp_dir.child(path);
        if let Some(parent) = child.path().parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        child.touch().expect("Failed to create file");
        set_mtime(child.path(), time);
        self
    }

    /// Add a file with the given path and content.
    #[allow(dead_code)]
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `path` inside the fixture.
    pub fn join(&self, path: &str) -> PathBuf {
        self.temp_dir.path().join(path)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_file_at() {
        let fixture = TestFixture::new().with_file_at("a/b/C.java", 1_000);
        let modified = fs::metadata(fixture.join("a/b/C.java"))
            .unwrap()
            .modified()
            .unwrap();
        assert_eq!(modified, at(1_000));
    }

    #[test]
    fn test_configs_are_valid_yaml() {
        for config in [
            configs::REACTOR,
            configs::CYCLE,
            configs::CLASSES,
            configs::CONFLICTING,
        ] {
            serde_yaml::from_str::<serde_yaml::Value>(config).expect("Config should be valid YAML");
        }
    }
}

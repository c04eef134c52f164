//! Path matching utilities for source scanning

use std::path::{Component, Path};

use glob::{MatchOptions, Pattern};

use crate::error::{Error, Result};

/// `*` and `?` stay within one directory; only `**` crosses separators.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Match a relative, `/`-separated path against a glob pattern
#[cfg(test)]
pub(crate) fn glob_match(pattern: &str, path: &str) -> Result<bool> {
    let pattern = Pattern::new(pattern).map_err(Error::Glob)?;
    Ok(pattern.matches_with(path, MATCH_OPTIONS))
}

/// Render a relative path with `/` separators regardless of platform
pub fn to_slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Compiled include and exclude patterns.
///
/// A path is selected when it matches at least one include and no exclude.
#[derive(Debug, Clone)]
pub struct PatternSet {
    includes: Vec<Pattern>,
    excludes: Vec<Pattern>,
}

impl PatternSet {
    pub fn new<I, E, S>(includes: I, excludes: E) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        E: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let compile = |p: S| Pattern::new(p.as_ref()).map_err(Error::Glob);
        Ok(Self {
            includes: includes.into_iter().map(compile).collect::<Result<_>>()?,
            excludes: excludes.into_iter().map(compile).collect::<Result<_>>()?,
        })
    }

    pub fn matches(&self, path: &str) -> bool {
        self.includes
            .iter()
            .any(|p| p.matches_with(path, MATCH_OPTIONS))
            && !self
                .excludes
                .iter()
                .any(|p| p.matches_with(path, MATCH_OPTIONS))
    }
}

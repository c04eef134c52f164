//! Build unit identities and descriptors.
//!
//! A `BuildUnit` is one candidate project taking part in build ordering. Its
//! identity is the versionless `groupId:artifactId` pair held by `UnitKey`;
//! the version is carried for reporting only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Versionless identity of a build unit (`groupId:artifactId`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UnitKey {
    group_id: String,
    artifact_id: String,
}

impl UnitKey {
    /// Create a key from its two coordinates
    pub fn new(group_id: impl Into<String>, artifact_id: impl Into<String>) -> Self {
        Self {
            group_id: group_id.into(),
            artifact_id: artifact_id.into(),
        }
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }

    pub fn artifact_id(&self) -> &str {
        &self.artifact_id
    }
}

impl fmt::Display for UnitKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group_id, self.artifact_id)
    }
}

/// Parses `groupId:artifactId`. A trailing `:version` is accepted and dropped.
impl FromStr for UnitKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (key, _version) = split_coordinates(s)?;
        Ok(key)
    }
}

impl TryFrom<String> for UnitKey {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<UnitKey> for String {
    fn from(key: UnitKey) -> Self {
        key.to_string()
    }
}

/// Split `g:a` or `g:a:v` into a key and an optional version.
pub(crate) fn split_coordinates(value: &str) -> Result<(UnitKey, Option<String>)> {
    let parts: Vec<&str> = value.trim().split(':').collect();
    let invalid = |message: &str| Error::InvalidUnitKey {
        value: value.to_string(),
        message: message.to_string(),
    };

    if parts.len() < 2 || parts.len() > 3 {
        return Err(invalid("expected groupId:artifactId[:version]"));
    }
    if parts.iter().any(|p| p.is_empty()) {
        return Err(invalid("coordinates must not be empty"));
    }

    let key = UnitKey::new(parts[0], parts[1]);
    let version = parts.get(2).map(|v| v.to_string());
    Ok((key, version))
}

/// One candidate project to be ordered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildUnit {
    key: UnitKey,
    version: String,
    dependencies: Vec<UnitKey>,
    parent: Option<UnitKey>,
}

impl BuildUnit {
    /// Create a unit with no dependencies and no parent
    pub fn new(
        group_id: impl Into<String>,
        artifact_id: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            key: UnitKey::new(group_id, artifact_id),
            version: version.into(),
            dependencies: Vec::new(),
            parent: None,
        }
    }

    /// Add a declared dependency
    pub fn with_dependency(mut self, dependency: UnitKey) -> Self {
        self.dependencies.push(dependency);
        self
    }

    /// Set the parent reference
    pub fn with_parent(mut self, parent: UnitKey) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn key(&self) -> &UnitKey {
        &self.key
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn dependencies(&self) -> &[UnitKey] {
        &self.dependencies
    }

    pub fn parent(&self) -> Option<&UnitKey> {
        self.parent.as_ref()
    }

    /// Full `groupId:artifactId:version` identity used in messages
    pub fn id(&self) -> String {
        format!("{}:{}", self.key, self.version)
    }
}

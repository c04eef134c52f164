//! Build-on-demand planning
//!
//! Wraps the orderer for callers that build missing units on the fly. Units
//! that already completed elsewhere in the session, or that are currently
//! being built by the enclosing build, are removed before ordering so they
//! are not built twice.

use std::collections::BTreeSet;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::ordering::order_dependency_projects;
use crate::unit::{BuildUnit, UnitKey};

/// Candidates to build plus what is already taken care of
#[derive(Debug, Clone, Default)]
pub struct ResolutionRequest {
    /// Units whose artifacts are missing
    pub candidates: Vec<BuildUnit>,
    /// Units already built during this session
    pub completed_builds: BTreeSet<UnitKey>,
    /// Units currently being built by the enclosing build
    pub pending: BTreeSet<UnitKey>,
}

impl ResolutionRequest {
    pub fn new(candidates: Vec<BuildUnit>) -> Self {
        Self {
            candidates,
            ..Self::default()
        }
    }

    pub fn with_completed_builds(mut self, completed: impl IntoIterator<Item = UnitKey>) -> Self {
        self.completed_builds.extend(completed);
        self
    }

    pub fn with_pending(mut self, pending: impl IntoIterator<Item = UnitKey>) -> Self {
        self.pending.extend(pending);
        self
    }

    /// Remove completed and in-progress units, then order what is left
    pub fn plan(&self) -> Result<Vec<BuildUnit>> {
        let remaining: Vec<BuildUnit> = self
            .candidates
            .iter()
            .filter(|unit| !self.pending.contains(unit.key()))
            .filter(|unit| !self.completed_builds.contains(unit.key()))
            .cloned()
            .collect();

        debug!(
            "Remaining build candidates: [{}]",
            remaining
                .iter()
                .map(BuildUnit::id)
                .collect::<Vec<_>>()
                .join(", ")
        );

        if remaining.is_empty() {
            info!("Nothing to build");
            return Ok(Vec::new());
        }

        info!("Found {} build candidates", remaining.len());
        order_dependency_projects(remaining)
    }
}

/// Fail if any unit is still unresolved after a build pass
pub fn ensure_resolved(remaining: &[BuildUnit]) -> Result<()> {
    if remaining.is_empty() {
        return Ok(());
    }

    Err(Error::UnresolvedUnits {
        keys: remaining.iter().map(BuildUnit::id).collect(),
    })
}

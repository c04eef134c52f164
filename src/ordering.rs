//! Dependency ordering of build candidates
//!
//! This module turns an unordered set of `BuildUnit`s into a safe build
//! sequence: every unit comes after the candidates it depends on and after
//! its parent, when those are part of the same candidate set. References to
//! units outside the set are ignored because they are assumed to be built
//! already.
//!
//! ## Process
//!
//! 1.  **Identity Check**: Each candidate is keyed by `groupId:artifactId`.
//!     Two candidates with the same key (whatever their versions) are a
//!     configuration error.
//!
//! 2.  **Graph Population**: Parent relationships are added first. A
//!     dependency that points the other way along an existing parent
//!     relationship (a parent declaring a dependency on its own child) is
//!     dropped, since the parent has to be built first anyway. A child that
//!     both inherits from and depends on the same unit yields a single
//!     constraint.
//!
//! 3.  **Sorting**: Kahn's algorithm over the arena graph. Units that are not
//!     constrained relative to each other keep their input order.
//!
//! Cycles are reported as `Error::DependencyCycle` when any dependency edge
//! takes part in the loop, and as `Error::ParentCycle` when the loop is made
//! of parent edges only.

use std::collections::HashMap;

use log::debug;

use crate::error::{Error, Result};
use crate::graph::{Cycle, DependencyGraph, EdgeKind};
use crate::unit::{BuildUnit, UnitKey};

/// Order build candidates so that dependencies and parents come first.
///
/// An empty input (including `None`) produces an empty order. On failure no
/// partial order is returned.
pub fn order_dependency_projects<I>(candidates: I) -> Result<Vec<BuildUnit>>
where
    I: IntoIterator<Item = BuildUnit>,
{
    let units: Vec<BuildUnit> = candidates.into_iter().collect();
    if units.is_empty() {
        return Ok(Vec::new());
    }

    let mut graph = DependencyGraph::new();
    let index = populate_vertices(&mut graph, &units)?;
    graph_relationships(&mut graph, &index, &units);

    let order = graph
        .topological_order()
        .map_err(|cycle| cycle_error(&graph, &cycle))?;

    debug!("Ordered {} build candidates", order.len());

    let mut slots: Vec<Option<BuildUnit>> = units.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|vertex| slots[vertex].take())
        .collect())
}

/// Add one vertex per candidate, rejecting duplicate identities
fn populate_vertices(
    graph: &mut DependencyGraph,
    units: &[BuildUnit],
) -> Result<HashMap<UnitKey, usize>> {
    let mut index = HashMap::with_capacity(units.len());

    for unit in units {
        if let Some(&existing) = index.get(unit.key()) {
            let first: &BuildUnit = &units[existing];
            return Err(Error::DuplicateUnit {
                key: unit.key().to_string(),
                first: first.id(),
                second: unit.id(),
            });
        }

        let vertex = graph.add_vertex(unit.key().to_string());
        index.insert(unit.key().clone(), vertex);
    }

    Ok(index)
}

/// Add parent and dependency edges between candidates
fn graph_relationships(
    graph: &mut DependencyGraph,
    index: &HashMap<UnitKey, usize>,
    units: &[BuildUnit],
) {
    for (child, unit) in units.iter().enumerate() {
        if let Some(&parent) = unit.parent().and_then(|p| index.get(p)) {
            graph.add_edge(parent, child, EdgeKind::Parent);
        }
    }

    for (dependent, unit) in units.iter().enumerate() {
        for dependency in unit.dependencies() {
            let Some(&dependency) = index.get(dependency) else {
                continue;
            };

            if graph.edge_kind(dependent, dependency) == Some(EdgeKind::Parent) {
                debug!(
                    "Ignoring dependency of {} on its child {}; parent is built first",
                    graph.label(dependent),
                    graph.label(dependency)
                );
                continue;
            }

            graph.add_edge(dependency, dependent, EdgeKind::Dependency);
        }
    }
}

/// Describe a cycle by one of its edges and the full loop
fn cycle_error(graph: &DependencyGraph, cycle: &Cycle) -> Error {
    let len = cycle.vertices.len();
    let edge = cycle
        .kinds
        .iter()
        .position(|&k| k == EdgeKind::Dependency)
        .unwrap_or(0);
    let kind = cycle.kinds[edge];
    let before = cycle.vertices[edge];
    let after = cycle.vertices[(edge + 1) % len];

    // Render as "project -> what it needs -> ... -> project", starting at the
    // unit whose edge is reported and walking the loop backwards
    let path: Vec<&str> = (0..=len)
        .map(|step| graph.label(cycle.vertices[(edge + 1 + len - step) % len]))
        .collect();
    let cycle = path.join(" -> ");

    match kind {
        EdgeKind::Dependency => Error::DependencyCycle {
            dependency: graph.label(before).to_string(),
            project: graph.label(after).to_string(),
            cycle,
        },
        EdgeKind::Parent => Error::ParentCycle {
            parent: graph.label(before).to_string(),
            project: graph.label(after).to_string(),
            cycle,
        },
    }
}

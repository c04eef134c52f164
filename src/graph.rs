//! Arena-indexed dependency graph
//!
//! Vertices are plain `usize` indices handed out in insertion order, and an
//! edge `before -> after` records that `before` must be built first. Two edge
//! kinds exist so cycle reports can say whether a dependency or a parent
//! relationship closed the loop.
//!
//! Sorting uses Kahn's algorithm. Among vertices that are ready at the same
//! time the lowest index goes first, so unrelated vertices keep their
//! insertion order and the result is reproducible.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Why one vertex must precede another
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// `after` declares a dependency on `before`
    Dependency,
    /// `before` is the parent of `after`
    Parent,
}

/// A cycle found while sorting.
///
/// `vertices` lists the cycle in build order: each vertex must precede the
/// next one, and the last must precede the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub vertices: Vec<usize>,
    /// Kind of each edge, `kinds[i]` being the edge leaving `vertices[i]`
    pub kinds: Vec<EdgeKind>,
}

/// Directed graph over build units
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    labels: Vec<String>,
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
    edges: HashMap<(usize, usize), EdgeKind>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a vertex and return its index
    pub fn add_vertex(&mut self, label: impl Into<String>) -> usize {
        self.labels.push(label.into());
        self.successors.push(Vec::new());
        self.predecessors.push(Vec::new());
        self.labels.len() - 1
    }

    pub fn label(&self, vertex: usize) -> &str {
        &self.labels[vertex]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Add an ordering constraint.
    ///
    /// Returns `false` if the constraint already existed. A parent edge and a
    /// dependency edge between the same pair collapse into one constraint,
    /// recorded as `Parent`.
    pub fn add_edge(&mut self, before: usize, after: usize, kind: EdgeKind) -> bool {
        if let Some(existing) = self.edges.get_mut(&(before, after)) {
            if kind == EdgeKind::Parent {
                *existing = EdgeKind::Parent;
            }
            return false;
        }

        self.edges.insert((before, after), kind);
        self.successors[before].push(after);
        self.predecessors[after].push(before);
        true
    }

    pub fn edge_kind(&self, before: usize, after: usize) -> Option<EdgeKind> {
        self.edges.get(&(before, after)).copied()
    }

    /// Sort all vertices so that every edge points forward.
    ///
    /// Fails with the first cycle found among the vertices that could not be
    /// scheduled.
    pub fn topological_order(&self) -> Result<Vec<usize>, Cycle> {
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(Vec::len).collect();
        let mut ready: BinaryHeap<Reverse<usize>> = in_degree
            .iter()
            .enumerate()
            .filter(|(_, &d)| d == 0)
            .map(|(v, _)| Reverse(v))
            .collect();

        let mut order = Vec::with_capacity(self.len());
        while let Some(Reverse(vertex)) = ready.pop() {
            order.push(vertex);
            for &next in &self.successors[vertex] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.push(Reverse(next));
                }
            }
        }

        if order.len() == self.len() {
            Ok(order)
        } else {
            Err(self.find_cycle(&in_degree))
        }
    }

    /// Walk backwards from an unscheduled vertex until one repeats.
    ///
    /// Every unscheduled vertex still has an unscheduled predecessor, so the
    /// walk cannot stop before closing a loop.
    fn find_cycle(&self, in_degree: &[usize]) -> Cycle {
        let stuck = |v: usize| in_degree[v] > 0;
        let mut position: HashMap<usize, usize> = HashMap::new();
        let mut walk: Vec<usize> = Vec::new();

        let mut current = (0..self.len()).find(|&v| stuck(v)).unwrap_or_default();
        while !position.contains_key(&current) {
            position.insert(current, walk.len());
            walk.push(current);
            current = self.predecessors[current]
                .iter()
                .copied()
                .filter(|&p| stuck(p))
                .min()
                .unwrap_or(current);
        }

        // walk runs against the edges; flip it into build order
        let mut vertices = walk.split_off(position[&current]);
        vertices.reverse();

        let kinds = vertices
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let next = vertices[(i + 1) % vertices.len()];
                self.edge_kind(v, next).unwrap_or(EdgeKind::Dependency)
            })
            .collect();

        Cycle { vertices, kinds }
    }
}

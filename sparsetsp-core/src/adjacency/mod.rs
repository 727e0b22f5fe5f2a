//! Undirected adjacency structure and its randomized builder.
//!
//! [`Adjacency`] stores one ordered neighbour set per vertex. Edges are only
//! ever inserted symmetrically, so `v ∈ neighbours(u)` holds exactly when
//! `u ∈ neighbours(v)`, and self pairs are never stored.

mod builder;

pub use builder::{
    AdjacencyBuilder, AdjacencyReport, MIN_ATTEMPT_CEILING, attempt_ceiling, build_adjacency,
};

use std::collections::BTreeSet;

/// Index of a vertex in `[0, n)`.
pub type VertexId = usize;

/// Per-vertex neighbour sets of an undirected simple graph.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Adjacency {
    neighbours: Vec<BTreeSet<VertexId>>,
}

impl Adjacency {
    /// Creates `vertex_count` isolated vertices.
    ///
    /// # Examples
    /// ```
    /// use sparsetsp_core::Adjacency;
    /// let graph = Adjacency::with_vertices(3);
    /// assert_eq!(graph.vertex_count(), 3);
    /// assert_eq!(graph.edge_count(), 0);
    /// ```
    #[must_use]
    pub fn with_vertices(vertex_count: usize) -> Self {
        Self {
            neighbours: vec![BTreeSet::new(); vertex_count],
        }
    }

    /// Returns the number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.neighbours.len()
    }

    /// Returns the number of distinct neighbours of `vertex`, or zero when the
    /// vertex does not exist.
    #[must_use]
    pub fn degree(&self, vertex: VertexId) -> usize {
        self.neighbours.get(vertex).map_or(0, BTreeSet::len)
    }

    /// Returns the neighbours of `vertex` in ascending order.
    #[must_use]
    pub fn neighbours(&self, vertex: VertexId) -> Option<&BTreeSet<VertexId>> {
        self.neighbours.get(vertex)
    }

    /// Returns `true` when the undirected edge `{left, right}` is present.
    #[must_use]
    pub fn contains_edge(&self, left: VertexId, right: VertexId) -> bool {
        self.neighbours
            .get(left)
            .is_some_and(|set| set.contains(&right))
    }

    /// Returns the number of undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Iterates every undirected edge once as `(u, v)` with `u < v`, in
    /// ascending lexicographic order.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.neighbours
            .iter()
            .enumerate()
            .flat_map(|(u, set)| set.range(u.saturating_add(1)..).map(move |&v| (u, v)))
    }

    /// Returns the smallest and largest vertex degree, or `None` for an empty
    /// graph.
    #[must_use]
    pub fn degree_range(&self) -> Option<(usize, usize)> {
        let degrees = self.neighbours.iter().map(BTreeSet::len);
        let min = degrees.clone().min()?;
        let max = degrees.max()?;
        Some((min, max))
    }

    /// Inserts `{left, right}` into both neighbour sets.
    ///
    /// Returns `false` without mutating anything when the pair is a self
    /// pair, refers to a missing vertex, or is already present.
    pub(crate) fn insert_edge(&mut self, left: VertexId, right: VertexId) -> bool {
        if left == right
            || right >= self.neighbours.len()
            || self.contains_edge(left, right)
        {
            return false;
        }
        let inserted = self
            .neighbours
            .get_mut(left)
            .is_some_and(|set| set.insert(right));
        if inserted && let Some(set) = self.neighbours.get_mut(right) {
            set.insert(left);
        }
        inserted
    }

    /// Raw neighbour sets, used by invariant checks that must inspect
    /// asymmetric states built by hand in tests.
    pub(crate) fn sets(&self) -> &[BTreeSet<VertexId>] {
        &self.neighbours
    }

    #[cfg(test)]
    pub(crate) fn from_sets(neighbours: Vec<BTreeSet<VertexId>>) -> Self {
        Self { neighbours }
    }
}

#[cfg(test)]
mod tests;

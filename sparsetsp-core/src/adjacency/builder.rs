//! Randomized construction of degree-bounded graphs around a Hamiltonian
//! cycle.
//!
//! Construction runs in two phases. The base cycle `(i, (i + 1) mod n)` is
//! laid down first, which keeps every vertex on one tour no matter what the
//! augmentation does. Each vertex is then visited in index order: a target
//! degree is drawn from the configured bounds, and random candidates are
//! proposed until the vertex reaches the target or the attempt ceiling is
//! hit. Hitting the ceiling is expected once the neighbourhood saturates and
//! is not reported as an error.

use rand::Rng;
use tracing::{Span, debug, field, instrument, trace};

use super::{Adjacency, VertexId};
use crate::{
    error::{GenerationError, Result},
    params::DegreeBounds,
};

/// Lower bound on the number of candidate draws per vertex.
pub const MIN_ATTEMPT_CEILING: usize = 1_000;

/// Candidate draws allowed per vertex for each vertex in the graph, when this
/// exceeds [`MIN_ATTEMPT_CEILING`].
const ATTEMPTS_PER_VERTEX: usize = 10;

/// Returns the per-vertex attempt ceiling, `max(1000, 10 * vertex_count)`.
///
/// # Examples
/// ```
/// use sparsetsp_core::attempt_ceiling;
/// assert_eq!(attempt_ceiling(4), 1_000);
/// assert_eq!(attempt_ceiling(5_000), 50_000);
/// ```
#[must_use]
pub const fn attempt_ceiling(vertex_count: usize) -> usize {
    let scaled = vertex_count.saturating_mul(ATTEMPTS_PER_VERTEX);
    if scaled > MIN_ATTEMPT_CEILING {
        scaled
    } else {
        MIN_ATTEMPT_CEILING
    }
}

/// Statistics gathered while augmenting a graph.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AdjacencyReport {
    saturated_vertices: usize,
    attempts: usize,
}

impl AdjacencyReport {
    /// Number of vertices whose augmentation stopped at the attempt ceiling
    /// below their drawn target degree.
    #[must_use]
    pub const fn saturated_vertices(&self) -> usize {
        self.saturated_vertices
    }

    /// Total number of candidate draws across all vertices.
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }
}

/// Builds [`Adjacency`] structures for a fixed set of degree bounds.
#[derive(Clone, Copy, Debug)]
pub struct AdjacencyBuilder {
    bounds: DegreeBounds,
}

struct VertexOutcome {
    attempts: usize,
    saturated: bool,
}

impl AdjacencyBuilder {
    /// Creates a builder using `bounds`.
    #[must_use]
    pub const fn new(bounds: DegreeBounds) -> Self {
        Self { bounds }
    }

    /// Builds a graph with `vertex_count` vertices, drawing from `rng`.
    ///
    /// # Errors
    /// Returns [`GenerationError::ZeroVertices`] when `vertex_count` is zero.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use sparsetsp_core::{AdjacencyBuilder, DegreeBounds};
    ///
    /// let bounds = DegreeBounds::new(2, 4).expect("bounds must be valid");
    /// let mut rng = SmallRng::seed_from_u64(7);
    /// let graph = AdjacencyBuilder::new(bounds)
    ///     .build(10, &mut rng)
    ///     .expect("build must succeed");
    /// assert!(graph.contains_edge(9, 0));
    /// assert!((0..10).all(|v| graph.degree(v) <= 4));
    /// ```
    pub fn build<R: Rng + ?Sized>(&self, vertex_count: usize, rng: &mut R) -> Result<Adjacency> {
        self.build_with_report(vertex_count, rng)
            .map(|(graph, _)| graph)
    }

    /// Builds a graph and returns the augmentation statistics alongside it.
    ///
    /// # Errors
    /// Returns [`GenerationError::ZeroVertices`] when `vertex_count` is zero.
    #[instrument(
        name = "adjacency.build",
        err,
        skip(self, rng),
        fields(
            min_degree = self.bounds.min_degree(),
            max_degree = self.bounds.max_degree(),
            edges = field::Empty,
        ),
    )]
    pub fn build_with_report<R: Rng + ?Sized>(
        &self,
        vertex_count: usize,
        rng: &mut R,
    ) -> Result<(Adjacency, AdjacencyReport)> {
        if vertex_count == 0 {
            return Err(GenerationError::ZeroVertices);
        }

        let mut graph = Adjacency::with_vertices(vertex_count);
        embed_cycle(&mut graph);

        let ceiling = attempt_ceiling(vertex_count);
        let mut report = AdjacencyReport::default();
        for vertex in 0..vertex_count {
            let outcome = self.augment_vertex(&mut graph, vertex, ceiling, rng);
            report.attempts = report.attempts.saturating_add(outcome.attempts);
            if outcome.saturated {
                report.saturated_vertices = report.saturated_vertices.saturating_add(1);
            }
        }

        let edges = graph.edge_count();
        Span::current().record("edges", edges);
        debug!(
            edges,
            saturated_vertices = report.saturated_vertices,
            attempts = report.attempts,
            "adjacency built"
        );
        Ok((graph, report))
    }

    fn augment_vertex<R: Rng + ?Sized>(
        &self,
        graph: &mut Adjacency,
        vertex: VertexId,
        ceiling: usize,
        rng: &mut R,
    ) -> VertexOutcome {
        let max_degree = self.bounds.max_degree();
        let drawn = rng.gen_range(self.bounds.min_degree()..=max_degree);
        // The cycle edges are never given back, so the target only grows.
        let target = drawn.max(graph.degree(vertex));
        let vertex_count = graph.vertex_count();

        let mut attempts = 0_usize;
        while graph.degree(vertex) < target && attempts < ceiling {
            let candidate = rng.gen_range(0..vertex_count);
            attempts += 1;
            if candidate == vertex
                || graph.degree(vertex) >= max_degree
                || graph.degree(candidate) >= max_degree
            {
                continue;
            }
            graph.insert_edge(vertex, candidate);
        }

        let degree = graph.degree(vertex);
        let saturated = degree < target;
        if saturated {
            trace!(
                vertex,
                degree,
                target,
                attempts,
                "augmentation stopped at attempt ceiling"
            );
        }
        VertexOutcome {
            attempts,
            saturated,
        }
    }
}

/// Adds the edge `(i, (i + 1) mod n)` for every vertex. For `n == 1` the only
/// pair is a self pair and is dropped; for `n == 2` both pairs name the same
/// edge.
fn embed_cycle(graph: &mut Adjacency) {
    let vertex_count = graph.vertex_count();
    for vertex in 0..vertex_count {
        let next = vertex.saturating_add(1) % vertex_count;
        graph.insert_edge(vertex, next);
    }
}

/// Builds a graph with `vertex_count` vertices under `bounds`.
///
/// Shorthand for [`AdjacencyBuilder::build`].
///
/// # Errors
/// Returns [`GenerationError::ZeroVertices`] when `vertex_count` is zero.
pub fn build_adjacency<R: Rng + ?Sized>(
    vertex_count: usize,
    bounds: DegreeBounds,
    rng: &mut R,
) -> Result<Adjacency> {
    AdjacencyBuilder::new(bounds).build(vertex_count, rng)
}

//! Structural invariant checks for generated graphs.
//!
//! Every graph produced by [`crate::AdjacencyBuilder`] must be symmetric, free
//! of self loops, within the degree cap, and must contain the embedded
//! Hamiltonian cycle `(i, (i + 1) mod n)`. These checks verify those
//! properties on any [`Adjacency`], including one rebuilt from a parsed
//! document.

use thiserror::Error;
use tracing::{debug, instrument};

use crate::adjacency::{Adjacency, VertexId};

/// A broken structural invariant.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphInvariantViolation {
    /// A vertex listed itself as a neighbour.
    #[error("vertex {vertex} is adjacent to itself")]
    SelfLoop {
        /// The offending vertex.
        vertex: VertexId,
    },
    /// A vertex referenced a neighbour outside `[0, n)`.
    #[error("vertex {vertex} references unknown neighbour {neighbour}")]
    UnknownNeighbour {
        /// Vertex holding the dangling reference.
        vertex: VertexId,
        /// The missing neighbour.
        neighbour: VertexId,
    },
    /// An edge was only recorded in one direction.
    #[error("edge {origin} -> {target} has no matching backlink")]
    MissingBacklink {
        /// Vertex that lists the neighbour.
        origin: VertexId,
        /// Neighbour that does not list `origin`.
        target: VertexId,
    },
    /// A vertex exceeded the degree cap.
    #[error("vertex {vertex} has degree {degree}, above the limit of {limit}")]
    DegreeBounds {
        /// The offending vertex.
        vertex: VertexId,
        /// Observed degree.
        degree: usize,
        /// Configured cap.
        limit: usize,
    },
    /// An edge of the embedded Hamiltonian cycle was absent.
    #[error("cycle edge {from} -- {to} is missing")]
    MissingCycleEdge {
        /// Lower endpoint in cycle order.
        from: VertexId,
        /// Successor of `from` modulo the vertex count.
        to: VertexId,
    },
}

enum EvaluationMode<'a> {
    FailFast,
    Collect(&'a mut Vec<GraphInvariantViolation>),
}

impl EvaluationMode<'_> {
    fn record(
        &mut self,
        violation: GraphInvariantViolation,
    ) -> Result<(), GraphInvariantViolation> {
        match self {
            Self::FailFast => Err(violation),
            Self::Collect(sink) => {
                sink.push(violation);
                Ok(())
            }
        }
    }
}

/// Checks every invariant and returns the first violation found.
///
/// # Errors
/// Returns the first [`GraphInvariantViolation`] encountered, checking
/// neighbour validity, symmetry, the degree cap and finally the cycle.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use sparsetsp_core::{DegreeBounds, build_adjacency, check_invariants};
///
/// let bounds = DegreeBounds::new(2, 5).expect("bounds must be valid");
/// let graph = build_adjacency(32, bounds, &mut SmallRng::seed_from_u64(3))
///     .expect("build must succeed");
/// assert!(check_invariants(&graph, 5).is_ok());
/// ```
pub fn check_invariants(
    graph: &Adjacency,
    max_degree: usize,
) -> Result<(), GraphInvariantViolation> {
    evaluate(graph, max_degree, &mut EvaluationMode::FailFast)
}

/// Checks every invariant and returns all violations.
#[instrument(name = "invariants.collect", skip(graph), fields(vertices = graph.vertex_count()))]
#[must_use]
pub fn collect_violations(graph: &Adjacency, max_degree: usize) -> Vec<GraphInvariantViolation> {
    let mut violations = Vec::new();
    // Collect mode never short-circuits.
    let _ = evaluate(graph, max_degree, &mut EvaluationMode::Collect(&mut violations));
    if !violations.is_empty() {
        debug!(count = violations.len(), "invariant violations found");
    }
    violations
}

fn evaluate(
    graph: &Adjacency,
    max_degree: usize,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    check_neighbours(graph, mode)?;
    check_degree_bounds(graph, max_degree, mode)?;
    check_cycle(graph, mode)
}

fn check_neighbours(
    graph: &Adjacency,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    for (vertex, set) in graph.sets().iter().enumerate() {
        for &neighbour in set {
            if neighbour == vertex {
                mode.record(GraphInvariantViolation::SelfLoop { vertex })?;
            } else if neighbour >= graph.vertex_count() {
                mode.record(GraphInvariantViolation::UnknownNeighbour { vertex, neighbour })?;
            } else if !graph.contains_edge(neighbour, vertex) {
                mode.record(GraphInvariantViolation::MissingBacklink {
                    origin: vertex,
                    target: neighbour,
                })?;
            }
        }
    }
    Ok(())
}

fn check_degree_bounds(
    graph: &Adjacency,
    limit: usize,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    for vertex in 0..graph.vertex_count() {
        let degree = graph.degree(vertex);
        if degree > limit {
            mode.record(GraphInvariantViolation::DegreeBounds {
                vertex,
                degree,
                limit,
            })?;
        }
    }
    Ok(())
}

fn check_cycle(
    graph: &Adjacency,
    mode: &mut EvaluationMode<'_>,
) -> Result<(), GraphInvariantViolation> {
    let vertex_count = graph.vertex_count();
    for from in 0..vertex_count {
        let to = from.saturating_add(1) % vertex_count;
        if to != from && !graph.contains_edge(from, to) {
            mode.record(GraphInvariantViolation::MissingCycleEdge { from, to })?;
        }
    }
    Ok(())
}

/// Returns `true` when the graph contains every edge `(i, (i + 1) mod n)`.
#[must_use]
pub fn has_embedded_cycle(graph: &Adjacency) -> bool {
    check_cycle(graph, &mut EvaluationMode::FailFast).is_ok()
}

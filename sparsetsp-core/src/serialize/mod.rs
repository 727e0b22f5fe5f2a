//! Edge weighting and text serialization of generated graphs.
//!
//! Output uses the bracketed edge-list grammar read by the TSP benchmark:
//!
//! ```text
//! graph SparseTSP {
//!   "0";
//!   "1";
//!   "0" -- "1" [weight=12.500000];
//! }
//! ```
//!
//! Vertices are declared first in index order, followed by edges sorted by
//! `(u, v)` with `u < v`. Weights always carry six fractional digits.

use std::{collections::BTreeMap, io, io::Write};

use rand::Rng;
use tracing::{instrument, trace};

use crate::{
    adjacency::{Adjacency, VertexId},
    params::WeightRange,
};

/// Name of the graph emitted in every document.
pub const GRAPH_NAME: &str = "SparseTSP";

/// Weights keyed by canonical `(min, max)` vertex pairs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeWeights {
    weights: BTreeMap<(VertexId, VertexId), f64>,
}

impl EdgeWeights {
    /// Returns the weight of `{left, right}` in either orientation.
    #[must_use]
    pub fn get(&self, left: VertexId, right: VertexId) -> Option<f64> {
        self.weights.get(&canonical(left, right)).copied()
    }

    /// Returns the number of weighted edges.
    #[must_use]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Returns `true` when no edge carries a weight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Iterates `((u, v), weight)` sorted ascending by `(u, v)`.
    pub fn iter(&self) -> impl Iterator<Item = ((VertexId, VertexId), f64)> + '_ {
        self.weights.iter().map(|(&pair, &weight)| (pair, weight))
    }

    fn insert(&mut self, left: VertexId, right: VertexId, weight: f64) {
        self.weights.insert(canonical(left, right), weight);
    }
}

const fn canonical(left: VertexId, right: VertexId) -> (VertexId, VertexId) {
    if left <= right {
        (left, right)
    } else {
        (right, left)
    }
}

/// Assigns one weight to every undirected edge of `graph`.
///
/// Edges are visited by ascending `u`, then ascending neighbour `v`, keeping
/// only `u < v`. A fixed range yields its bound without consuming a draw;
/// otherwise each edge takes one inclusive uniform draw from `rng`.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use sparsetsp_core::{DegreeBounds, WeightRange, assign_weights, build_adjacency};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let bounds = DegreeBounds::new(2, 3).expect("bounds must be valid");
/// let graph = build_adjacency(6, bounds, &mut rng).expect("build must succeed");
/// let range = WeightRange::new(1.0, 10.0).expect("range must be valid");
/// let weights = assign_weights(&graph, &mut rng, range);
/// assert_eq!(weights.len(), graph.edge_count());
/// assert!(weights.iter().all(|(_, w)| range.contains(w)));
/// ```
pub fn assign_weights<R: Rng + ?Sized>(
    graph: &Adjacency,
    rng: &mut R,
    range: WeightRange,
) -> EdgeWeights {
    let mut weights = EdgeWeights::default();
    for (u, v) in graph.edges() {
        let weight = if range.is_fixed() {
            range.min()
        } else {
            rng.gen_range(range.min()..=range.max())
        };
        weights.insert(u, v, weight);
    }
    weights
}

/// Writes `graph` and its `weights` to `writer`.
///
/// Only edges present in `weights` are emitted, so callers must pass the map
/// produced by [`assign_weights`] for the same graph.
///
/// # Errors
/// Propagates any [`io::Error`] raised by `writer`.
pub fn write_graph(
    graph: &Adjacency,
    weights: &EdgeWeights,
    mut writer: impl Write,
) -> io::Result<()> {
    writeln!(writer, "graph {GRAPH_NAME} {{")?;
    for vertex in 0..graph.vertex_count() {
        writeln!(writer, "  \"{vertex}\";")?;
    }
    for ((u, v), weight) in weights.iter() {
        writeln!(writer, "  \"{u}\" -- \"{v}\" [weight={}];", format_weight(weight))?;
    }
    writeln!(writer, "}}")?;
    writer.flush()
}

/// Formats a weight as a fixed-point decimal with six fractional digits.
///
/// # Examples
/// ```
/// assert_eq!(sparsetsp_core::format_weight(5.0), "5.000000");
/// ```
#[must_use]
pub fn format_weight(weight: f64) -> String {
    format!("{weight:.6}")
}

/// Converts finished graphs into text documents.
#[derive(Clone, Copy, Debug)]
pub struct GraphSerializer {
    range: WeightRange,
}

impl GraphSerializer {
    /// Creates a serializer drawing weights from `range`.
    #[must_use]
    pub const fn new(range: WeightRange) -> Self {
        Self { range }
    }

    /// Assigns weights and writes the document to `writer`.
    ///
    /// # Errors
    /// Propagates any [`io::Error`] raised by `writer`.
    #[instrument(
        name = "serializer.write",
        err,
        skip(self, graph, rng, writer),
        fields(vertices = graph.vertex_count()),
    )]
    pub fn write<R: Rng + ?Sized>(
        &self,
        graph: &Adjacency,
        rng: &mut R,
        writer: impl Write,
    ) -> io::Result<EdgeWeights> {
        let weights = assign_weights(graph, rng, self.range);
        trace!(edges = weights.len(), "weights assigned");
        write_graph(graph, &weights, writer)?;
        Ok(weights)
    }

    /// Assigns weights and renders the document into a string.
    ///
    /// # Examples
    /// ```
    /// use rand::{SeedableRng, rngs::SmallRng};
    /// use sparsetsp_core::{DegreeBounds, GraphSerializer, WeightRange, build_adjacency};
    ///
    /// let mut rng = SmallRng::seed_from_u64(9);
    /// let bounds = DegreeBounds::new(2, 2).expect("bounds must be valid");
    /// let graph = build_adjacency(3, bounds, &mut rng).expect("build must succeed");
    /// let range = WeightRange::new(5.0, 5.0).expect("range must be valid");
    /// let text = GraphSerializer::new(range).serialize(&graph, &mut rng);
    /// assert!(text.contains("\"0\" -- \"1\" [weight=5.000000];"));
    /// ```
    #[must_use]
    pub fn serialize<R: Rng + ?Sized>(&self, graph: &Adjacency, rng: &mut R) -> String {
        let weights = assign_weights(graph, rng, self.range);
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = write_graph(graph, &weights, &mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests;

//! Pre-built benchmark inputs.
//!
//! Every fixture is derived from a fixed seed so repeated benchmark runs
//! measure the same graphs.

use rand::{SeedableRng, rngs::SmallRng};
use sparsetsp_core::{Adjacency, GraphDocument, GraphSerializer, build_adjacency};

use crate::{error::BenchSetupError, params::GraphBenchParams};

/// A generated graph together with its rendered document.
#[derive(Clone, Debug)]
pub struct RenderedGraph {
    /// Adjacency built for the run.
    pub graph: Adjacency,
    /// Weighted document text written for `graph`.
    pub document: String,
}

/// Builds and renders one graph from `seed`, drawing weights from the same
/// stream after construction.
///
/// # Errors
/// Returns [`BenchSetupError::Generation`] when the parameters are invalid.
pub fn rendered_graph(
    params: &GraphBenchParams,
    seed: u64,
) -> Result<RenderedGraph, BenchSetupError> {
    let graph_params = params.graph_params()?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let graph = build_adjacency(params.vertex_count, graph_params.degree, &mut rng)?;
    let document = GraphSerializer::new(graph_params.weights).serialize(&graph, &mut rng);
    Ok(RenderedGraph { graph, document })
}

/// Parses `rendered` back and checks that it rebuilds the same adjacency.
///
/// # Errors
/// Returns [`BenchSetupError::Parse`] when the document is malformed.
pub fn reparse(rendered: &RenderedGraph) -> Result<bool, BenchSetupError> {
    let document = GraphDocument::parse(&rendered.document)?;
    Ok(document.to_adjacency()? == rendered.graph)
}

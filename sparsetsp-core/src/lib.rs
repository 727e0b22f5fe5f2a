//! Sparse TSP benchmark graph generator.
//!
//! Builds connected, degree-bounded undirected graphs that always contain the
//! Hamiltonian cycle `0 → 1 → … → n-1 → 0`, layers random edges on top up to
//! a per-vertex cap, and writes them as weighted `graph SparseTSP { ... }`
//! documents.
//!
//! All randomness flows through an explicit [`rand::Rng`] handle. A batch
//! seeds one stream and advances it across every requested size in order, so
//! a `(seed, sizes, parameters)` triple always yields byte-identical files.

mod adjacency;
mod batch;
mod error;
mod invariants;
mod params;
mod parse;
mod serialize;

pub use crate::{
    adjacency::{
        Adjacency, AdjacencyBuilder, AdjacencyReport, MIN_ATTEMPT_CEILING, VertexId,
        attempt_ceiling, build_adjacency,
    },
    batch::{
        BatchConfig, FILE_EXTENSION, GeneratedGraph, GraphBatch, generate_graph,
        generate_graph_with_report, graph_path,
    },
    error::{GenerationError, GenerationErrorCode, Result},
    invariants::{
        GraphInvariantViolation, check_invariants, collect_violations, has_embedded_cycle,
    },
    params::{DegreeBounds, GraphParams, WeightRange},
    parse::{DEFAULT_WEIGHT, DocumentEdge, GraphDocument, ParseError, ParseErrorCode},
    serialize::{
        EdgeWeights, GRAPH_NAME, GraphSerializer, assign_weights, format_weight, write_graph,
    },
};

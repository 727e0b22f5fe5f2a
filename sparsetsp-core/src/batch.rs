//! Sequential generation of graph batches from one seeded stream.
//!
//! A batch creates a single [`SmallRng`] from its seed and threads it through
//! every size in order, building the adjacency and then drawing the weights.
//! The stream is never reseeded, so each file depends on the draws consumed
//! by the sizes before it and the batch as a whole is reproducible.

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{Span, field, info, instrument};

use crate::{
    adjacency::{Adjacency, AdjacencyBuilder, AdjacencyReport},
    error::{GenerationError, Result},
    params::GraphParams,
    serialize::{EdgeWeights, assign_weights, write_graph},
};

/// Extension given to generated documents.
pub const FILE_EXTENSION: &str = "gv";

/// Configuration of a batch run.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Vertex counts to generate, in order.
    pub sizes: Vec<usize>,
    /// Directory receiving one file per size.
    pub output_dir: PathBuf,
    /// Degree and weight bounds shared by every graph.
    pub params: GraphParams,
    /// Seed of the shared random stream.
    pub seed: u64,
}

/// Outcome of generating one graph of a batch.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedGraph {
    /// Number of vertices.
    pub size: usize,
    /// File the document was written to.
    pub path: PathBuf,
    /// Number of undirected edges written.
    pub edge_count: usize,
    /// Vertices whose augmentation stopped at the attempt ceiling.
    pub saturated_vertices: usize,
}

/// A validated batch ready to run.
#[derive(Clone, Debug)]
pub struct GraphBatch {
    config: BatchConfig,
}

impl GraphBatch {
    /// Validates `config`.
    ///
    /// # Errors
    /// Returns [`GenerationError::EmptySizeList`] when no sizes are given and
    /// [`GenerationError::ZeroVertices`] when any size is zero.
    pub fn new(config: BatchConfig) -> Result<Self> {
        if config.sizes.is_empty() {
            return Err(GenerationError::EmptySizeList);
        }
        if config.sizes.contains(&0) {
            return Err(GenerationError::ZeroVertices);
        }
        Ok(Self { config })
    }

    /// Returns the validated configuration.
    #[must_use]
    pub const fn config(&self) -> &BatchConfig {
        &self.config
    }

    /// Returns the path the document for `size` is written to.
    #[must_use]
    pub fn output_path(&self, size: usize) -> PathBuf {
        graph_path(&self.config.output_dir, size)
    }

    /// Creates the output directory and writes one document per size.
    ///
    /// # Errors
    /// Returns [`GenerationError::Io`] when the directory or a file cannot be
    /// written. Files completed before the failure are left in place.
    #[instrument(
        name = "batch.run",
        err,
        skip(self),
        fields(
            sizes = self.config.sizes.len(),
            seed = self.config.seed,
            output_dir = %self.config.output_dir.display(),
            edges = field::Empty,
        ),
    )]
    pub fn run(&self) -> Result<Vec<GeneratedGraph>> {
        let output_dir = &self.config.output_dir;
        fs::create_dir_all(output_dir).map_err(|source| GenerationError::Io {
            path: output_dir.clone(),
            source,
        })?;

        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let mut generated = Vec::with_capacity(self.config.sizes.len());
        for &size in &self.config.sizes {
            generated.push(self.write_one(size, &mut rng)?);
        }

        let edges: usize = generated.iter().map(|graph| graph.edge_count).sum();
        Span::current().record("edges", edges);
        Ok(generated)
    }

    #[instrument(name = "batch.graph", err, skip(self, rng), fields(path = field::Empty))]
    fn write_one(&self, size: usize, rng: &mut SmallRng) -> Result<GeneratedGraph> {
        let path = self.output_path(size);
        Span::current().record("path", field::display(path.display()));

        let (graph, weights, report) = generate_graph_with_report(size, &self.config.params, rng)?;

        let io_error = |source| GenerationError::Io {
            path: path.clone(),
            source,
        };
        let file = File::create(&path).map_err(io_error)?;
        write_graph(&graph, &weights, BufWriter::new(file)).map_err(io_error)?;

        info!(
            size,
            edges = weights.len(),
            saturated_vertices = report.saturated_vertices(),
            "graph written"
        );
        Ok(GeneratedGraph {
            size,
            path,
            edge_count: weights.len(),
            saturated_vertices: report.saturated_vertices(),
        })
    }
}

/// Returns `<output_dir>/graph_<size>.gv`.
#[must_use]
pub fn graph_path(output_dir: &Path, size: usize) -> PathBuf {
    output_dir.join(format!("graph_{size}.{FILE_EXTENSION}"))
}

/// Builds one graph and its weights from `rng`, in the order a batch does.
///
/// # Errors
/// Returns [`GenerationError::ZeroVertices`] when `size` is zero.
///
/// # Examples
/// ```
/// use rand::{SeedableRng, rngs::SmallRng};
/// use sparsetsp_core::{GraphParams, generate_graph};
///
/// let params = GraphParams::new(2, 15, 1.0, 100.0).expect("params must be valid");
/// let mut rng = SmallRng::seed_from_u64(12_345);
/// let (graph, weights) = generate_graph(40, &params, &mut rng).expect("graph must build");
/// assert_eq!(weights.len(), graph.edge_count());
/// ```
pub fn generate_graph<R: Rng + ?Sized>(
    size: usize,
    params: &GraphParams,
    rng: &mut R,
) -> Result<(Adjacency, EdgeWeights)> {
    let graph = AdjacencyBuilder::new(params.degree).build(size, rng)?;
    let weights = assign_weights(&graph, rng, params.weights);
    Ok((graph, weights))
}

/// Builds one graph and returns the augmentation statistics as well.
///
/// # Errors
/// Returns [`GenerationError::ZeroVertices`] when `size` is zero.
pub fn generate_graph_with_report<R: Rng + ?Sized>(
    size: usize,
    params: &GraphParams,
    rng: &mut R,
) -> Result<(Adjacency, EdgeWeights, AdjacencyReport)> {
    let (graph, report) = AdjacencyBuilder::new(params.degree).build_with_report(size, rng)?;
    let weights = assign_weights(&graph, rng, params.weights);
    Ok((graph, weights, report))
}

//! Weighted serialization benchmarks.
//!
//! Measures weight assignment and document rendering for pre-built graphs,
//! isolating the serializer from adjacency construction.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use sparsetsp_benches::{error::BenchSetupError, fixtures::rendered_graph, params::GraphBenchParams};
use sparsetsp_core::GraphSerializer;

/// Seed used for graph construction and weight draws.
const SEED: u64 = 12_345;

/// Vertex counts to benchmark.
const VERTEX_COUNTS: &[usize] = &[500, 3_000, 7_000];

/// Degree cap matching the CLI default.
const MAX_DEGREE: usize = 15;

fn serialize_graph_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("serialize_graph");
    group.sample_size(20);

    for &vertex_count in VERTEX_COUNTS {
        let params = GraphBenchParams {
            vertex_count,
            max_degree: MAX_DEGREE,
        };
        let serializer = GraphSerializer::new(params.graph_params()?.weights);
        let rendered = rendered_graph(&params, SEED)?;

        group.bench_with_input(
            BenchmarkId::from_parameter(params),
            &rendered.graph,
            |b, graph| {
                b.iter(|| {
                    let mut rng = SmallRng::seed_from_u64(SEED);
                    serializer.serialize(graph, &mut rng)
                });
            },
        );
    }

    group.finish();
    Ok(())
}

fn serialize_graph(c: &mut Criterion) {
    if let Err(err) = serialize_graph_impl(c) {
        panic!("serialize_graph benchmark setup failed: {err}");
    }
}

criterion_group!(benches, serialize_graph);
criterion_main!(benches);

//! Document parsing benchmarks.
//!
//! Measures reading a rendered document back and rebuilding its adjacency,
//! the path taken by `sparsetsp inspect`.
#![expect(
    missing_docs,
    reason = "Criterion macros generate items without doc comments"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use sparsetsp_benches::{error::BenchSetupError, fixtures::rendered_graph, params::GraphBenchParams};
use sparsetsp_core::GraphDocument;

/// Seed used for the rendered fixtures.
const SEED: u64 = 12_345;

/// Vertex counts to benchmark.
const VERTEX_COUNTS: &[usize] = &[500, 3_000];

/// Degree cap matching the CLI default.
const MAX_DEGREE: usize = 15;

fn parse_document_impl(c: &mut Criterion) -> Result<(), BenchSetupError> {
    let mut group = c.benchmark_group("parse_document");
    group.sample_size(20);

    for &vertex_count in VERTEX_COUNTS {
        let params = GraphBenchParams {
            vertex_count,
            max_degree: MAX_DEGREE,
        };
        let rendered = rendered_graph(&params, SEED)?;

        group.bench_with_input(
            BenchmarkId::from_parameter(params),
            rendered.document.as_str(),
            |b, text| {
                b.iter(|| GraphDocument::parse(text).and_then(|document| document.to_adjacency()));
            },
        );
    }

    group.finish();
    Ok(())
}

fn parse_document(c: &mut Criterion) {
    if let Err(err) = parse_document_impl(c) {
        panic!("parse_document benchmark setup failed: {err}");
    }
}

criterion_group!(benches, parse_document);
criterion_main!(benches);

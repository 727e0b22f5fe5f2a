//! Unit tests for adjacency construction.

use rand::{SeedableRng, rngs::SmallRng};
use rstest::{fixture, rstest};

use super::{Adjacency, AdjacencyBuilder, MIN_ATTEMPT_CEILING, attempt_ceiling};
use crate::{DegreeBounds, GenerationError, check_invariants};

#[fixture]
fn rng() -> SmallRng {
    SmallRng::seed_from_u64(12_345)
}

fn builder(min_degree: usize, max_degree: usize) -> AdjacencyBuilder {
    AdjacencyBuilder::new(DegreeBounds::new(min_degree, max_degree).expect("bounds must be valid"))
}

#[test]
fn insert_edge_is_symmetric_and_idempotent() {
    let mut graph = Adjacency::with_vertices(3);
    assert!(graph.insert_edge(0, 2));
    assert!(!graph.insert_edge(2, 0));
    assert!(!graph.insert_edge(1, 1));
    assert!(!graph.insert_edge(1, 3));
    assert!(graph.contains_edge(2, 0));
    assert_eq!(graph.degree(0), 1);
    assert_eq!(graph.degree(2), 1);
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 2)]);
}

#[test]
fn edges_are_listed_in_ascending_order() {
    let mut graph = Adjacency::with_vertices(4);
    for (u, v) in [(3, 1), (2, 0), (0, 1), (3, 0)] {
        graph.insert_edge(u, v);
    }
    assert_eq!(
        graph.edges().collect::<Vec<_>>(),
        vec![(0, 1), (0, 2), (0, 3), (1, 3)]
    );
    assert_eq!(graph.degree_range(), Some((1, 3)));
}

#[rstest]
#[case::tiny(0, MIN_ATTEMPT_CEILING)]
#[case::at_threshold(100, 1_000)]
#[case::scaled(101, 1_010)]
#[case::large(7_000, 70_000)]
fn attempt_ceiling_scales_with_vertex_count(#[case] vertex_count: usize, #[case] expected: usize) {
    assert_eq!(attempt_ceiling(vertex_count), expected);
}

#[rstest]
fn build_rejects_zero_vertices(mut rng: SmallRng) {
    let err = builder(2, 3)
        .build(0, &mut rng)
        .expect_err("zero vertices must fail");
    assert!(matches!(err, GenerationError::ZeroVertices));
}

#[rstest]
fn single_vertex_has_no_edges(mut rng: SmallRng) {
    let (graph, report) = builder(2, 3)
        .build_with_report(1, &mut rng)
        .expect("single vertex must build");
    assert_eq!(graph.vertex_count(), 1);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.degree(0), 0);
    // The target of 2 can never be met, so the whole ceiling is spent.
    assert_eq!(report.saturated_vertices(), 1);
    assert_eq!(report.attempts(), MIN_ATTEMPT_CEILING);
}

#[rstest]
fn single_vertex_with_zero_target_draws_no_candidates(mut rng: SmallRng) {
    let (graph, report) = AdjacencyBuilder::new(
        DegreeBounds::new(0, 2).expect("bounds must be valid"),
    )
    .build_with_report(1, &mut rng)
    .expect("single vertex must build");
    assert_eq!(graph.edge_count(), 0);
    // Either the drawn target was zero, or the ceiling was reached.
    assert!(report.attempts() == 0 || report.attempts() == MIN_ATTEMPT_CEILING);
}

#[rstest]
fn pair_collapses_to_single_edge(mut rng: SmallRng) {
    let graph = builder(2, 5).build(2, &mut rng).expect("pair must build");
    assert_eq!(graph.edges().collect::<Vec<_>>(), vec![(0, 1)]);
    assert_eq!(graph.degree(0), 1);
    assert_eq!(graph.degree(1), 1);
}

#[rstest]
fn square_contains_cycle_and_only_diagonal_chords(mut rng: SmallRng) {
    let graph = builder(2, 3).build(4, &mut rng).expect("square must build");
    let cycle = [(0, 1), (1, 2), (2, 3), (0, 3)];
    for (u, v) in cycle {
        assert!(graph.contains_edge(u, v), "missing cycle edge {u} -- {v}");
    }
    for edge in graph.edges() {
        assert!(
            cycle.contains(&edge) || edge == (0, 2) || edge == (1, 3),
            "unexpected edge {edge:?}"
        );
    }
    assert!(graph.edge_count() <= 6);
}

#[rstest]
fn cycle_only_when_cap_is_two(mut rng: SmallRng) {
    let (graph, report) = builder(2, 2)
        .build_with_report(50, &mut rng)
        .expect("cycle must build");
    assert_eq!(graph.edge_count(), 50);
    assert_eq!(graph.degree_range(), Some((2, 2)));
    // Targets equal the cycle degree, so augmentation never draws.
    assert_eq!(report.attempts(), 0);
    assert_eq!(report.saturated_vertices(), 0);
}

#[rstest]
#[case::sparse(500, 2, 6)]
#[case::zero_minimum(200, 0, 4)]
#[case::near_complete(12, 10, 11)]
fn built_graphs_satisfy_invariants(
    mut rng: SmallRng,
    #[case] vertex_count: usize,
    #[case] min_degree: usize,
    #[case] max_degree: usize,
) {
    let graph = builder(min_degree, max_degree)
        .build(vertex_count, &mut rng)
        .expect("graph must build");
    assert_eq!(graph.vertex_count(), vertex_count);
    check_invariants(&graph, max_degree).expect("invariants must hold");
    let (min, _) = graph.degree_range().expect("graph is non-empty");
    assert!(min >= 2, "the cycle keeps every degree at two or more");
}

#[test]
fn identical_seeds_build_identical_graphs() {
    let bounds = builder(2, 8);
    let left = bounds
        .build(300, &mut SmallRng::seed_from_u64(99))
        .expect("left graph must build");
    let right = bounds
        .build(300, &mut SmallRng::seed_from_u64(99))
        .expect("right graph must build");
    assert_eq!(left, right);
}

#[test]
fn build_span_records_edge_count() {
    use sparsetsp_test_support::tracing::RecordingLayer;
    use tracing_subscriber::layer::SubscriberExt;

    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    tracing::subscriber::with_default(subscriber, || {
        builder(2, 2)
            .build(5, &mut SmallRng::seed_from_u64(1))
            .expect("cycle must build");
    });

    let span = layer
        .spans()
        .into_iter()
        .find(|span| span.name == "adjacency.build")
        .expect("build span must be recorded");
    assert_eq!(span.fields.get("vertex_count").map(String::as_str), Some("5"));
    assert_eq!(span.fields.get("edges").map(String::as_str), Some("5"));
}

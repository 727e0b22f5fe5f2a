//! Unit tests for weighting and serialization.

use rand::{RngCore, SeedableRng, rngs::SmallRng};
use rstest::rstest;

use super::{EdgeWeights, GraphSerializer, assign_weights, format_weight, write_graph};
use crate::{Adjacency, WeightRange};

fn square() -> Adjacency {
    let mut graph = Adjacency::with_vertices(4);
    for (u, v) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
        graph.insert_edge(u, v);
    }
    graph
}

fn range(min: f64, max: f64) -> WeightRange {
    WeightRange::new(min, max).expect("range must be valid")
}

#[rstest]
#[case::integer(5.0, "5.000000")]
#[case::rounds_half_up(1.234_567_8, "1.234568")]
#[case::large(99.999_999_9, "100.000000")]
#[case::small(0.000_001, "0.000001")]
fn format_weight_uses_six_fractional_digits(#[case] weight: f64, #[case] expected: &str) {
    assert_eq!(format_weight(weight), expected);
}

#[test]
fn fixed_range_consumes_no_draws() {
    let mut used = SmallRng::seed_from_u64(4);
    let weights = assign_weights(&square(), &mut used, range(5.0, 5.0));
    assert_eq!(weights.len(), 4);
    assert!(weights.iter().all(|(_, weight)| weight.to_bits() == 5.0_f64.to_bits()));

    let mut untouched = SmallRng::seed_from_u64(4);
    assert_eq!(used.next_u64(), untouched.next_u64());
}

#[test]
fn weights_cover_every_edge_once_within_range() {
    let bounds = range(1.0, 100.0);
    let weights = assign_weights(&square(), &mut SmallRng::seed_from_u64(8), bounds);
    let pairs: Vec<_> = weights.iter().map(|(pair, _)| pair).collect();
    assert_eq!(pairs, vec![(0, 1), (0, 3), (1, 2), (2, 3)]);
    assert!(weights.iter().all(|(_, weight)| bounds.contains(weight)));
    assert_eq!(weights.get(3, 0), weights.get(0, 3));
}

#[test]
fn write_graph_matches_expected_document() {
    let graph = square();
    let weights = assign_weights(&graph, &mut SmallRng::seed_from_u64(0), range(5.0, 5.0));
    let mut buffer = Vec::new();
    write_graph(&graph, &weights, &mut buffer).expect("writing to a Vec must succeed");
    let text = String::from_utf8(buffer).expect("output must be UTF-8");
    let expected = "\
graph SparseTSP {
  \"0\";
  \"1\";
  \"2\";
  \"3\";
  \"0\" -- \"1\" [weight=5.000000];
  \"0\" -- \"3\" [weight=5.000000];
  \"1\" -- \"2\" [weight=5.000000];
  \"2\" -- \"3\" [weight=5.000000];
}
";
    assert_eq!(text, expected);
}

#[test]
fn single_vertex_document_has_no_edges() {
    let graph = Adjacency::with_vertices(1);
    let mut buffer = Vec::new();
    write_graph(&graph, &EdgeWeights::default(), &mut buffer).expect("write must succeed");
    assert_eq!(
        String::from_utf8(buffer).expect("output must be UTF-8"),
        "graph SparseTSP {\n  \"0\";\n}\n"
    );
}

#[test]
fn serialize_is_deterministic_for_equal_streams() {
    let serializer = GraphSerializer::new(range(1.0, 100.0));
    let left = serializer.serialize(&square(), &mut SmallRng::seed_from_u64(21));
    let right = serializer.serialize(&square(), &mut SmallRng::seed_from_u64(21));
    assert_eq!(left, right);
}

#[test]
fn write_returns_the_weights_it_emitted() {
    let serializer = GraphSerializer::new(range(2.0, 3.0));
    let mut buffer = Vec::new();
    let weights = serializer
        .write(&square(), &mut SmallRng::seed_from_u64(5), &mut buffer)
        .expect("write must succeed");
    let text = String::from_utf8(buffer).expect("output must be UTF-8");
    for ((u, v), weight) in weights.iter() {
        let line = format!("  \"{u}\" -- \"{v}\" [weight={}];", format_weight(weight));
        assert!(text.contains(&line), "missing line {line}");
    }
}

//! Benchmark support crate for sparsetsp.
//!
//! Provides parameter types and pre-built inputs for the Criterion
//! benchmarks covering the three hot paths: adjacency construction, weighted
//! serialization and document parsing.

pub mod error;
pub mod fixtures;
pub mod params;

//! Benchmark parameter types.

use std::fmt;

use sparsetsp_core::{DegreeBounds, GraphParams, WeightRange};

use crate::error::BenchSetupError;

/// Lower bound of the degree target used by every benchmark.
pub const MIN_DEGREE: usize = 2;

/// Weight bounds used by every benchmark.
pub const WEIGHT_BOUNDS: (f64, f64) = (1.0, 100.0);

/// Parameters for one generator benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GraphBenchParams {
    /// Number of vertices in the generated graph.
    pub vertex_count: usize,
    /// Degree cap applied by the builder.
    pub max_degree: usize,
}

impl GraphBenchParams {
    /// Returns the validated degree bounds for this run.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Generation`] when `max_degree` is below
    /// [`MIN_DEGREE`].
    pub fn degree_bounds(&self) -> Result<DegreeBounds, BenchSetupError> {
        Ok(DegreeBounds::new(MIN_DEGREE, self.max_degree)?)
    }

    /// Returns the validated degree and weight bounds for this run.
    ///
    /// # Errors
    /// Returns [`BenchSetupError::Generation`] when validation fails.
    pub fn graph_params(&self) -> Result<GraphParams, BenchSetupError> {
        Ok(GraphParams {
            degree: self.degree_bounds()?,
            weights: WeightRange::new(WEIGHT_BOUNDS.0, WEIGHT_BOUNDS.1)?,
        })
    }
}

impl fmt::Display for GraphBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},max={}", self.vertex_count, self.max_degree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(100, 15, "n=100,max=15")]
    #[case(3_000, 4, "n=3000,max=4")]
    fn display_names_the_run(
        #[case] vertex_count: usize,
        #[case] max_degree: usize,
        #[case] expected: &str,
    ) {
        let params = GraphBenchParams {
            vertex_count,
            max_degree,
        };
        assert_eq!(params.to_string(), expected);
    }

    #[test]
    fn caps_below_two_are_rejected() {
        let params = GraphBenchParams {
            vertex_count: 10,
            max_degree: 1,
        };
        assert!(matches!(
            params.graph_params(),
            Err(BenchSetupError::Generation(_))
        ));
    }
}

//! Validated generation parameters.
//!
//! Degree and weight bounds are checked once at construction so the builder
//! and serializer can assume their preconditions hold.

use crate::error::{GenerationError, Result};

/// Inclusive bounds on the degree drawn for each vertex during augmentation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DegreeBounds {
    min_degree: usize,
    max_degree: usize,
}

impl DegreeBounds {
    /// Creates degree bounds.
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidMaxDegree`] when `max_degree < 2` and
    /// [`GenerationError::MinDegreeExceedsMax`] when `min_degree > max_degree`.
    ///
    /// # Examples
    /// ```
    /// use sparsetsp_core::DegreeBounds;
    /// let bounds = DegreeBounds::new(2, 15).expect("bounds must be valid");
    /// assert_eq!(bounds.max_degree(), 15);
    /// assert!(DegreeBounds::new(0, 1).is_err());
    /// ```
    pub const fn new(min_degree: usize, max_degree: usize) -> Result<Self> {
        if max_degree < 2 {
            return Err(GenerationError::InvalidMaxDegree { got: max_degree });
        }
        if min_degree > max_degree {
            return Err(GenerationError::MinDegreeExceedsMax {
                min_degree,
                max_degree,
            });
        }
        Ok(Self {
            min_degree,
            max_degree,
        })
    }

    /// Returns the lower bound of the target degree draw.
    #[must_use]
    pub const fn min_degree(&self) -> usize {
        self.min_degree
    }

    /// Returns the hard cap on every vertex's degree.
    #[must_use]
    pub const fn max_degree(&self) -> usize {
        self.max_degree
    }
}

/// Inclusive range of edge weights.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WeightRange {
    min: f64,
    max: f64,
}

impl WeightRange {
    /// Creates a weight range.
    ///
    /// # Errors
    /// Returns [`GenerationError::InvalidWeight`] when either bound is not a
    /// finite positive number and [`GenerationError::InvertedWeightRange`]
    /// when `min > max`.
    ///
    /// # Examples
    /// ```
    /// use sparsetsp_core::WeightRange;
    /// let fixed = WeightRange::new(5.0, 5.0).expect("range must be valid");
    /// assert!(fixed.is_fixed());
    /// assert!(WeightRange::new(0.0, 1.0).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self> {
        validate_bound("weight_min", min)?;
        validate_bound("weight_max", max)?;
        if min > max {
            return Err(GenerationError::InvertedWeightRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Returns the inclusive lower bound.
    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    /// Returns the inclusive upper bound.
    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Returns `true` when both bounds coincide, in which case no random draw
    /// is made for weights.
    #[expect(
        clippy::float_cmp,
        reason = "a degenerate range is defined by exact equality of the bounds"
    )]
    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.min == self.max
    }

    /// Returns `true` when `weight` lies inside the range.
    #[must_use]
    pub fn contains(&self, weight: f64) -> bool {
        (self.min..=self.max).contains(&weight)
    }
}

fn validate_bound(bound: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(GenerationError::InvalidWeight { bound, value })
    }
}

/// Per-graph parameters shared by every size in a batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphParams {
    /// Degree bounds applied by the adjacency builder.
    pub degree: DegreeBounds,
    /// Weight range applied by the serializer.
    pub weights: WeightRange,
}

impl GraphParams {
    /// Validates raw bounds and bundles them.
    ///
    /// # Errors
    /// Propagates the errors of [`DegreeBounds::new`] and
    /// [`WeightRange::new`], checking degrees first.
    pub fn new(
        min_degree: usize,
        max_degree: usize,
        weight_min: f64,
        weight_max: f64,
    ) -> Result<Self> {
        Ok(Self {
            degree: DegreeBounds::new(min_degree, max_degree)?,
            weights: WeightRange::new(weight_min, weight_max)?,
        })
    }
}

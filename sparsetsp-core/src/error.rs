//! Error types for the sparse graph generator.
//!
//! Defines the configuration and I/O errors exposed by the public API, their
//! stable machine-readable codes, and a convenient result alias.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            #[must_use]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

pub(crate) use define_error_codes;

/// Error raised while configuring or running graph generation.
///
/// Every variant except [`GenerationError::Io`] is a configuration error and
/// is reported before any graph is constructed or any file is created.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The degree cap cannot hold the embedded Hamiltonian cycle.
    #[error("max_degree must be at least 2 to keep the base cycle (got {got})")]
    InvalidMaxDegree {
        /// The rejected maximum degree.
        got: usize,
    },
    /// The lower degree bound exceeded the upper bound.
    #[error("min_degree ({min_degree}) cannot exceed max_degree ({max_degree})")]
    MinDegreeExceedsMax {
        /// Requested minimum degree.
        min_degree: usize,
        /// Requested maximum degree.
        max_degree: usize,
    },
    /// A weight bound was zero, negative, or not finite.
    #[error("weight bound `{bound}` must be finite and positive (got {value})")]
    InvalidWeight {
        /// Name of the offending bound.
        bound: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The lower weight bound exceeded the upper bound.
    #[error("weight_min ({min}) cannot exceed weight_max ({max})")]
    InvertedWeightRange {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// No graph sizes were requested.
    #[error("at least one graph size is required")]
    EmptySizeList,
    /// A requested graph had no vertices.
    #[error("graph sizes must be positive")]
    ZeroVertices,
    /// Writing generated output failed.
    #[error("failed to write `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// The degree cap cannot hold the embedded Hamiltonian cycle.
        InvalidMaxDegree => InvalidMaxDegree { .. } => "SPARSETSP_INVALID_MAX_DEGREE",
        /// The lower degree bound exceeded the upper bound.
        MinDegreeExceedsMax => MinDegreeExceedsMax { .. } => "SPARSETSP_MIN_DEGREE_EXCEEDS_MAX",
        /// A weight bound was zero, negative, or not finite.
        InvalidWeight => InvalidWeight { .. } => "SPARSETSP_INVALID_WEIGHT",
        /// The lower weight bound exceeded the upper bound.
        InvertedWeightRange => InvertedWeightRange { .. } => "SPARSETSP_INVERTED_WEIGHT_RANGE",
        /// No graph sizes were requested.
        EmptySizeList => EmptySizeList => "SPARSETSP_EMPTY_SIZE_LIST",
        /// A requested graph had no vertices.
        ZeroVertices => ZeroVertices => "SPARSETSP_ZERO_VERTICES",
        /// Writing generated output failed.
        Io => Io { .. } => "SPARSETSP_IO",
    }
}

impl GenerationError {
    /// Returns `true` when the error stems from invalid configuration rather
    /// than a failure while writing output.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::Io { .. })
    }
}

/// Convenient alias for results returned by the generator API.
pub type Result<T> = core::result::Result<T, GenerationError>;

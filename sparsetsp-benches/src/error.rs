//! Benchmark setup error type.
//!
//! Lets setup code propagate generator and parser failures with `?` instead
//! of panicking inside Criterion closures.

use sparsetsp_core::{GenerationError, ParseError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// Parameter validation or graph construction failed.
    #[error("graph generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A pre-rendered document could not be read back.
    #[error("document parsing failed: {0}")]
    Parse(#[from] ParseError),
}

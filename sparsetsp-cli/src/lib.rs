//! Support library for the `sparsetsp` binary.
//!
//! Exposes the command pipeline and logging set-up so tests and doctests can
//! drive the CLI without spawning a subprocess.

pub mod cli;
pub mod logging;

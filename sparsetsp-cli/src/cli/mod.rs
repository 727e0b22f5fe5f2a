//! Command-line interface for generating and inspecting sparse TSP graphs.
//!
//! `generate` writes one `graph_<size>.gv` document per requested size from a
//! single seeded random stream. `inspect` reads a document back, summarises
//! its shape and reports any structural invariant it breaks.

mod commands;

pub use commands::{
    Cli, CliError, Command, CommandSummary, DEFAULT_OUTPUT_DIR, DEFAULT_SIZES, GenerateCommand,
    InspectCommand, InspectSummary, SizeList, SizeListError, parse_sizes, render_summary, run_cli,
};

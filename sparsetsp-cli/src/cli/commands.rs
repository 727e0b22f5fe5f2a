//! Command implementations and argument parsing for the `sparsetsp` CLI.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};
use sparsetsp_core::{
    BatchConfig, GeneratedGraph, GenerationError, GraphBatch, GraphDocument,
    GraphInvariantViolation, GraphParams, ParseError, collect_violations, format_weight,
    has_embedded_cycle,
};
use thiserror::Error;
use tracing::{Span, field, info, instrument, warn};

/// Sizes generated when `--sizes` is omitted.
pub const DEFAULT_SIZES: &str = "3000,3500,4000,4500,5000,5500,6000,6500,7000";

/// Directory written to when `--output-dir` is omitted.
pub const DEFAULT_OUTPUT_DIR: &str = "data/generated_graphs";

const DEFAULT_MAX_DEGREE: usize = 15;
const DEFAULT_MIN_DEGREE: usize = 2;
const DEFAULT_WEIGHT_MIN: f64 = 1.0;
const DEFAULT_WEIGHT_MAX: f64 = 100.0;
const DEFAULT_SEED: u64 = 12_345;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "sparsetsp",
    about = "Generate and inspect sparse TSP benchmark graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Write one graph document per requested size.
    Generate(GenerateCommand),
    /// Summarise a graph document and check its invariants.
    Inspect(InspectCommand),
}

/// Options accepted by the `generate` command.
#[derive(Debug, Args, Clone)]
pub struct GenerateCommand {
    /// Comma-separated vertex counts, generated in order.
    #[arg(long, default_value = DEFAULT_SIZES, value_parser = parse_sizes)]
    pub sizes: SizeList,

    /// Directory receiving `graph_<size>.gv` files.
    #[arg(long = "output-dir", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Upper bound on every vertex degree (at least 2).
    #[arg(long = "max-degree", default_value_t = DEFAULT_MAX_DEGREE)]
    pub max_degree: usize,

    /// Lower bound of the random per-vertex degree target.
    #[arg(long = "min-degree", default_value_t = DEFAULT_MIN_DEGREE)]
    pub min_degree: usize,

    /// Lower bound of the edge weight range.
    #[arg(long = "weight-min", default_value_t = DEFAULT_WEIGHT_MIN)]
    pub weight_min: f64,

    /// Upper bound of the edge weight range.
    #[arg(long = "weight-max", default_value_t = DEFAULT_WEIGHT_MAX)]
    pub weight_max: f64,

    /// Seed of the random stream shared by every size.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,
}

/// Options accepted by the `inspect` command.
#[derive(Debug, Args, Clone)]
pub struct InspectCommand {
    /// Graph document to read.
    pub path: PathBuf,

    /// Degree cap to enforce. Without it only the observed maximum is
    /// reported.
    #[arg(long = "max-degree")]
    pub max_degree: Option<usize>,
}

/// Ordered list of vertex counts accepted by `--sizes`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SizeList(pub Vec<usize>);

impl SizeList {
    /// Returns the sizes in request order.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }
}

/// Errors raised while reading a `--sizes` value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SizeListError {
    /// An entry was not a decimal integer.
    #[error("`{entry}` is not a vertex count")]
    NotANumber {
        /// Offending entry, trimmed.
        entry: String,
    },
    /// An entry was zero.
    #[error("vertex counts must be positive")]
    Zero,
}

impl FromStr for SizeList {
    type Err = SizeListError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        raw.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.parse::<usize>() {
                Ok(0) => Err(SizeListError::Zero),
                Ok(size) => Ok(size),
                Err(_) => Err(SizeListError::NotANumber {
                    entry: entry.to_owned(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Parses a comma-separated list of positive vertex counts.
///
/// Blank entries are skipped, so `"10,,20,"` yields `[10, 20]`. An entirely
/// blank value yields an empty list, which `generate` then rejects.
///
/// # Errors
/// Returns [`SizeListError`] for entries that are not positive integers.
///
/// # Examples
/// ```
/// use sparsetsp_cli::cli::parse_sizes;
///
/// let sizes = parse_sizes(" 5, 8 ,,13").expect("sizes must parse");
/// assert_eq!(sizes.as_slice(), &[5, 8, 13]);
/// assert!(parse_sizes("5,x").is_err());
/// ```
pub fn parse_sizes(raw: &str) -> Result<SizeList, SizeListError> {
    raw.parse()
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading an input document failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// An input document could not be parsed.
    #[error("failed to parse `{path}`: {source}")]
    Parse {
        /// Path of the document.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: ParseError,
    },
    /// Configuration or generation failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),
    /// An inspected document broke structural invariants.
    #[error("`{path}` violates {count} graph invariant(s)")]
    InvariantViolations {
        /// Path of the document.
        path: PathBuf,
        /// Number of violations found.
        count: usize,
    },
}

impl CliError {
    /// Returns the stable machine-readable code of the underlying core error.
    #[must_use]
    pub const fn code(&self) -> Option<&'static str> {
        match self {
            Self::Generation(err) => Some(err.code().as_str()),
            Self::Parse { source, .. } => Some(source.code().as_str()),
            Self::Io { .. } | Self::InvariantViolations { .. } => None,
        }
    }
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub enum CommandSummary {
    /// Graphs written by `generate`, in size order.
    Generate(Vec<GeneratedGraph>),
    /// Report produced by `inspect`.
    Inspect(InspectSummary),
}

impl CommandSummary {
    /// Fails when the summary reports a broken document.
    ///
    /// # Errors
    /// Returns [`CliError::InvariantViolations`] when `inspect` found
    /// violations.
    pub fn ensure_valid(&self) -> Result<(), CliError> {
        match self {
            Self::Inspect(report) if !report.violations.is_empty() => {
                Err(CliError::InvariantViolations {
                    path: report.path.clone(),
                    count: report.violations.len(),
                })
            }
            Self::Generate(_) | Self::Inspect(_) => Ok(()),
        }
    }
}

/// Shape and validity of an inspected document.
#[derive(Debug, Clone, PartialEq)]
pub struct InspectSummary {
    /// Document that was read.
    pub path: PathBuf,
    /// Graph name from the header.
    pub name: String,
    /// Number of declared vertices.
    pub vertex_count: usize,
    /// Number of undirected edges.
    pub edge_count: usize,
    /// Smallest and largest vertex degree, `None` for an empty graph.
    pub degree_range: Option<(usize, usize)>,
    /// Average vertex degree.
    pub mean_degree: f64,
    /// Smallest and largest edge weight, `None` without edges.
    pub weight_range: Option<(f64, f64)>,
    /// Whether every edge `(i, (i + 1) mod n)` is present.
    pub has_cycle: bool,
    /// Invariants broken by the document.
    pub violations: Vec<GraphInvariantViolation>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when configuration, generation, reading or parsing
/// fails. Invariant violations found by `inspect` are reported in the
/// summary; see [`CommandSummary::ensure_valid`].
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use sparsetsp_cli::cli::{Cli, CommandSummary, run_cli};
/// # use clap::Parser;
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let output = dir.path().join("graphs");
/// let output_arg = output.to_string_lossy().into_owned();
/// let cli = Cli::try_parse_from([
///     "sparsetsp",
///     "generate",
///     "--sizes",
///     "4,6",
///     "--output-dir",
///     output_arg.as_str(),
/// ])?;
/// let CommandSummary::Generate(graphs) = run_cli(cli)? else {
///     unreachable!("generate yields a generate summary");
/// };
/// assert_eq!(graphs.len(), 2);
/// assert!(output.join("graph_6.gv").exists());
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<CommandSummary, CliError> {
    match cli.command {
        Command::Generate(command) => {
            Span::current().record("command", field::display("generate"));
            run_generate(command).map(CommandSummary::Generate)
        }
        Command::Inspect(command) => {
            Span::current().record("command", field::display("inspect"));
            run_inspect(command).map(CommandSummary::Inspect)
        }
    }
}

#[instrument(
    name = "cli.generate",
    err,
    skip(command),
    fields(sizes = command.sizes.as_slice().len(), seed = command.seed),
)]
pub(super) fn run_generate(command: GenerateCommand) -> Result<Vec<GeneratedGraph>, CliError> {
    let params = GraphParams::new(
        command.min_degree,
        command.max_degree,
        command.weight_min,
        command.weight_max,
    )?;
    let batch = GraphBatch::new(BatchConfig {
        sizes: command.sizes.0,
        output_dir: command.output_dir,
        params,
        seed: command.seed,
    })?;
    let graphs = batch.run()?;
    info!(graphs = graphs.len(), "generation completed");
    Ok(graphs)
}

#[instrument(
    name = "cli.inspect",
    err,
    skip(command),
    fields(path = %command.path.display(), violations = field::Empty),
)]
pub(super) fn run_inspect(command: InspectCommand) -> Result<InspectSummary, CliError> {
    let InspectCommand { path, max_degree } = command;
    let text = fs::read_to_string(&path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    let parse_error = |source| CliError::Parse {
        path: path.clone(),
        source,
    };
    let document = GraphDocument::parse(&text).map_err(parse_error)?;
    let graph = document.to_adjacency().map_err(parse_error)?;

    let degree_range = graph.degree_range();
    let limit = max_degree.unwrap_or_else(|| degree_range.map_or(0, |(_, high)| high));
    let violations = collect_violations(&graph, limit);
    Span::current().record("violations", violations.len());
    if !violations.is_empty() {
        warn!(count = violations.len(), "document violates graph invariants");
    }

    let vertex_count = graph.vertex_count();
    let edge_count = graph.edge_count();
    let mean_degree = if vertex_count == 0 {
        0.0
    } else {
        edge_count.saturating_mul(2) as f64 / vertex_count as f64
    };
    Ok(InspectSummary {
        name: document.name().to_owned(),
        vertex_count,
        edge_count,
        degree_range,
        mean_degree,
        weight_range: document.weight_range(),
        has_cycle: has_embedded_cycle(&graph),
        violations,
        path,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::path::PathBuf;
/// # use sparsetsp_cli::cli::{CommandSummary, render_summary};
/// # use sparsetsp_core::GeneratedGraph;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = CommandSummary::Generate(vec![GeneratedGraph {
///     size: 4,
///     path: PathBuf::from("out/graph_4.gv"),
///     edge_count: 5,
///     saturated_vertices: 0,
/// }]);
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer)?, "generated 4 vertices -> out/graph_4.gv\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &CommandSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        CommandSummary::Generate(graphs) => {
            for graph in graphs {
                writeln!(
                    writer,
                    "generated {} vertices -> {}",
                    graph.size,
                    graph.path.display()
                )?;
            }
        }
        CommandSummary::Inspect(report) => render_inspection(report, &mut writer)?,
    }
    Ok(())
}

fn render_inspection(report: &InspectSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "graph: {}", report.name)?;
    writeln!(writer, "vertices: {}", report.vertex_count)?;
    writeln!(writer, "edges: {}", report.edge_count)?;
    match report.degree_range {
        Some((low, high)) => writeln!(
            writer,
            "degree: min {low}, max {high}, mean {:.2}",
            report.mean_degree
        )?,
        None => writeln!(writer, "degree: none")?,
    }
    match report.weight_range {
        Some((low, high)) => writeln!(
            writer,
            "weights: {}..{}",
            format_weight(low),
            format_weight(high)
        )?,
        None => writeln!(writer, "weights: none")?,
    }
    let cycle = if report.has_cycle { "present" } else { "missing" };
    writeln!(writer, "cycle: {cycle}")?;
    writeln!(writer, "violations: {}", report.violations.len())?;
    for violation in &report.violations {
        writeln!(writer, "  {violation}")?;
    }
    Ok(())
}

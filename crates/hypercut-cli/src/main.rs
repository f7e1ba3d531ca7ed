#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{Parser, Subcommand};
use hypercut_core::{ErrorCode, config};
use output::{CliError, OutputMode, config_error, render_error, resolve_output_mode};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "hcut: spectral analysis and min-cut of weighted hypergraphs",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputMode>,

    /// Shorthand for `--format json`.
    #[arg(long, global = true, hide = true)]
    json: bool,

    /// Config file (default: ./hypercut.toml, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    fn output_mode(&self) -> OutputMode {
        resolve_output_mode(self.format, self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Summarize a hypergraph file",
        long_about = "Print node and hyperedge counts, the content hash, and the hyperedge list.",
        after_help = "EXAMPLES:\n    # Summarize a tab/comma file\n    hcut info graph.tsv\n\n    # Semicolon-separated node lists\n    hcut info graph.txt --delim ';'\n\n    # Emit machine-readable output\n    hcut info graph.tsv --json"
    )]
    Info(cmd::info::InfoArgs),

    #[command(
        about = "Print a pipeline matrix",
        long_about = "Print the incidence, degree, weight, Laplacian, or transition matrix of a hypergraph.",
        after_help = "EXAMPLES:\n    # Incidence matrix\n    hcut matrix graph.tsv\n\n    # Normalized Laplacian\n    hcut matrix graph.tsv --kind laplacian\n\n    # Emit machine-readable output\n    hcut matrix graph.tsv --kind transition --json"
    )]
    Matrix(cmd::matrix::MatrixArgs),

    #[command(
        about = "Spectral min-cut bipartition",
        long_about = "Split the nodes in two using the Fiedler vector of the normalized Laplacian.",
        after_help = "EXAMPLES:\n    # Cut at zero\n    hcut cut graph.tsv\n\n    # Cut at a custom threshold\n    hcut cut graph.tsv --threshold -0.1\n\n    # Emit machine-readable output\n    hcut cut graph.tsv --json"
    )]
    Cut(cmd::cut::CutArgs),

    #[command(
        about = "Stationary distribution of the random walk",
        long_about = "Power-iterate the hypergraph random walk from random starts until it settles.",
        after_help = "EXAMPLES:\n    # Reproducible run\n    hcut stationary graph.tsv --seed 7\n\n    # Tighter absolute convergence\n    hcut stationary graph.tsv --absolute --tolerance 1e-8\n\n    # Emit machine-readable output\n    hcut stationary graph.tsv --json"
    )]
    Stationary(cmd::stationary::StationaryArgs),
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("HYPERCUT_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "hcut=debug,hypercut=debug,info"
        } else {
            "hcut=info,hypercut=info,warn"
        })
    });

    let format = env::var("HYPERCUT_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    // Logs go to stderr so stdout stays parseable.
    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(std::io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> Result<(), CliError> {
    let working_dir = env::current_dir().map_err(|e| {
        CliError::with_code(
            format!("cannot read working directory: {e}"),
            ErrorCode::InputIo,
        )
    })?;
    let (config, source) = config::load_config(cli.config.as_deref(), &working_dir)
        .map_err(|e| config_error(&e))?;
    match source {
        Some(path) => debug!(path = %path.display(), "using config file"),
        None => debug!("using default config"),
    }

    let result = match cli.command {
        Commands::Info(ref args) => cmd::info::run_info(args, output, &config),
        Commands::Matrix(ref args) => cmd::matrix::run_matrix(args, output, &config),
        Commands::Cut(ref args) => cmd::cut::run_cut(args, output, &config),
        Commands::Stationary(ref args) => cmd::stationary::run_stationary(args, output, &config),
    };
    result.map_err(|e| CliError::from(&e))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();
    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if let Err(render_err) = render_error(output, &err) {
                eprintln!("error: {} ({render_err})", err.message);
            }
            ExitCode::FAILURE
        }
    }
}

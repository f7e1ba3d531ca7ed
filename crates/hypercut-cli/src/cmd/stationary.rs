//! `hcut stationary`: stationary distribution of the hypergraph random walk.

use crate::cmd::{InputArgs, fmt_f64};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};
use clap::Args;
use hypercut_core::{AnalysisConfig, ConvergenceCheck, Hypergraph};
use hypercut_spectral::{Analyzer, SpectralError};
use serde::Serialize;
use std::io::Write;
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct StationaryArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Seed for the random starting vectors (default: OS entropy).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Convergence tolerance (default: 1e-4).
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Iteration cap (default: 10000).
    #[arg(long)]
    pub max_iter: Option<usize>,

    /// Compare iterates by absolute difference instead of the one-sided check.
    #[arg(long)]
    pub absolute: bool,
}

impl StationaryArgs {
    /// Apply command-line overrides to a copy of `config`.
    pub fn effective_config(&self, config: &AnalysisConfig) -> AnalysisConfig {
        let mut config = config.clone();
        let walk = &mut config.random_walk;
        if let Some(seed) = self.seed {
            walk.seed = Some(seed);
        }
        if let Some(tolerance) = self.tolerance {
            walk.tolerance = tolerance;
        }
        if let Some(max_iter) = self.max_iter {
            walk.max_iter = max_iter;
        }
        if self.absolute {
            walk.convergence = ConvergenceCheck::Absolute;
        }
        config
    }
}

#[derive(Debug, Serialize)]
pub struct StationaryReport {
    pub iterations: usize,
    pub convergence: ConvergenceCheck,
    pub tolerance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Probabilities in node-id order.
    pub distribution: Vec<NodeProbability>,
}

#[derive(Debug, Serialize)]
pub struct NodeProbability {
    pub node: String,
    pub probability: f64,
}

pub fn build_report(
    analyzer: &mut Analyzer,
    graph: &Hypergraph,
) -> Result<StationaryReport, SpectralError> {
    let p = analyzer.random_walk_matrix(graph)?;
    let mut rng = analyzer.rng();
    let result = analyzer.stationary_distribution(&p, &mut rng)?;

    let walk = &analyzer.config().random_walk;
    let (convergence, tolerance, seed) = (walk.convergence, walk.tolerance, walk.seed);

    let distribution = analyzer
        .incidence(graph)
        .node_names()
        .iter()
        .zip(result.distribution.iter())
        .map(|(node, &probability)| NodeProbability {
            node: node.clone(),
            probability,
        })
        .collect();

    Ok(StationaryReport {
        iterations: result.iterations,
        convergence,
        tolerance,
        seed,
        distribution,
    })
}

pub fn run_stationary(
    args: &StationaryArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let graph = args.input.load(config)?;
    let mut analyzer = Analyzer::new(args.effective_config(config));
    let report = build_report(&mut analyzer, &graph)?;
    info!(iterations = report.iterations, "stationary distribution");
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &StationaryReport, w: &mut dyn Write) -> std::io::Result<()> {
    for entry in &report.distribution {
        writeln!(w, "{}\t{}", entry.node, fmt_f64(entry.probability))?;
    }
    Ok(())
}

fn render_pretty(report: &StationaryReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Stationary distribution")?;
    pretty_kv(w, "iterations", report.iterations.to_string())?;
    pretty_kv(w, "tolerance", report.tolerance.to_string())?;
    let check = match report.convergence {
        ConvergenceCheck::OneSided => "one-sided",
        ConvergenceCheck::Absolute => "absolute",
    };
    pretty_kv(w, "check", check)?;
    if let Some(seed) = report.seed {
        pretty_kv(w, "seed", seed.to_string())?;
    }
    writeln!(w)?;

    let width = report
        .distribution
        .iter()
        .map(|e| e.node.len())
        .max()
        .unwrap_or(0)
        .max(4);
    writeln!(w, "{:<width$}  {:>10}", "node", "pi")?;
    pretty_rule(w)?;
    for entry in &report.distribution {
        writeln!(w, "{:<width$}  {:>10}", entry.node, fmt_f64(entry.probability))?;
    }
    Ok(())
}

//! `hcut cut`: spectral bipartition of a hypergraph.
//!
//! Nodes whose Fiedler-vector entry is at or above the threshold form the
//! first part; everything else forms the second. Text output joins each part
//! with the input's node delimiter, so names read from the file stay unambiguous.

use crate::cmd::{InputArgs, fmt_f64};
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};
use clap::Args;
use hypercut_core::AnalysisConfig;
use hypercut_spectral::{Analyzer, Partition};
use std::io::Write;
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct CutArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Fiedler-vector threshold (default: `[spectral] threshold`, else 0).
    #[arg(long, allow_hyphen_values = true)]
    pub threshold: Option<f64>,

    /// Cut even when the hypergraph has several connected components.
    #[arg(long)]
    pub allow_disconnected: bool,
}

impl CutArgs {
    /// Apply command-line overrides to a copy of `config`.
    pub fn effective_config(&self, config: &AnalysisConfig) -> AnalysisConfig {
        let mut config = config.clone();
        if let Some(threshold) = self.threshold {
            config.spectral.threshold = threshold;
        }
        if self.allow_disconnected {
            config.spectral.require_connected = false;
        }
        config
    }
}

pub fn run_cut(args: &CutArgs, output: OutputMode, config: &AnalysisConfig) -> anyhow::Result<()> {
    let graph = args.input.load(config)?;
    let delim = args.input.text_format(config).delim;
    let config = args.effective_config(config);
    let threshold = config.spectral.threshold;

    let mut analyzer = Analyzer::new(config);
    let partition = analyzer.min_cut(&graph, threshold)?;
    info!(
        first = partition.first.len(),
        second = partition.second.len(),
        eigenvalue = partition.eigenvalue,
        "min cut"
    );

    render_mode(
        output,
        &partition,
        |p, w| render_text(p, &delim, w),
        render_pretty,
    )
}

fn render_text(partition: &Partition, delim: &str, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "first\t{}", partition.first.join(delim))?;
    writeln!(w, "second\t{}", partition.second.join(delim))?;
    writeln!(w, "eigenvalue\t{}", fmt_f64(partition.eigenvalue))?;
    Ok(())
}

fn render_pretty(partition: &Partition, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Spectral bipartition")?;
    pretty_kv(w, "threshold", partition.threshold.to_string())?;
    pretty_kv(w, "eigenvalue", fmt_f64(partition.eigenvalue))?;
    pretty_kv(w, "first", partition.first.join(", "))?;
    pretty_kv(w, "second", partition.second.join(", "))?;
    writeln!(w)?;

    let width = partition
        .fiedler
        .keys()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(4);
    writeln!(w, "{:<width$}  {:>10}  part", "node", "fiedler")?;
    pretty_rule(w)?;
    for (name, value) in &partition.fiedler {
        let part = if *value >= partition.threshold { 1 } else { 2 };
        writeln!(w, "{name:<width$}  {:>10}  {part}", fmt_f64(*value))?;
    }
    Ok(())
}

//! `hcut info`: summarize a hypergraph file.

use crate::cmd::InputArgs;
use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};
use clap::Args;
use hypercut_core::{AnalysisConfig, Hypergraph};
use serde::Serialize;
use std::io::Write;

#[derive(Args, Debug, Default)]
pub struct InfoArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Debug, Serialize)]
pub struct InfoReport {
    pub file: String,
    pub nodes: usize,
    pub hyperedges: usize,
    pub content_hash: String,
    /// Node names in registration order.
    pub node_names: Vec<String>,
    pub edges: Vec<EdgeEntry>,
}

#[derive(Debug, Serialize)]
pub struct EdgeEntry {
    /// 1-based position in file order.
    pub index: usize,
    pub nodes: Vec<String>,
    pub weight: f64,
}

pub fn build_report(file: String, graph: &Hypergraph) -> InfoReport {
    InfoReport {
        file,
        nodes: graph.node_count(),
        hyperedges: graph.edge_count(),
        content_hash: graph.content_hash(),
        node_names: graph.nodes().iter().map(|n| n.name().to_string()).collect(),
        edges: graph
            .hyperedges()
            .iter()
            .enumerate()
            .map(|(i, e)| EdgeEntry {
                index: i + 1,
                nodes: e.nodes().map(str::to_string).collect(),
                weight: e.weight(),
            })
            .collect(),
    }
}

pub fn run_info(
    args: &InfoArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let graph = args.input.load(config)?;
    let delim = args.input.text_format(config).delim;
    let report = build_report(args.input.file.display().to_string(), &graph);
    render_mode(
        output,
        &report,
        |r, w| render_text(r, &delim, w),
        render_pretty,
    )
}

fn render_text(report: &InfoReport, delim: &str, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "nodes\t{}", report.nodes)?;
    writeln!(w, "hyperedges\t{}", report.hyperedges)?;
    writeln!(w, "content_hash\t{}", report.content_hash)?;
    for edge in &report.edges {
        writeln!(
            w,
            "edge\t{}\t{}\t{}",
            edge.index,
            edge.nodes.join(delim),
            edge.weight
        )?;
    }
    Ok(())
}

fn render_pretty(report: &InfoReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Hypergraph {}", report.file))?;
    pretty_kv(w, "nodes", report.nodes.to_string())?;
    pretty_kv(w, "hyperedges", report.hyperedges.to_string())?;
    pretty_kv(w, "hash", &report.content_hash)?;
    if report.edges.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    for edge in &report.edges {
        writeln!(
            w,
            "Edge {}: Nodes: {{{}}}, weight: {}",
            edge.index,
            edge.nodes.join(", "),
            edge.weight
        )?;
    }
    pretty_rule(w)
}

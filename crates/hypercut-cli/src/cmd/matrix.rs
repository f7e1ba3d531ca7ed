//! `hcut matrix`: print one of the pipeline's matrices.

use crate::cmd::{InputArgs, fmt_f64};
use crate::output::{OutputMode, pretty_section, render_mode};
use clap::{Args, ValueEnum};
use hypercut_core::{AnalysisConfig, Hypergraph};
use hypercut_spectral::{Analyzer, SpectralError};
use nalgebra::DMatrix;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatrixKind {
    /// `|V| × |E|` incidence matrix H.
    #[default]
    Incidence,
    /// Node degree diagonal `D_v`.
    NodeDegree,
    /// Hyperedge degree diagonal `D_e`.
    EdgeDegree,
    /// Hyperedge weight diagonal W.
    Weight,
    /// Normalized Laplacian.
    Laplacian,
    /// Random-walk transition matrix P.
    Transition,
}

#[derive(Args, Debug, Default)]
pub struct MatrixArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Which matrix to print.
    #[arg(long, value_enum, default_value_t = MatrixKind::Incidence)]
    pub kind: MatrixKind,
}

#[derive(Debug, Serialize)]
pub struct MatrixReport {
    pub kind: MatrixKind,
    pub rows: usize,
    pub cols: usize,
    pub row_labels: Vec<String>,
    pub col_labels: Vec<String>,
    /// Row-major entries.
    pub data: Vec<Vec<f64>>,
}

fn edge_labels(count: usize) -> Vec<String> {
    (1..=count).map(|j| format!("e{j}")).collect()
}

pub fn build_report(
    analyzer: &mut Analyzer,
    graph: &Hypergraph,
    kind: MatrixKind,
) -> Result<MatrixReport, SpectralError> {
    let (nodes, edges) = {
        let inc = analyzer.incidence(graph);
        (inc.node_names().to_vec(), edge_labels(inc.edge_count()))
    };

    let (matrix, row_labels, col_labels): (DMatrix<f64>, _, _) = match kind {
        MatrixKind::Incidence => (analyzer.incidence(graph).matrix.clone(), nodes, edges),
        MatrixKind::NodeDegree => (analyzer.node_degree_matrix(graph), nodes.clone(), nodes),
        MatrixKind::EdgeDegree => (analyzer.edge_degree_matrix(graph), edges.clone(), edges),
        MatrixKind::Weight => (analyzer.edge_weight_matrix(graph), edges.clone(), edges),
        MatrixKind::Laplacian => (analyzer.normalized_laplacian(graph)?, nodes.clone(), nodes),
        MatrixKind::Transition => (analyzer.random_walk_matrix(graph)?, nodes.clone(), nodes),
    };

    Ok(MatrixReport {
        kind,
        rows: matrix.nrows(),
        cols: matrix.ncols(),
        row_labels,
        col_labels,
        data: matrix
            .row_iter()
            .map(|row| row.iter().copied().collect())
            .collect(),
    })
}

pub fn run_matrix(
    args: &MatrixArgs,
    output: OutputMode,
    config: &AnalysisConfig,
) -> anyhow::Result<()> {
    let graph = args.input.load(config)?;
    let mut analyzer = Analyzer::new(config.clone());
    let report = build_report(&mut analyzer, &graph, args.kind)?;
    render_mode(output, &report, render_text, render_pretty)
}

fn render_text(report: &MatrixReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "\t{}", report.col_labels.join("\t"))?;
    for (label, row) in report.row_labels.iter().zip(&report.data) {
        let cells: Vec<String> = row.iter().map(|&x| fmt_f64(x)).collect();
        writeln!(w, "{label}\t{}", cells.join("\t"))?;
    }
    Ok(())
}

fn render_pretty(report: &MatrixReport, w: &mut dyn Write) -> std::io::Result<()> {
    let kind = report
        .kind
        .to_possible_value()
        .map_or_else(String::new, |v| v.get_name().to_string());
    pretty_section(w, &format!("{kind} ({} x {})", report.rows, report.cols))?;

    let label_width = report
        .row_labels
        .iter()
        .map(String::len)
        .max()
        .unwrap_or(0)
        .max(4);
    write!(w, "{:label_width$}", "")?;
    for label in &report.col_labels {
        write!(w, " {label:>10}")?;
    }
    writeln!(w)?;
    for (label, row) in report.row_labels.iter().zip(&report.data) {
        write!(w, "{label:<label_width$}")?;
        for &x in row {
            write!(w, " {:>10}", fmt_f64(x))?;
        }
        writeln!(w)?;
    }
    Ok(())
}

pub mod cut;
pub mod info;
pub mod matrix;
pub mod stationary;

use std::path::PathBuf;

use clap::Args;
use hypercut_core::{AnalysisConfig, Hypergraph, HypergraphError, TextFormat};
use tracing::debug;

/// Input arguments shared by every command that reads a hypergraph file.
#[derive(Args, Debug, Clone, Default)]
pub struct InputArgs {
    /// Hypergraph file: a header line, then `nodes<sep>weight` per line.
    pub file: PathBuf,

    /// Separator between the node list and the weight (default: tab).
    #[arg(long)]
    pub sep: Option<String>,

    /// Delimiter between node names (default: comma).
    #[arg(long)]
    pub delim: Option<String>,
}

impl InputArgs {
    /// The text format from `config`, with command-line overrides applied.
    pub fn text_format(&self, config: &AnalysisConfig) -> TextFormat {
        TextFormat {
            sep: self.sep.clone().unwrap_or_else(|| config.input.sep.clone()),
            delim: self
                .delim
                .clone()
                .unwrap_or_else(|| config.input.delim.clone()),
        }
    }

    /// Read the hypergraph named by these arguments.
    pub fn load(&self, config: &AnalysisConfig) -> Result<Hypergraph, HypergraphError> {
        let graph = self.text_format(config).read_path(&self.file)?;
        debug!(
            path = %self.file.display(),
            nodes = graph.node_count(),
            hyperedges = graph.edge_count(),
            "loaded hypergraph"
        );
        Ok(graph)
    }
}

/// Format a float for text output, trimming noise below `1e-12` to zero.
pub fn fmt_f64(x: f64) -> String {
    let x = if x.abs() < 1e-12 { 0.0 } else { x };
    format!("{x:.6}")
}

//! Line-oriented text format for undirected hypergraphs.
//!
//! ```text
//! Edge	weight
//! A,B	1
//! B,C,D	2.5
//! E,F
//! ```
//!
//! The first line is a header and is ignored. Each following line is one
//! hyperedge: member names joined by `delim`, then `sep`, then the weight.
//! A missing or unparseable weight defaults to `1.0`: a zero weight would
//! disconnect the hyperedge's members.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::HypergraphError;
use crate::graph::Hypergraph;

/// Weight assigned when a line has no usable weight field.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Field separators for the text format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFormat {
    /// Separates the node list from the weight. Default: tab.
    #[serde(default = "default_sep")]
    pub sep: String,
    /// Separates node names within the node list. Default: comma.
    #[serde(default = "default_delim")]
    pub delim: String,
}

impl Default for TextFormat {
    fn default() -> Self {
        Self {
            sep: default_sep(),
            delim: default_delim(),
        }
    }
}

fn default_sep() -> String {
    "\t".to_string()
}

fn default_delim() -> String {
    ",".to_string()
}

impl TextFormat {
    /// Parse a hypergraph from an in-memory string.
    ///
    /// # Errors
    ///
    /// See [`TextFormat::read`].
    pub fn parse_str(&self, input: &str) -> Result<Hypergraph, HypergraphError> {
        self.read(input.as_bytes())
    }

    /// Parse a hypergraph from a reader.
    ///
    /// Line numbers in errors are 1-based and count the header.
    ///
    /// # Errors
    ///
    /// - [`HypergraphError::Parse`] if a line has more than two fields or an
    ///   empty node name.
    /// - [`HypergraphError::InvalidWeightAt`] for a negative or non-finite weight.
    /// - [`HypergraphError::Io`] if reading fails.
    pub fn read<R: BufRead>(&self, reader: R) -> Result<Hypergraph, HypergraphError> {
        let mut graph = Hypergraph::new();

        for (idx, line) in reader.lines().enumerate().skip(1) {
            let line = line?;
            let line_no = idx + 1;
            let line = line.trim_end_matches(['\n', '\r']);
            if line.is_empty() {
                continue;
            }

            let (nodes, weight) = self.parse_line(line, line_no)?;
            graph
                .add_hyperedge(nodes, weight)
                .map_err(|e| match e {
                    HypergraphError::InvalidWeight { weight } => {
                        HypergraphError::InvalidWeightAt {
                            line: line_no,
                            weight,
                        }
                    }
                    other => HypergraphError::Parse {
                        line: line_no,
                        message: other.to_string(),
                    },
                })?;
        }

        debug!(
            nodes = graph.node_count(),
            hyperedges = graph.edge_count(),
            "parsed hypergraph"
        );
        Ok(graph)
    }

    /// Read a hypergraph file.
    ///
    /// # Errors
    ///
    /// [`HypergraphError::File`] if the file cannot be opened or read, plus
    /// every error of [`TextFormat::read`].
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn read_path(&self, path: impl AsRef<Path>) -> Result<Hypergraph, HypergraphError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| HypergraphError::File {
            path: path.to_path_buf(),
            source,
        })?;
        self.read(BufReader::new(file)).map_err(|e| match e {
            HypergraphError::Io(source) => HypergraphError::File {
                path: path.to_path_buf(),
                source,
            },
            other => other,
        })
    }

    /// Write `graph` with a header line followed by one line per hyperedge.
    ///
    /// Nothing is written unless every node name survives a read back.
    ///
    /// # Errors
    ///
    /// - [`HypergraphError::UnwritableName`] if a node name contains `sep`,
    ///   `delim`, or a line break.
    /// - [`HypergraphError::Io`] if writing fails.
    pub fn write<W: Write>(&self, graph: &Hypergraph, mut out: W) -> Result<(), HypergraphError> {
        for node in graph.nodes() {
            self.check_name(node.name())?;
        }

        writeln!(out, "Edge{}weight", self.sep)?;
        for edge in graph.hyperedges() {
            let members: Vec<&str> = edge.nodes().collect();
            writeln!(
                out,
                "{}{}{}",
                members.join(self.delim.as_str()),
                self.sep,
                edge.weight()
            )?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write a hypergraph file, replacing any existing content.
    ///
    /// # Errors
    ///
    /// Returns [`HypergraphError::File`] if the file cannot be created or written.
    #[instrument(skip(self, graph, path), fields(path = %path.as_ref().display()))]
    pub fn write_path(
        &self,
        graph: &Hypergraph,
        path: impl AsRef<Path>,
    ) -> Result<(), HypergraphError> {
        let path = path.as_ref();
        let to_file_error = |source| HypergraphError::File {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(to_file_error)?;
        self.write(graph, BufWriter::new(file)).map_err(|e| match e {
            HypergraphError::Io(source) => to_file_error(source),
            other => other,
        })
    }

    fn check_name(&self, name: &str) -> Result<(), HypergraphError> {
        let found = [self.sep.as_str(), self.delim.as_str(), "\n", "\r"]
            .into_iter()
            .find(|pat| !pat.is_empty() && name.contains(pat));
        match found {
            Some(pat) => Err(HypergraphError::UnwritableName {
                name: name.to_string(),
                found: pat.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn parse_line<'a>(
        &self,
        line: &'a str,
        line_no: usize,
    ) -> Result<(Vec<&'a str>, f64), HypergraphError> {
        let fields: Vec<&str> = line.split(self.sep.as_str()).collect();
        if !(1..=2).contains(&fields.len()) {
            return Err(HypergraphError::Parse {
                line: line_no,
                message: format!("expected 1 or 2 fields, found {}", fields.len()),
            });
        }

        let nodes: Vec<&str> = fields[0].split(self.delim.as_str()).map(str::trim).collect();
        if nodes.iter().any(|n| n.is_empty()) {
            return Err(HypergraphError::Parse {
                line: line_no,
                message: "empty node name".to_string(),
            });
        }

        let weight = fields
            .get(1)
            .and_then(|w| w.split(self.delim.as_str()).next())
            .and_then(|w| w.trim().parse::<f64>().ok())
            .unwrap_or(DEFAULT_WEIGHT);

        Ok((nodes, weight))
    }
}

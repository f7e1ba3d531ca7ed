#![forbid(unsafe_code)]
//! hypercut-core library.
//!
//! The undirected hypergraph model shared by the spectral pipeline and the
//! CLI, plus the tab/comma text format and the analysis configuration.
//!
//! # Conventions
//!
//! - **Errors**: Library operations return [`error::HypergraphError`];
//!   configuration loading uses `anyhow::Result` with context.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod format;
pub mod graph;

pub use config::{AnalysisConfig, ConvergenceCheck, RandomWalkConfig, SpectralConfig};
pub use error::{ErrorCode, HypergraphError};
pub use format::TextFormat;
pub use graph::{EdgeIndex, Hyperedge, Hypergraph, Node};

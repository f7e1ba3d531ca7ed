#![forbid(unsafe_code)]
//! Spectral analysis of undirected hypergraphs.
//!
//! # Pipeline
//!
//! ```text
//! Hypergraph (hypercut-core)
//!        ↓  incidence::Incidence::build()
//! Incidence (H, node ids, edge weights)
//!        ↓  node_degree_matrix() / edge_degree_matrix() / edge_weight_matrix()
//! D_v, D_e, W
//!   ├─ laplacian::normalized_laplacian()  → Δ
//!   │       ↓  partition::min_cut()
//!   │   Partition (Fiedler-vector bipartition)
//!   └─ random_walk::transition_matrix()   → P
//!           ↓  random_walk::stationary_distribution()
//!       StationaryResult
//! ```
//!
//! [`Analyzer`] wraps the pipeline with a cached incidence snapshot that is
//! rebuilt whenever the hypergraph's content hash changes.
//!
//! # Conventions
//!
//! - **Errors**: Fallible operations return [`SpectralError`].
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod analyzer;
pub mod connectivity;
pub mod error;
pub mod incidence;
pub mod laplacian;
pub mod partition;
pub mod random_walk;

pub use analyzer::Analyzer;
pub use error::SpectralError;
pub use incidence::Incidence;
pub use partition::{Partition, min_cut, second_min_index};
pub use random_walk::{StationaryResult, stationary_distribution, transition_matrix};

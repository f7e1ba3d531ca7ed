//! Cached front door to the spectral pipeline.
//!
//! [`Analyzer`] keeps the last [`Incidence`] snapshot and reuses it while
//! the hypergraph's content hash is unchanged. A missing, empty, or stale
//! snapshot is rebuilt before any derived matrix is computed, so callers
//! never see matrices from an older structure.
//!
//! ```rust,ignore
//! use hypercut_core::{AnalysisConfig, Hypergraph};
//! use hypercut_spectral::Analyzer;
//!
//! let mut g = Hypergraph::new();
//! g.add_hyperedge(["A", "B"], 1.0)?;
//! g.add_hyperedge(["B", "C"], 1.0)?;
//!
//! let mut analyzer = Analyzer::new(AnalysisConfig::default());
//! let cut = analyzer.min_cut(&g, 0.0)?;
//! ```

use hypercut_core::{AnalysisConfig, Hypergraph, SpectralConfig};
use nalgebra::{DMatrix, DVector};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::SpectralError;
use crate::incidence::Incidence;
use crate::laplacian::normalized_laplacian;
use crate::partition::{self, Partition};
use crate::random_walk::{self, StationaryResult};

#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
    cache: Option<Incidence>,
}

impl Analyzer {
    #[must_use]
    pub const fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            cache: None,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The incidence snapshot for `graph`, rebuilt if missing, empty, or stale.
    pub fn incidence(&mut self, graph: &Hypergraph) -> &Incidence {
        let fresh = self
            .cache
            .as_ref()
            .is_some_and(|inc| !inc.is_empty() && inc.is_valid_for(graph));
        if !fresh {
            if self.cache.is_some() {
                debug!("incidence snapshot stale or empty; rebuilding");
            }
            self.cache = None;
        }
        self.cache.get_or_insert_with(|| Incidence::build(graph))
    }

    /// `D_v` for `graph`.
    pub fn node_degree_matrix(&mut self, graph: &Hypergraph) -> DMatrix<f64> {
        self.incidence(graph).node_degree_matrix()
    }

    /// `D_e` for `graph`.
    pub fn edge_degree_matrix(&mut self, graph: &Hypergraph) -> DMatrix<f64> {
        self.incidence(graph).edge_degree_matrix()
    }

    /// `W` for `graph`.
    pub fn edge_weight_matrix(&mut self, graph: &Hypergraph) -> DMatrix<f64> {
        self.incidence(graph).edge_weight_matrix()
    }

    /// Normalized Laplacian of `graph`.
    ///
    /// # Errors
    ///
    /// See [`normalized_laplacian`].
    pub fn normalized_laplacian(&mut self, graph: &Hypergraph) -> Result<DMatrix<f64>, SpectralError> {
        normalized_laplacian(self.incidence(graph))
    }

    /// Random-walk transition matrix of `graph`.
    ///
    /// # Errors
    ///
    /// See [`random_walk::transition_matrix`].
    pub fn random_walk_matrix(&mut self, graph: &Hypergraph) -> Result<DMatrix<f64>, SpectralError> {
        random_walk::transition_matrix(self.incidence(graph))
    }

    /// A random starting distribution over `graph`'s nodes.
    pub fn random_start<R: Rng + ?Sized>(&mut self, graph: &Hypergraph, rng: &mut R) -> DVector<f64> {
        let n = self.incidence(graph).node_count();
        random_walk::random_start(n, rng)
    }

    /// Stationary distribution of `p` using the configured tolerance, cap,
    /// and convergence check.
    ///
    /// # Errors
    ///
    /// See [`random_walk::stationary_distribution`].
    pub fn stationary_distribution<R: Rng + ?Sized>(
        &self,
        p: &DMatrix<f64>,
        rng: &mut R,
    ) -> Result<StationaryResult, SpectralError> {
        random_walk::stationary_distribution(p, rng, &self.config.random_walk)
    }

    /// An RNG seeded from the configured seed, or from OS entropy.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        self.config
            .random_walk
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }

    /// Spectral bipartition of `graph` at `threshold`.
    ///
    /// # Errors
    ///
    /// See [`partition::min_cut`].
    pub fn min_cut(&mut self, graph: &Hypergraph, threshold: f64) -> Result<Partition, SpectralError> {
        let config = SpectralConfig {
            threshold,
            ..self.config.spectral.clone()
        };
        partition::min_cut(self.incidence(graph), &config)
    }
}

//! Random walk on a hypergraph and its stationary distribution.
//!
//! # Transition matrix
//!
//! ```text
//! P = D_v^{-1} · H · W · D_e^{-1} · Hᵀ
//! ```
//!
//! From node `u`, pick an incident hyperedge with probability proportional
//! to its weight, then a member of that hyperedge uniformly. Rows sum to 1
//! for valid input; this is not checked.
//!
//! # Power iteration
//!
//! Two independent random starting vectors `pi` and `pi_star` are drawn.
//! While they have not converged, `pi ← pi_star` and `pi_star ← pi · P`.
//!
//! Convergence uses [`ConvergenceCheck`] with tolerance `1e-4` by default.
//! The default one-sided check only looks at entries that shrank
//! (`pi[i] - pi_star[i] > tolerance`); [`ConvergenceCheck::Absolute`]
//! compares magnitudes. The loop is capped at `max_iter` iterations.

use hypercut_core::{ConvergenceCheck, RandomWalkConfig};
use nalgebra::{DMatrix, DVector};
use rand::Rng;
use tracing::{debug, instrument, warn};

use crate::error::SpectralError;
use crate::incidence::Incidence;
use crate::laplacian::{co_membership, inverse_node_degrees};

/// Result of a stationary-distribution computation.
#[derive(Debug, Clone)]
pub struct StationaryResult {
    /// Probability over node ids.
    pub distribution: DVector<f64>,
    /// Number of `pi · P` steps taken.
    pub iterations: usize,
}

/// Build the random-walk transition matrix `P` (size `|V| × |V|`).
///
/// # Errors
///
/// [`SpectralError::SingularMatrix`] for a zero-degree node or an empty
/// hyperedge.
#[instrument(skip(inc), fields(nodes = inc.node_count(), hyperedges = inc.edge_count()))]
pub fn transition_matrix(inc: &Incidence) -> Result<DMatrix<f64>, SpectralError> {
    let dv_inv = DMatrix::from_diagonal(&inverse_node_degrees(inc)?);
    Ok(dv_inv * co_membership(inc)?)
}

/// Draw `n` uniform samples from `[0, 1)` and normalise them to sum to 1.
///
/// This is not a uniform draw from the simplex. If every sample is zero the
/// uniform vector is returned.
pub fn random_start<R: Rng + ?Sized>(n: usize, rng: &mut R) -> DVector<f64> {
    let samples = DVector::from_iterator(n, (0..n).map(|_| rng.gen_range(0.0..1.0)));
    let total = samples.sum();
    if total > 0.0 {
        samples / total
    } else {
        DVector::from_element(n, 1.0 / n.max(1) as f64)
    }
}

/// Whether `pi_star` is within `tolerance` of `pi` under `check`.
#[must_use]
pub fn has_converged(
    pi: &DVector<f64>,
    pi_star: &DVector<f64>,
    tolerance: f64,
    check: ConvergenceCheck,
) -> bool {
    pi.iter().zip(pi_star.iter()).all(|(&a, &b)| {
        let diff = match check {
            ConvergenceCheck::OneSided => a - b,
            ConvergenceCheck::Absolute => (a - b).abs(),
        };
        diff <= tolerance
    })
}

/// Power-iterate `P` from random starts until the iterates agree.
///
/// # Errors
///
/// - [`SpectralError::InvalidArgument`] if `p` is not square or the
///   tolerance is negative or not finite.
/// - [`SpectralError::NotConverged`] after `config.max_iter` steps.
#[instrument(skip(p, rng, config), fields(n = p.nrows(), tolerance = config.tolerance))]
pub fn stationary_distribution<R: Rng + ?Sized>(
    p: &DMatrix<f64>,
    rng: &mut R,
    config: &RandomWalkConfig,
) -> Result<StationaryResult, SpectralError> {
    if !p.is_square() {
        return Err(SpectralError::InvalidArgument(format!(
            "transition matrix must be square, got {}x{}",
            p.nrows(),
            p.ncols()
        )));
    }
    if !(config.tolerance.is_finite() && config.tolerance >= 0.0) {
        return Err(SpectralError::InvalidArgument(format!(
            "tolerance must be finite and non-negative, got {}",
            config.tolerance
        )));
    }

    let n = p.nrows();
    let mut pi = random_start(n, rng);
    let mut pi_star = random_start(n, rng);
    let mut iterations = 0;

    while !has_converged(&pi, &pi_star, config.tolerance, config.convergence) {
        if iterations >= config.max_iter {
            warn!(iterations, "stationary distribution did not converge");
            return Err(SpectralError::NotConverged { iterations });
        }
        pi = pi_star;
        // Row vector times matrix: (πᵀ P)ᵀ = Pᵀ π.
        pi_star = p.tr_mul(&pi);
        iterations += 1;
    }

    debug!(iterations, "stationary distribution converged");
    Ok(StationaryResult {
        distribution: pi_star,
        iterations,
    })
}

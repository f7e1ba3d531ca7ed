//! Spectral bipartition (normalized min-cut).
//!
//! # Algorithm
//!
//! 1. Build the normalized Laplacian `Δ` ([`crate::laplacian`]).
//! 2. Reject disconnected input when configured to (a disconnected graph has
//!    a repeated zero eigenvalue and the cut is meaningless).
//! 3. Eigendecompose `Δ`.
//! 4. Pick the eigenvector of the second-smallest eigenvalue (the Fiedler
//!    vector) with [`second_min_index`].
//! 5. Node `i` goes to the first part iff `v[i] >= threshold`.
//!
//! # Eigensolver
//!
//! `Δ` is symmetric in exact arithmetic. It is symmetrised as
//! `(Δ + Δᵀ) / 2` to absorb rounding drift and handed to nalgebra's
//! [`SymmetricEigen`], which yields real eigenpairs.
//!
//! # Sign
//!
//! Eigenvectors are defined up to sign. The Fiedler vector is flipped so its
//! first non-negligible entry is positive, which makes the labelling of the
//! two parts reproducible.

use std::collections::BTreeMap;

use hypercut_core::SpectralConfig;
use nalgebra::{DMatrix, DVector, SymmetricEigen};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::connectivity::component_count;
use crate::error::SpectralError;
use crate::incidence::Incidence;
use crate::laplacian::normalized_laplacian;

/// Entries with magnitude below this are ignored when fixing the sign.
const SIGN_EPSILON: f64 = 1e-12;

/// Result of a spectral bipartition.
#[derive(Debug, Clone, Serialize)]
pub struct Partition {
    /// Nodes with Fiedler entry `>= threshold`, in node-id order.
    pub first: Vec<String>,
    /// All remaining nodes, in node-id order.
    pub second: Vec<String>,
    /// Threshold the cut was taken at.
    pub threshold: f64,
    /// Second-smallest eigenvalue of `Δ` (algebraic connectivity).
    pub eigenvalue: f64,
    /// Fiedler vector entries keyed by node name.
    pub fiedler: BTreeMap<String, f64>,
}

/// Index of the second-smallest value.
///
/// Starts from the first occurrence of the minimum and of the maximum, then
/// scans for a value strictly above the minimum and strictly below the
/// current candidate. When every value is equal the index of the maximum
/// (the first element) is returned. Repeated minima are therefore never
/// selected: for `[0, 0, 1]` the result is `2`.
///
/// Returns `None` for an empty slice.
#[must_use]
pub fn second_min_index(values: &[f64]) -> Option<usize> {
    let (&first, _) = values.split_first()?;

    let (mut min_index, mut min_value) = (0, first);
    let (mut max_index, mut max_value) = (0, first);
    for (i, &v) in values.iter().enumerate() {
        if v < min_value {
            (min_index, min_value) = (i, v);
        }
        if v > max_value {
            (max_index, max_value) = (i, v);
        }
    }
    debug!(min_index, min_value, max_index, max_value, "eigenvalue range");

    let mut second_index = max_index;
    let mut second_value = max_value;
    for (i, &v) in values.iter().enumerate() {
        if v > min_value && v < second_value {
            (second_index, second_value) = (i, v);
        }
    }
    Some(second_index)
}

/// Bipartition the hypergraph behind `inc` at `config.threshold`.
///
/// # Errors
///
/// - [`SpectralError::InvalidArgument`] for a non-finite threshold or an
///   empty node set.
/// - [`SpectralError::SingularMatrix`] from the Laplacian.
/// - [`SpectralError::Disconnected`] when `config.require_connected` is set
///   and the hypergraph has more than one component.
#[instrument(skip(inc, config), fields(threshold = config.threshold))]
pub fn min_cut(inc: &Incidence, config: &SpectralConfig) -> Result<Partition, SpectralError> {
    let threshold = config.threshold;
    if !threshold.is_finite() {
        return Err(SpectralError::InvalidArgument(format!(
            "threshold must be finite, got {threshold}"
        )));
    }
    if inc.node_count() == 0 {
        return Err(SpectralError::InvalidArgument(
            "cannot decompose an empty Laplacian: hypergraph has no nodes".to_string(),
        ));
    }

    let delta = normalized_laplacian(inc)?;

    if config.require_connected {
        let components = component_count(inc);
        if components > 1 {
            return Err(SpectralError::Disconnected { components });
        }
    }

    let (eigenvalue, fiedler) = fiedler_pair(&delta)?;

    let mut first = Vec::new();
    let mut second = Vec::new();
    for (id, name) in inc.node_names().iter().enumerate() {
        if fiedler[id] >= threshold {
            first.push(name.clone());
        } else {
            second.push(name.clone());
        }
    }

    debug!(
        eigenvalue,
        first = first.len(),
        second = second.len(),
        "bipartition computed"
    );

    Ok(Partition {
        first,
        second,
        threshold,
        eigenvalue,
        fiedler: inc
            .node_names()
            .iter()
            .cloned()
            .zip(fiedler.iter().copied())
            .collect(),
    })
}

/// Second-smallest eigenvalue of `delta` and its sign-normalised eigenvector.
///
/// # Errors
///
/// [`SpectralError::InvalidArgument`] if `delta` is empty or not square.
pub fn fiedler_pair(delta: &DMatrix<f64>) -> Result<(f64, DVector<f64>), SpectralError> {
    if !delta.is_square() || delta.is_empty() {
        return Err(SpectralError::InvalidArgument(format!(
            "expected a non-empty square matrix, got {}x{}",
            delta.nrows(),
            delta.ncols()
        )));
    }

    let symmetric = (delta + delta.transpose()) * 0.5;
    let eigen = SymmetricEigen::new(symmetric);

    let index = second_min_index(eigen.eigenvalues.as_slice()).ok_or_else(|| {
        SpectralError::InvalidArgument("eigendecomposition returned no eigenvalues".to_string())
    })?;

    let mut vector: DVector<f64> = eigen.eigenvectors.column(index).into_owned();
    if vector
        .iter()
        .find(|v| v.abs() > SIGN_EPSILON)
        .is_some_and(|&v| v < 0.0)
    {
        vector.neg_mut();
    }

    Ok((eigen.eigenvalues[index], vector))
}

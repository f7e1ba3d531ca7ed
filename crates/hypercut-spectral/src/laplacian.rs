//! Normalized hypergraph Laplacian.
//!
//! ```text
//! Δ = I − D_v^{-1/2} · H · W · D_e^{-1} · Hᵀ · D_v^{-1/2}
//! ```
//!
//! The degree matrices are diagonal, so their inverses are taken entrywise.
//! A zero entry means a node with no incident weight or a hyperedge with no
//! members; both are reported as [`SpectralError::SingularMatrix`] rather
//! than producing infinities.

use nalgebra::{DMatrix, DVector};
use tracing::instrument;

use crate::error::SpectralError;
use crate::incidence::Incidence;

/// Diagonal of `D_v^{-1}`.
///
/// # Errors
///
/// [`SpectralError::SingularMatrix`] if some node has zero degree.
pub fn inverse_node_degrees(inc: &Incidence) -> Result<DVector<f64>, SpectralError> {
    let degrees = inc.node_degrees();
    check_nonzero(&degrees, "D_v", |i| {
        inc.node_name(i).unwrap_or("<unnamed>").to_string()
    })?;
    Ok(degrees.map(f64::recip))
}

/// Diagonal of `D_v^{-1/2}`: square root first, then the inverse.
///
/// # Errors
///
/// [`SpectralError::SingularMatrix`] if some node has zero degree.
pub fn inverse_sqrt_node_degrees(inc: &Incidence) -> Result<DVector<f64>, SpectralError> {
    let roots = inc.node_degrees().map(f64::sqrt);
    check_nonzero(&roots, "D_v", |i| {
        inc.node_name(i).unwrap_or("<unnamed>").to_string()
    })?;
    Ok(roots.map(f64::recip))
}

/// Diagonal of `D_e^{-1}`.
///
/// # Errors
///
/// [`SpectralError::SingularMatrix`] if some hyperedge has no members.
pub fn inverse_edge_degrees(inc: &Incidence) -> Result<DVector<f64>, SpectralError> {
    let degrees = inc.edge_degrees();
    check_nonzero(&degrees, "D_e", |j| format!("hyperedge {j}"))?;
    Ok(degrees.map(f64::recip))
}

/// `H · W · D_e^{-1} · Hᵀ`, the weighted co-membership matrix shared by the
/// Laplacian and the random-walk transition matrix.
pub(crate) fn co_membership(inc: &Incidence) -> Result<DMatrix<f64>, SpectralError> {
    let de_inv = DMatrix::from_diagonal(&inverse_edge_degrees(inc)?);
    let w = inc.edge_weight_matrix();
    let h = &inc.matrix;
    Ok(h * w * de_inv * h.transpose())
}

/// Compute the normalized Laplacian `Δ` (size `|V| × |V|`).
///
/// Symmetric up to floating-point drift.
///
/// # Errors
///
/// [`SpectralError::SingularMatrix`] for a zero-degree node or an empty
/// hyperedge.
#[instrument(skip(inc), fields(nodes = inc.node_count(), hyperedges = inc.edge_count()))]
pub fn normalized_laplacian(inc: &Incidence) -> Result<DMatrix<f64>, SpectralError> {
    let n = inc.node_count();
    let dv_inv_sqrt = DMatrix::from_diagonal(&inverse_sqrt_node_degrees(inc)?);
    let theta = &dv_inv_sqrt * co_membership(inc)? * &dv_inv_sqrt;
    Ok(DMatrix::identity(n, n) - theta)
}

fn check_nonzero(
    diagonal: &DVector<f64>,
    matrix: &'static str,
    label: impl Fn(usize) -> String,
) -> Result<(), SpectralError> {
    match diagonal.iter().position(|&d| d == 0.0) {
        Some(index) => Err(SpectralError::SingularMatrix {
            matrix,
            index,
            label: label(index),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hypercut_core::Hypergraph;
    use nalgebra::SymmetricEigen;

    fn make_graph(edges: &[(&[&str], f64)]) -> Hypergraph {
        let mut g = Hypergraph::new();
        for (nodes, w) in edges {
            g.add_hyperedge(nodes.iter().copied(), *w).unwrap();
        }
        g
    }

    fn smallest_eigenvalue(m: &DMatrix<f64>) -> f64 {
        let sym = (m + m.transpose()) * 0.5;
        SymmetricEigen::new(sym)
            .eigenvalues
            .iter()
            .copied()
            .fold(f64::INFINITY, f64::min)
    }

    #[test]
    fn laplacian_is_square_in_node_count() {
        let g = make_graph(&[(&["A", "B"], 1.0), (&["C", "D"], 1.0), (&["B", "C"], 1.0)]);
        let delta = normalized_laplacian(&Incidence::build(&g)).unwrap();
        assert_eq!(delta.shape(), (4, 4));
    }

    #[test]
    fn single_hyperedge_has_zero_eigenvalue() {
        let g = make_graph(&[(&["A", "B", "C", "D"], 1.0)]);
        let delta = normalized_laplacian(&Incidence::build(&g)).unwrap();
        assert!(smallest_eigenvalue(&delta).abs() < 1e-6);
    }

    #[test]
    fn laplacian_is_nearly_symmetric() {
        let g = make_graph(&[
            (&["A", "B", "C"], 2.0),
            (&["C", "D"], 0.5),
            (&["D", "E", "A"], 1.5),
        ]);
        let delta = normalized_laplacian(&Incidence::build(&g)).unwrap();
        let asym = (&delta - delta.transpose()).amax();
        assert!(asym < 1e-12, "asymmetry {asym}");
    }

    #[test]
    fn two_node_graph_matches_closed_form() {
        // One edge {A,B}, weight 1: D_v = I, D_e = [2], Θ = 0.5·ones.
        let g = make_graph(&[(&["A", "B"], 1.0)]);
        let delta = normalized_laplacian(&Incidence::build(&g)).unwrap();
        let expected = DMatrix::from_row_slice(2, 2, &[0.5, -0.5, -0.5, 0.5]);
        assert!((delta - expected).amax() < 1e-12);
    }

    #[test]
    fn zero_degree_node_is_singular() {
        let mut g = make_graph(&[(&["A", "B"], 1.0)]);
        g.add_node("C");
        let err = normalized_laplacian(&Incidence::build(&g)).unwrap_err();
        assert_eq!(
            err,
            SpectralError::SingularMatrix {
                matrix: "D_v",
                index: 2,
                label: "C".into(),
            }
        );
    }

    #[test]
    fn zero_weight_edges_make_node_singular() {
        let g = make_graph(&[(&["A", "B"], 1.0), (&["B", "C"], 0.0)]);
        let err = normalized_laplacian(&Incidence::build(&g)).unwrap_err();
        assert!(matches!(
            err,
            SpectralError::SingularMatrix { matrix: "D_v", ref label, .. } if label == "C"
        ));
    }

    #[test]
    fn empty_hyperedge_is_singular() {
        let mut g = make_graph(&[(&["A", "B"], 1.0)]);
        g.add_hyperedge(Vec::<String>::new(), 1.0).unwrap();
        let err = normalized_laplacian(&Incidence::build(&g)).unwrap_err();
        assert_eq!(
            err,
            SpectralError::SingularMatrix {
                matrix: "D_e",
                index: 1,
                label: "hyperedge 1".into(),
            }
        );
    }

    #[test]
    fn inverse_sqrt_degrees_values() {
        let g = make_graph(&[(&["A", "B"], 4.0), (&["B"], 5.0)]);
        let s = inverse_sqrt_node_degrees(&Incidence::build(&g)).unwrap();
        assert!((s[0] - 0.5).abs() < 1e-12);
        assert!((s[1] - 1.0 / 3.0).abs() < 1e-12);
    }
}

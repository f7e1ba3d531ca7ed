//! Incidence matrix and the diagonal matrices derived from it.
//!
//! # Overview
//!
//! [`Incidence::build`] scans the hypergraph once and produces:
//!
//! - `H`, the `|V| × |E|` 0/1 incidence matrix,
//! - the node-id mapping (name ↔ row),
//! - the edge-weight vector `w` (one entry per column).
//!
//! ## Node ids
//!
//! Ids are handed out in first-seen order while scanning hyperedges in
//! insertion order and each hyperedge's members in lexicographic order.
//! Nodes that belong to no hyperedge get the remaining ids in registration
//! order, so ids always cover `0..|V|` contiguously.
//!
//! ## Staleness
//!
//! The snapshot remembers the hypergraph's content hash. After any
//! structural change [`Incidence::is_valid_for`] returns `false` and the
//! snapshot must be rebuilt.
//!
//! ## Diagonals
//!
//! ```text
//! D_v[i][i] = Σ_j H[i][j] · w[j]    node degree
//! D_e[j][j] = Σ_i H[i][j]           edge degree
//! W[j][j]   = w[j]                  edge weight
//! ```

use std::collections::HashMap;

use hypercut_core::Hypergraph;
use nalgebra::{DMatrix, DVector};
use tracing::{debug, instrument};

/// Incidence snapshot of a hypergraph.
#[derive(Debug, Clone)]
pub struct Incidence {
    /// `|V| × |E|` membership matrix holding `0.0` or `1.0`.
    pub matrix: DMatrix<f64>,
    /// Edge weights in hyperedge insertion order.
    pub edge_weights: DVector<f64>,
    /// Node name for each id.
    node_names: Vec<String>,
    /// Id for each node name.
    node_ids: HashMap<String, usize>,
    /// Content hash of the hypergraph this was built from.
    content_hash: String,
}

impl Incidence {
    /// Build the incidence snapshot of `graph`.
    ///
    /// An empty node or edge set yields a zero-sized matrix.
    #[must_use]
    #[instrument(skip(graph))]
    pub fn build(graph: &Hypergraph) -> Self {
        let n = graph.node_count();
        let m = graph.edge_count();

        let mut matrix = DMatrix::<f64>::zeros(n, m);
        let mut edge_weights = DVector::<f64>::zeros(m);
        let mut node_names: Vec<String> = Vec::with_capacity(n);
        let mut node_ids: HashMap<String, usize> = HashMap::with_capacity(n);

        for (edge_id, edge) in graph.hyperedges().iter().enumerate() {
            for name in edge.nodes() {
                let node_id = *node_ids.entry(name.to_string()).or_insert_with(|| {
                    node_names.push(name.to_string());
                    node_names.len() - 1
                });
                matrix[(node_id, edge_id)] = 1.0;
            }
            edge_weights[edge_id] = edge.weight();
        }

        // Nodes outside every hyperedge still get a (zero) row.
        for node in graph.nodes() {
            if !node_ids.contains_key(node.name()) {
                node_ids.insert(node.name().to_string(), node_names.len());
                node_names.push(node.name().to_string());
            }
        }

        debug!(nodes = n, hyperedges = m, "incidence matrix built");

        Self {
            matrix,
            edge_weights,
            node_names,
            node_ids,
            content_hash: graph.content_hash(),
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.matrix.nrows()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.matrix.ncols()
    }

    /// `true` when the matrix has no entries (no nodes or no hyperedges).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.matrix.is_empty()
    }

    /// Check whether this snapshot still describes `graph`.
    #[must_use]
    pub fn is_valid_for(&self, graph: &Hypergraph) -> bool {
        self.content_hash == graph.content_hash()
    }

    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }

    /// Row index assigned to a node name.
    #[must_use]
    pub fn node_id(&self, name: &str) -> Option<usize> {
        self.node_ids.get(name).copied()
    }

    /// Node name for a row index.
    #[must_use]
    pub fn node_name(&self, id: usize) -> Option<&str> {
        self.node_names.get(id).map(String::as_str)
    }

    /// Node names ordered by id.
    #[must_use]
    pub fn node_names(&self) -> &[String] {
        &self.node_names
    }

    /// Weighted node degrees: `H · w`.
    #[must_use]
    pub fn node_degrees(&self) -> DVector<f64> {
        &self.matrix * &self.edge_weights
    }

    /// Member counts per hyperedge (column sums of `H`).
    #[must_use]
    pub fn edge_degrees(&self) -> DVector<f64> {
        DVector::from_iterator(
            self.edge_count(),
            self.matrix.column_iter().map(|col| col.sum()),
        )
    }

    /// `D_v`: diagonal of weighted node degrees.
    #[must_use]
    pub fn node_degree_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.node_degrees())
    }

    /// `D_e`: diagonal of hyperedge member counts.
    #[must_use]
    pub fn edge_degree_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.edge_degrees())
    }

    /// `W`: diagonal of hyperedge weights.
    #[must_use]
    pub fn edge_weight_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.edge_weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_graph(edges: &[(&[&str], f64)]) -> Hypergraph {
        let mut g = Hypergraph::new();
        for (nodes, w) in edges {
            g.add_hyperedge(nodes.iter().copied(), *w).unwrap();
        }
        g
    }

    fn chain() -> Hypergraph {
        make_graph(&[(&["A", "B"], 1.0), (&["C", "D"], 1.0), (&["B", "C"], 1.0)])
    }

    #[test]
    fn empty_graph_yields_empty_matrix() {
        let inc = Incidence::build(&Hypergraph::new());
        assert!(inc.is_empty());
        assert_eq!(inc.node_count(), 0);
        assert_eq!(inc.edge_count(), 0);
    }

    #[test]
    fn nodes_without_edges_yield_empty_matrix_but_mapping() {
        let mut g = Hypergraph::new();
        g.add_node("A");
        g.add_node("B");
        let inc = Incidence::build(&g);
        assert!(inc.is_empty());
        assert_eq!(inc.node_count(), 2);
        assert_eq!(inc.node_id("B"), Some(1));
    }

    #[test]
    fn chain_shape_and_membership() {
        let inc = Incidence::build(&chain());
        assert_eq!(inc.matrix.shape(), (4, 3));

        // First-seen order: A, B (edge 0), C, D (edge 1).
        let ids: Vec<usize> = ["A", "B", "C", "D"]
            .iter()
            .map(|n| inc.node_id(n).unwrap())
            .collect();
        assert_eq!(ids, [0, 1, 2, 3]);

        let expected = DMatrix::from_row_slice(
            4,
            3,
            &[
                1.0, 0.0, 0.0, //
                1.0, 0.0, 1.0, //
                0.0, 1.0, 1.0, //
                0.0, 1.0, 0.0, //
            ],
        );
        assert_eq!(inc.matrix, expected);
    }

    #[test]
    fn columns_sum_to_member_count() {
        let g = make_graph(&[(&["A", "B", "C"], 2.0), (&["C"], 1.0), (&["A", "D"], 3.0)]);
        let inc = Incidence::build(&g);
        for (j, edge) in g.hyperedges().iter().enumerate() {
            assert!((inc.matrix.column(j).sum() - edge.len() as f64).abs() < f64::EPSILON);
        }
        assert_eq!(inc.edge_degrees().as_slice(), &[3.0, 1.0, 2.0]);
    }

    #[test]
    fn ids_follow_lexicographic_members_within_edge() {
        let g = make_graph(&[(&["Z", "M", "A"], 1.0)]);
        let inc = Incidence::build(&g);
        assert_eq!(inc.node_names(), ["A", "M", "Z"]);
    }

    #[test]
    fn isolated_nodes_get_trailing_ids() {
        let mut g = Hypergraph::new();
        g.add_node("lonely");
        g.add_hyperedge(["B", "A"], 1.0).unwrap();
        let inc = Incidence::build(&g);
        assert_eq!(inc.node_names(), ["A", "B", "lonely"]);
        assert_eq!(inc.matrix.row(2).sum(), 0.0);
    }

    #[test]
    fn node_degrees_are_weighted_sums() {
        let g = make_graph(&[(&["A", "B"], 2.0), (&["B", "C"], 0.5), (&["A", "B", "C"], 1.0)]);
        let inc = Incidence::build(&g);
        let dv = inc.node_degree_matrix();
        assert!((dv[(inc.node_id("A").unwrap(), inc.node_id("A").unwrap())] - 3.0).abs() < 1e-12);
        assert!((dv[(inc.node_id("B").unwrap(), inc.node_id("B").unwrap())] - 3.5).abs() < 1e-12);
        assert!((dv[(inc.node_id("C").unwrap(), inc.node_id("C").unwrap())] - 1.5).abs() < 1e-12);
        assert_eq!(dv[(0, 1)], 0.0);
    }

    #[test]
    fn weight_matrix_matches_edge_order() {
        let g = make_graph(&[(&["A", "B"], 4.0), (&["B", "C"], 0.25)]);
        let inc = Incidence::build(&g);
        let w = inc.edge_weight_matrix();
        assert_eq!(w.shape(), (2, 2));
        assert_eq!(w.diagonal().as_slice(), &[4.0, 0.25]);
    }

    #[test]
    fn edge_degree_matrix_of_chain() {
        let inc = Incidence::build(&chain());
        assert_eq!(inc.edge_degree_matrix().diagonal().as_slice(), &[2.0, 2.0, 2.0]);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let g = chain();
        let a = Incidence::build(&g);
        let b = Incidence::build(&g);
        assert_eq!(a.matrix, b.matrix);
        assert_eq!(a.node_names(), b.node_names());
        assert_eq!(a.edge_weights, b.edge_weights);
    }

    #[test]
    fn snapshot_goes_stale_after_mutation() {
        let mut g = chain();
        let inc = Incidence::build(&g);
        assert!(inc.is_valid_for(&g));
        g.add_hyperedge(["D", "E"], 1.0).unwrap();
        assert!(!inc.is_valid_for(&g));
    }
}

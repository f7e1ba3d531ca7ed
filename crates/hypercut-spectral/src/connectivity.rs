//! Connected components of a hypergraph.
//!
//! Two nodes are connected when they share a hyperedge (the clique
//! expansion). Components are found with a union-find over the columns of
//! the incidence matrix, so no explicit clique graph is materialised.

use std::collections::HashSet;

use petgraph::unionfind::UnionFind;

use crate::incidence::Incidence;

/// Number of connected components among the incidence matrix's nodes.
///
/// Isolated nodes count as their own component. An empty node set has zero
/// components.
#[must_use]
pub fn component_count(inc: &Incidence) -> usize {
    let labels = component_labels(inc);
    labels.iter().collect::<HashSet<_>>().len()
}

/// Component representative for each node id.
#[must_use]
pub fn component_labels(inc: &Incidence) -> Vec<usize> {
    let mut uf = UnionFind::<usize>::new(inc.node_count());

    for col in inc.matrix.column_iter() {
        let mut members = col
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v != 0.0)
            .map(|(i, _)| i);
        if let Some(first) = members.next() {
            for other in members {
                uf.union(first, other);
            }
        }
    }

    uf.into_labeling()
}

//! Undirected, weighted hypergraph.
//!
//! # Overview
//!
//! A [`Hypergraph`] owns a set of named [`Node`]s and a list of
//! [`Hyperedge`]s. Each hyperedge references its members by name and
//! carries a non-negative weight.
//!
//! ## Ordering
//!
//! Matrix row and column indices downstream are derived from iteration
//! order, so both collections iterate deterministically:
//!
//! - nodes in registration order,
//! - hyperedges in insertion order,
//! - members of a hyperedge in lexicographic order.
//!
//! ## Cache Invalidation
//!
//! [`Hypergraph::content_hash`] is a BLAKE3 hash of the node list and the
//! hyperedge list. Derived matrices record the hash they were built from and
//! compare against it to detect structural changes.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap};
use std::fmt;

use tracing::trace;

use crate::error::HypergraphError;

/// Position of a hyperedge in insertion order.
pub type EdgeIndex = usize;

// ---------------------------------------------------------------------------
// Node
// ---------------------------------------------------------------------------

/// A hypergraph vertex, identified by its unique name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Node {
    name: String,
}

impl Node {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

// ---------------------------------------------------------------------------
// Hyperedge
// ---------------------------------------------------------------------------

/// An undirected hyperedge: a set of member node names plus a weight.
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperedge {
    nodes: BTreeSet<String>,
    weight: f64,
}

impl Hyperedge {
    /// Create a hyperedge from member names. Duplicate names collapse.
    ///
    /// # Errors
    ///
    /// Returns [`HypergraphError::InvalidWeight`] if `weight` is negative,
    /// NaN, or infinite.
    pub fn new<I, S>(nodes: I, weight: f64) -> Result<Self, HypergraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        validate_weight(weight)?;
        Ok(Self {
            nodes: nodes.into_iter().map(Into::into).collect(),
            weight,
        })
    }

    /// Member names in lexicographic order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.nodes.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains(name)
    }

    /// Number of member nodes (the hyperedge degree).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub const fn weight(&self) -> f64 {
        self.weight
    }
}

fn validate_weight(weight: f64) -> Result<(), HypergraphError> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(HypergraphError::InvalidWeight { weight })
    }
}

// ---------------------------------------------------------------------------
// Hypergraph
// ---------------------------------------------------------------------------

/// An undirected hypergraph with deterministic iteration order.
#[derive(Debug, Clone, Default)]
pub struct Hypergraph {
    nodes: Vec<Node>,
    node_map: HashMap<String, usize>,
    hyperedges: Vec<Hyperedge>,
}

impl Hypergraph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a node. Returns `false` if a node with this name exists.
    pub fn add_node(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.node_map.contains_key(&name) {
            return false;
        }
        self.node_map.insert(name.clone(), self.nodes.len());
        self.nodes.push(Node::new(name));
        true
    }

    /// Add a hyperedge by member names, registering any unseen nodes in the
    /// order they are given.
    ///
    /// # Errors
    ///
    /// Returns [`HypergraphError::InvalidWeight`] if `weight` is negative,
    /// NaN, or infinite. The hypergraph is unchanged on error.
    pub fn add_hyperedge<I, S>(&mut self, nodes: I, weight: f64) -> Result<EdgeIndex, HypergraphError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = nodes.into_iter().map(Into::into).collect();
        let edge = Hyperedge::new(names.iter().cloned(), weight)?;

        for name in names {
            self.add_node(name);
        }

        let index = self.hyperedges.len();
        trace!(index, members = edge.len(), weight, "hyperedge added");
        self.hyperedges.push(edge);
        Ok(index)
    }

    /// Nodes in registration order.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Hyperedges in insertion order.
    #[must_use]
    pub fn hyperedges(&self) -> &[Hyperedge] {
        &self.hyperedges
    }

    /// Look up a node by name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.node_map.get(name).map(|&i| &self.nodes[i])
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.hyperedges.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.hyperedges.is_empty()
    }

    /// BLAKE3 hash of the structure, formatted as `blake3:<hex>`.
    ///
    /// Any added node or hyperedge changes the hash.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for node in &self.nodes {
            hasher.update(b"n\x00");
            hasher.update(node.name.as_bytes());
            hasher.update(b"\x00");
        }
        for edge in &self.hyperedges {
            hasher.update(b"e\x00");
            for member in &edge.nodes {
                hasher.update(member.as_bytes());
                hasher.update(b"\x00");
            }
            hasher.update(&edge.weight.to_bits().to_le_bytes());
        }
        format!("blake3:{}", hasher.finalize().to_hex())
    }
}

impl fmt::Display for Hypergraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, edge) in self.hyperedges.iter().enumerate() {
            let members: Vec<&str> = edge.nodes().collect();
            writeln!(
                f,
                "Edge {}: Nodes: {{{}}}, weight: {}",
                i + 1,
                members.join(", "),
                edge.weight
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_hyperedge_registers_members_in_given_order() {
        let mut g = Hypergraph::new();
        g.add_hyperedge(["C", "A"], 1.0).unwrap();
        g.add_hyperedge(["B", "A"], 2.0).unwrap();

        let names: Vec<&str> = g.nodes().iter().map(Node::name).collect();
        assert_eq!(names, ["C", "A", "B"]);
        assert_eq!(g.edge_count(), 2);
    }

    #[test]
    fn hyperedge_members_are_sorted_and_deduplicated() {
        let edge = Hyperedge::new(["b", "a", "b"], 1.0).unwrap();
        assert_eq!(edge.nodes().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(edge.len(), 2);
    }

    #[test]
    fn negative_and_non_finite_weights_rejected() {
        let mut g = Hypergraph::new();
        for bad in [-1.0, f64::NAN, f64::INFINITY] {
            let err = g.add_hyperedge(["A"], bad).unwrap_err();
            assert!(matches!(err, HypergraphError::InvalidWeight { .. }));
        }
        assert!(g.is_empty(), "failed adds must not register nodes");
    }

    #[test]
    fn zero_weight_is_allowed() {
        let mut g = Hypergraph::new();
        g.add_hyperedge(["A", "B"], 0.0).unwrap();
        assert_eq!(g.hyperedges()[0].weight(), 0.0);
    }

    #[test]
    fn add_node_is_idempotent() {
        let mut g = Hypergraph::new();
        assert!(g.add_node("A"));
        assert!(!g.add_node("A"));
        assert_eq!(g.node_count(), 1);
        assert_eq!(g.node("A").map(Node::name), Some("A"));
        assert!(g.node("Z").is_none());
    }

    #[test]
    fn content_hash_tracks_structure() {
        let mut g = Hypergraph::new();
        g.add_hyperedge(["A", "B"], 1.0).unwrap();
        let h1 = g.content_hash();
        assert_eq!(h1, g.clone().content_hash());
        assert!(h1.starts_with("blake3:"));

        g.add_node("Z");
        let h2 = g.content_hash();
        assert_ne!(h1, h2);

        g.add_hyperedge(["A", "Z"], 1.0).unwrap();
        assert_ne!(h2, g.content_hash());
    }

    #[test]
    fn content_hash_sees_weight_changes() {
        let mut a = Hypergraph::new();
        a.add_hyperedge(["A", "B"], 1.0).unwrap();
        let mut b = Hypergraph::new();
        b.add_hyperedge(["A", "B"], 2.0).unwrap();
        assert_ne!(a.content_hash(), b.content_hash());
    }

    #[test]
    fn display_lists_edges_one_based() {
        let mut g = Hypergraph::new();
        g.add_hyperedge(["B", "A"], 1.5).unwrap();
        g.add_hyperedge(["C"], 1.0).unwrap();
        let out = g.to_string();
        assert!(out.contains("Edge 1: Nodes: {A, B}, weight: 1.5"));
        assert!(out.contains("Edge 2: Nodes: {C}, weight: 1"));
    }
}

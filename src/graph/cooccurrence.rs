//! Undirected weighted co-occurrence graph
//!
//! Nodes are stored densely in insertion order with an FxHashMap lookup,
//! so node identity is generic while iteration stays deterministic.
//! Each undirected edge is stored once in the edge map under its
//! normalized index pair; the per-node incidence sets mirror that map.

use crate::errors::{KeyGraphError, Result};
use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::fmt::Debug;
use std::hash::Hash;

/// Normalized edge key: `(smaller index, larger index)`
pub(crate) type EdgeKey = (usize, usize);

pub(crate) fn edge_key(a: usize, b: usize) -> EdgeKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// A generic undirected graph with one weighted edge per node pair
#[derive(Debug, Clone)]
pub struct CooccurrenceGraph<N, W> {
    /// Node storage, by insertion order
    nodes: Vec<N>,
    /// Maps node -> dense index
    node_to_idx: FxHashMap<N, usize>,
    /// Edge weights keyed by normalized index pair
    edges: FxHashMap<EdgeKey, W>,
    /// Adjacent node indices per node
    incidence: Vec<BTreeSet<usize>>,
}

impl<N, W> Default for CooccurrenceGraph<N, W>
where
    N: Eq + Hash + Clone + Debug,
    W: Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N, W> CooccurrenceGraph<N, W>
where
    N: Eq + Hash + Clone + Debug,
    W: Copy,
{
    /// Create a new empty graph
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_to_idx: FxHashMap::default(),
            edges: FxHashMap::default(),
            incidence: Vec::new(),
        }
    }

    /// Create a graph with pre-allocated node capacity
    pub fn with_capacity(node_capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(node_capacity),
            node_to_idx: FxHashMap::with_capacity_and_hasher(node_capacity, Default::default()),
            edges: FxHashMap::default(),
            incidence: Vec::with_capacity(node_capacity),
        }
    }

    /// Add a node if absent, returning its index either way
    pub fn add_node(&mut self, node: N) -> usize {
        if let Some(&idx) = self.node_to_idx.get(&node) {
            return idx;
        }

        let idx = self.nodes.len();
        self.node_to_idx.insert(node.clone(), idx);
        self.nodes.push(node);
        self.incidence.push(BTreeSet::new());
        idx
    }

    /// Add an undirected edge between two existing, distinct nodes.
    ///
    /// Re-adding an existing pair replaces its weight.
    pub fn add_edge(&mut self, a: &N, b: &N, weight: W) -> Result<()> {
        let ia = self.require(a)?;
        let ib = self.require(b)?;
        if ia == ib {
            return Err(KeyGraphError::invalid_graph_operation(format!(
                "self-loop on {:?} rejected",
                a
            )));
        }
        self.insert_edge(ia, ib, weight);
        Ok(())
    }

    /// Remove the edge between two nodes, returning its weight; no-op if absent
    pub fn remove_edge(&mut self, a: &N, b: &N) -> Option<W> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        self.take_edge(ia, ib)
    }

    /// Distinct neighbours of a node, in node insertion order
    pub fn neighbors(&self, node: &N) -> Result<Vec<&N>> {
        let idx = self.require(node)?;
        Ok(self.incidence[idx].iter().map(|&n| &self.nodes[n]).collect())
    }

    /// Check if the node is present
    pub fn contains_node(&self, node: &N) -> bool {
        self.node_to_idx.contains_key(node)
    }

    /// Check if an edge joins the two nodes
    pub fn has_edge(&self, a: &N, b: &N) -> bool {
        self.edge_weight(a, b).is_some()
    }

    /// Weight of the edge between two nodes
    pub fn edge_weight(&self, a: &N, b: &N) -> Option<W> {
        let ia = self.index_of(a)?;
        let ib = self.index_of(b)?;
        self.edges.get(&edge_key(ia, ib)).copied()
    }

    /// Get the insertion index of a node
    pub fn index_of(&self, node: &N) -> Option<usize> {
        self.node_to_idx.get(node).copied()
    }

    /// Get a node by insertion index
    pub fn node(&self, idx: usize) -> Option<&N> {
        self.nodes.get(idx)
    }

    /// Iterate over all nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.nodes.iter()
    }

    /// All edges as `(a, b, weight)`, ordered by endpoint insertion indices
    pub fn edges(&self) -> Vec<(&N, &N, W)> {
        self.sorted_edge_keys()
            .into_iter()
            .map(|(a, b)| (&self.nodes[a], &self.nodes[b], self.edges[&(a, b)]))
            .collect()
    }

    /// Get the number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Check if the graph is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn require(&self, node: &N) -> Result<usize> {
        self.index_of(node).ok_or_else(|| {
            KeyGraphError::invalid_graph_operation(format!("node {:?} is not in the graph", node))
        })
    }

    pub(crate) fn sorted_edge_keys(&self) -> Vec<EdgeKey> {
        let mut keys: Vec<EdgeKey> = self.edges.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    pub(crate) fn insert_edge(&mut self, a: usize, b: usize, weight: W) {
        self.edges.insert(edge_key(a, b), weight);
        self.incidence[a].insert(b);
        self.incidence[b].insert(a);
    }

    pub(crate) fn take_edge(&mut self, a: usize, b: usize) -> Option<W> {
        let weight = self.edges.remove(&edge_key(a, b))?;
        self.incidence[a].remove(&b);
        self.incidence[b].remove(&a);
        Some(weight)
    }

    pub(crate) fn adjacent(&self, idx: usize) -> &BTreeSet<usize> {
        &self.incidence[idx]
    }
}

//! Undirected graph container with arena node handles.
//!
//! This module contains the core `Graph` container plus the helper algorithms re-exported as
//! `narwhal_graphlib::alg`.

use rustc_hash::FxBuildHasher;
use std::sync::OnceLock;

mod adj_cache;
pub mod alg;
mod entries;
mod handles;

use adj_cache::AdjCache;
use entries::{EdgeEntry, NodeEntry};

pub use handles::{EdgeKey, NodeId};

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

/// Undirected simple graph.
///
/// Node labels (`N`) and edge labels (`E`) are opaque to the container. Setting an edge that
/// already exists replaces its label; parallel edges are not representable.
#[derive(Debug, Clone)]
pub struct Graph<N, E> {
    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, NodeId>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    // Built on first neighbor query and dropped by every structural mutation. `OnceLock` keeps
    // the query APIs on `&self` while the graph stays `Sync`.
    adj_cache: OnceLock<AdjCache>,
}

impl<N, E> Default for Graph<N, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N, E> Graph<N, E> {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            adj_cache: OnceLock::new(),
        }
    }

    fn invalidate_adj(&mut self) {
        self.adj_cache = OnceLock::new();
    }

    fn adj(&self) -> &AdjCache {
        self.adj_cache
            .get_or_init(|| AdjCache::build(self.nodes.len(), &self.edges))
    }

    /// Inserts a node, or replaces the label of the node with the same id.
    pub fn add_node(&mut self, id: impl Into<String>, label: N) -> NodeId {
        let id = id.into();
        if let Some(&v) = self.node_index.get(&id) {
            self.nodes[v.index()].label = label;
            return v;
        }
        let v = NodeId::from_index(self.nodes.len());
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, v);
        self.invalidate_adj();
        v
    }

    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        self.add_node(id, label);
        self
    }

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    pub fn node_id(&self, id: &str) -> Option<NodeId> {
        self.node_index.get(id).copied()
    }

    pub fn contains(&self, v: NodeId) -> bool {
        v.index() < self.nodes.len()
    }

    /// Returns the string id the node was inserted with.
    pub fn node_name(&self, v: NodeId) -> &str {
        &self.nodes[v.index()].id
    }

    pub fn node(&self, v: NodeId) -> &N {
        &self.nodes[v.index()].label
    }

    pub fn node_mut(&mut self, v: NodeId) -> &mut N {
        &mut self.nodes[v.index()].label
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node handles in enumeration order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = NodeId> + DoubleEndedIterator + use<N, E> {
        (0..self.nodes.len()).map(NodeId::from_index)
    }

    pub fn first_node(&self) -> Option<NodeId> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeId::from_index(0))
        }
    }

    /// Successor of `v` in enumeration order.
    pub fn next_node(&self, v: NodeId) -> Option<NodeId> {
        debug_assert!(self.contains(v), "node handle {v} is foreign to this graph");
        let next = v.index() + 1;
        if next < self.nodes.len() {
            Some(NodeId::from_index(next))
        } else {
            None
        }
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl ExactSizeIterator<Item = EdgeKey> + '_ {
        self.edges.iter().map(|e| e.key)
    }

    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        for e in &self.edges {
            f(&e.key, &e.label);
        }
    }

    /// Inserts an edge between two existing nodes, or replaces its label.
    pub fn set_edge_between(&mut self, v: NodeId, w: NodeId, label: E) -> &mut Self {
        debug_assert!(self.contains(v), "node handle {v} is foreign to this graph");
        debug_assert!(self.contains(w), "node handle {w} is foreign to this graph");
        let key = EdgeKey::new(v, w);
        if let Some(&ix) = self.edge_index.get(&key) {
            self.edges[ix].label = label;
            return self;
        }
        self.edge_index.insert(key, self.edges.len());
        self.edges.push(EdgeEntry { key, label });
        self.invalidate_adj();
        self
    }

    pub fn has_edge(&self, v: NodeId, w: NodeId) -> bool {
        self.edge_index.contains_key(&EdgeKey::new(v, w))
    }

    pub fn edge(&self, v: NodeId, w: NodeId) -> Option<&E> {
        let ix = *self.edge_index.get(&EdgeKey::new(v, w))?;
        Some(&self.edges[ix].label)
    }

    pub fn edge_mut(&mut self, v: NodeId, w: NodeId) -> Option<&mut E> {
        let ix = *self.edge_index.get(&EdgeKey::new(v, w))?;
        Some(&mut self.edges[ix].label)
    }

    pub fn degree(&self, v: NodeId) -> usize {
        self.adj().edges(v.index()).len()
    }

    pub fn node_edges(&self, v: NodeId) -> Vec<EdgeKey> {
        self.adj()
            .edges(v.index())
            .iter()
            .map(|&ix| self.edges[ix].key)
            .collect()
    }

    /// Calls `f` for every neighbor of `v`, in edge insertion order.
    pub fn for_each_neighbor<F>(&self, v: NodeId, mut f: F)
    where
        F: FnMut(NodeId),
    {
        for &ix in self.adj().edges(v.index()) {
            f(self.edges[ix].key.other(v));
        }
    }

    pub fn neighbors(&self, v: NodeId) -> Vec<NodeId> {
        let mut out: Vec<NodeId> = Vec::new();
        self.for_each_neighbor(v, |w| out.push(w));
        out
    }
}

impl<N, E> Graph<N, E>
where
    N: Default,
{
    /// Returns the handle for `id`, inserting a node with a default label if needed.
    pub fn ensure_node(&mut self, id: impl Into<String>) -> NodeId {
        let id = id.into();
        match self.node_index.get(&id) {
            Some(&v) => v,
            None => self.add_node(id, N::default()),
        }
    }
}

impl<N, E> Graph<N, E>
where
    N: Default,
    E: Default,
{
    /// Connects the nodes named `v` and `w`, creating them on demand.
    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        let v = self.ensure_node(v);
        let w = self.ensure_node(w);
        self.set_edge_between(v, w, E::default())
    }

    pub fn set_path(&mut self, ids: &[&str]) -> &mut Self {
        for pair in ids.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }
}

//! Lazy iteration over unordered node pairs.
//!
//! [`NodePairs`] walks the pairs `(v1, v2)` with `v2` strictly after `v1` in the graph's node
//! enumeration order. A [`PairPredicate`] filters pairs and a [`PairProjection`] maps each
//! accepted pair to a value. Both are generic parameters, so the per-pair calls are statically
//! dispatched and the O(|V|^2) pair space is never materialized.
//!
//! The distance table consumed by [`VicinityPredicate`] comes from
//! [`get_pairwise_shortest_paths`].

use std::iter::FusedIterator;
use std::ops::Index;

use narwhal_graphlib::{Graph, NodeId, alg};

pub type NodePair = (NodeId, NodeId);

/// Shortest-path length stored for node pairs in different components.
///
/// Any finite threshold up to the node count rejects it.
pub const UNREACHABLE: f64 = f64::MAX;

/// All-pairs shortest-path lengths of a unit-weight graph.
///
/// The table is symmetric with a zero diagonal. Indices are [`NodeId`]s of the graph the table
/// was computed for; using it with any other graph is a contract violation that is only caught
/// by debug assertions and slice bounds checks.
#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrix {
    n: usize,
    data: Vec<f64>,
}

impl DistanceMatrix {
    pub fn node_count(&self) -> usize {
        self.n
    }

    pub fn get(&self, v1: NodeId, v2: NodeId) -> f64 {
        debug_assert!(v1.index() < self.n && v2.index() < self.n);
        self.data[v1.index() * self.n + v2.index()]
    }

    pub fn row(&self, v: NodeId) -> &[f64] {
        let start = v.index() * self.n;
        &self.data[start..start + self.n]
    }

    pub fn is_reachable(&self, v1: NodeId, v2: NodeId) -> bool {
        self.get(v1, v2) < UNREACHABLE
    }
}

impl Index<(NodeId, NodeId)> for DistanceMatrix {
    type Output = f64;

    fn index(&self, (v1, v2): (NodeId, NodeId)) -> &f64 {
        debug_assert!(v1.index() < self.n && v2.index() < self.n);
        &self.data[v1.index() * self.n + v2.index()]
    }
}

/// Computes all pairwise shortest paths, treating every edge as having unit length.
///
/// Runs one breadth-first search per node.
pub fn get_pairwise_shortest_paths<N, E>(graph: &Graph<N, E>) -> DistanceMatrix {
    let n = graph.node_count();
    let mut data: Vec<f64> = vec![UNREACHABLE; n * n];
    for source in graph.nodes() {
        let row = &mut data[source.index() * n..(source.index() + 1) * n];
        for (cell, hops) in row.iter_mut().zip(alg::bfs_hops(graph, source)) {
            if let Some(h) = hops {
                *cell = h as f64;
            }
        }
    }
    DistanceMatrix { n, data }
}

pub trait PairPredicate {
    fn accept(&self, v1: NodeId, v2: NodeId) -> bool;
}

impl<F> PairPredicate for F
where
    F: Fn(NodeId, NodeId) -> bool,
{
    fn accept(&self, v1: NodeId, v2: NodeId) -> bool {
        self(v1, v2)
    }
}

pub trait PairProjection {
    type Output;

    fn project(&self, v1: NodeId, v2: NodeId) -> Self::Output;
}

impl<F, T> PairProjection for F
where
    F: Fn(NodeId, NodeId) -> T,
{
    type Output = T;

    fn project(&self, v1: NodeId, v2: NodeId) -> T {
        self(v1, v2)
    }
}

/// Accepts every pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tautology;

impl PairPredicate for Tautology {
    fn accept(&self, _v1: NodeId, _v2: NodeId) -> bool {
        true
    }
}

/// Projects a pair onto itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPair;

impl PairProjection for IdentityPair {
    type Output = NodePair;

    fn project(&self, v1: NodeId, v2: NodeId) -> NodePair {
        (v1, v2)
    }
}

/// Accepts pairs whose shortest-path distance is at most `threshold`.
#[derive(Debug, Clone, Copy)]
pub struct VicinityPredicate<'m> {
    matrix: &'m DistanceMatrix,
    threshold: f64,
}

impl<'m> VicinityPredicate<'m> {
    pub fn new(matrix: &'m DistanceMatrix, threshold: f64) -> Self {
        Self { matrix, threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl PairPredicate for VicinityPredicate<'_> {
    fn accept(&self, v1: NodeId, v2: NodeId) -> bool {
        self.matrix.get(v1, v2) <= self.threshold
    }
}

/// Position of a [`NodePairs`] iterator.
///
/// The default value is the past-the-end position. Two past-the-end positions are equal no
/// matter which graph they came from; other positions are equal iff they denote the same pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PairCursor {
    pair: Option<NodePair>,
}

impl PairCursor {
    pub const END: PairCursor = PairCursor { pair: None };

    fn first<N, E>(graph: &Graph<N, E>) -> Self {
        let pair = graph
            .first_node()
            .and_then(|v1| graph.next_node(v1).map(|v2| (v1, v2)));
        Self { pair }
    }

    pub fn pair(&self) -> Option<NodePair> {
        self.pair
    }

    pub fn is_end(&self) -> bool {
        self.pair.is_none()
    }

    // Moves to the next pair regardless of any predicate. Returns false once past the end.
    fn step<N, E>(&mut self, graph: &Graph<N, E>) -> bool {
        let Some((v1, v2)) = self.pair else {
            return false;
        };
        self.pair = match graph.next_node(v2) {
            Some(w) => Some((v1, w)),
            None => graph
                .next_node(v1)
                .and_then(|u| graph.next_node(u).map(|w| (u, w))),
        };
        self.pair.is_some()
    }

    // Pairs not yet visited, counting the current one.
    fn remaining(&self, n: usize) -> usize {
        match self.pair {
            None => 0,
            Some((v1, v2)) => {
                let tail = n - v1.index() - 1;
                (n - v2.index()) + tail * tail.saturating_sub(1) / 2
            }
        }
    }
}

/// Forward iterator over the accepted node pairs of a graph, yielding projected values.
///
/// The projection of the current pair is computed when the iterator is positioned and cached, so
/// [`NodePairs::get`] is O(1) and idempotent. Constructing a fresh iterator over the same graph
/// and policies reproduces the exact same sequence.
pub struct NodePairs<'g, N, E, P, F>
where
    F: PairProjection,
{
    graph: &'g Graph<N, E>,
    pred: P,
    proj: F,
    cursor: PairCursor,
    value: Option<F::Output>,
}

impl<'g, N, E> NodePairs<'g, N, E, Tautology, IdentityPair> {
    /// Every unordered pair of distinct nodes.
    pub fn all(graph: &'g Graph<N, E>) -> Self {
        Self::new(graph, Tautology, IdentityPair)
    }
}

impl<'g, N, E, P, F> NodePairs<'g, N, E, P, F>
where
    P: PairPredicate,
    F: PairProjection,
{
    /// Positions the iterator at the first accepted pair, or past the end if there is none.
    pub fn new(graph: &'g Graph<N, E>, pred: P, proj: F) -> Self {
        let mut cursor = PairCursor::first(graph);
        while let Some((v1, v2)) = cursor.pair {
            if pred.accept(v1, v2) {
                break;
            }
            cursor.step(graph);
        }
        let value = cursor.pair.map(|(v1, v2)| proj.project(v1, v2));
        Self {
            graph,
            pred,
            proj,
            cursor,
            value,
        }
    }

    pub fn graph(&self) -> &'g Graph<N, E> {
        self.graph
    }

    pub fn cursor(&self) -> PairCursor {
        self.cursor
    }

    pub fn pair(&self) -> Option<NodePair> {
        self.cursor.pair
    }

    pub fn is_valid(&self) -> bool {
        !self.cursor.is_end()
    }

    /// The cached projection of the current pair; `None` past the end.
    pub fn get(&self) -> Option<&F::Output> {
        self.value.as_ref()
    }

    /// Moves to the next accepted pair and recomputes the cached value.
    ///
    /// Advancing a past-the-end iterator is a contract violation; it is a no-op in release
    /// builds.
    pub fn advance(&mut self) -> &mut Self {
        debug_assert!(self.is_valid(), "advanced a past-the-end node pair iterator");
        while self.cursor.step(self.graph) {
            let Some((v1, v2)) = self.cursor.pair else {
                break;
            };
            if self.pred.accept(v1, v2) {
                break;
            }
        }
        self.value = self.cursor.pair.map(|(v1, v2)| self.proj.project(v1, v2));
        self
    }
}

impl<N, E, P, F> Iterator for NodePairs<'_, N, E, P, F>
where
    P: PairPredicate,
    F: PairProjection,
{
    type Item = F::Output;

    fn next(&mut self) -> Option<F::Output> {
        let value = self.value.take()?;
        self.advance();
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let upper = self.cursor.remaining(self.graph.node_count());
        (usize::from(self.is_valid()), Some(upper))
    }
}

impl<N, E, P, F> FusedIterator for NodePairs<'_, N, E, P, F>
where
    P: PairPredicate,
    F: PairProjection,
{
}

impl<N, E, P, F> Clone for NodePairs<'_, N, E, P, F>
where
    P: Clone,
    F: PairProjection + Clone,
    F::Output: Clone,
{
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            pred: self.pred.clone(),
            proj: self.proj.clone(),
            cursor: self.cursor,
            value: self.value.clone(),
        }
    }
}

impl<N, E, P, F, P2, F2> PartialEq<NodePairs<'_, N, E, P2, F2>> for NodePairs<'_, N, E, P, F>
where
    F: PairProjection,
    F2: PairProjection,
{
    fn eq(&self, other: &NodePairs<'_, N, E, P2, F2>) -> bool {
        debug_assert!(
            self.cursor.is_end()
                || other.cursor.is_end()
                || std::ptr::eq(self.graph, other.graph),
            "compared node pair iterators over different graphs"
        );
        self.cursor == other.cursor
    }
}

impl<N, E, P, F> PartialEq<PairCursor> for NodePairs<'_, N, E, P, F>
where
    F: PairProjection,
{
    fn eq(&self, other: &PairCursor) -> bool {
        self.cursor == *other
    }
}

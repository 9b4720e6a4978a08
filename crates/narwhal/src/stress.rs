//! Stress of a layout against graph-theoretic distances.
//!
//! For a pair with shortest-path distance `d`, Euclidean distance `e` and node separation `s`,
//! the stress term is `((e - s*d) / (s*d))^2`, the squared relative error of the realized
//! distance. Pairs in different components are skipped. The total stress is the sum of all
//! terms.

use narwhal_graphlib::{Graph, NodeId};

use crate::model::Layout;
use crate::pairwise::{
    DistanceMatrix, NodePairs, PairProjection, VicinityPredicate, get_pairwise_shortest_paths,
};

pub fn stress_term(euclidean: f64, graph_distance: f64, nodesep: f64) -> f64 {
    let target = nodesep * graph_distance;
    let relative = (euclidean - target) / target;
    relative * relative
}

/// Distance threshold that separates connected pairs from [`UNREACHABLE`] ones.
///
/// No shortest path in a graph with `n` nodes is longer than `n - 1`.
///
/// [`UNREACHABLE`]: crate::pairwise::UNREACHABLE
pub fn connectivity_threshold<N, E>(graph: &Graph<N, E>) -> f64 {
    graph.node_count() as f64 + 1.0
}

/// Projects a node pair onto its stress term.
pub struct NodeStress<'a, 'g, N, E> {
    layout: &'a Layout<'g, N, E>,
    matrix: &'a DistanceMatrix,
    nodesep: f64,
}

impl<'a, 'g, N, E> NodeStress<'a, 'g, N, E> {
    pub fn new(layout: &'a Layout<'g, N, E>, matrix: &'a DistanceMatrix, nodesep: f64) -> Self {
        Self {
            layout,
            matrix,
            nodesep,
        }
    }
}

impl<N, E> Clone for NodeStress<'_, '_, N, E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<N, E> Copy for NodeStress<'_, '_, N, E> {}

impl<N, E> PairProjection for NodeStress<'_, '_, N, E> {
    type Output = f64;

    fn project(&self, v1: NodeId, v2: NodeId) -> f64 {
        debug_assert_ne!(v1, v2);
        stress_term(
            self.layout.distance(v1, v2),
            self.matrix.get(v1, v2),
            self.nodesep,
        )
    }
}

/// The stress terms of every connected node pair of a layout, as a re-iterable range.
pub struct PairwiseStress<'a, 'g, N, E> {
    layout: &'a Layout<'g, N, E>,
    matrix: &'a DistanceMatrix,
    nodesep: f64,
    infinity: f64,
}

pub type StressTerms<'a, 'g, N, E> =
    NodePairs<'g, N, E, VicinityPredicate<'a>, NodeStress<'a, 'g, N, E>>;

impl<'a, 'g, N, E> PairwiseStress<'a, 'g, N, E> {
    pub fn new(
        layout: &'a Layout<'g, N, E>,
        matrix: &'a DistanceMatrix,
        nodesep: f64,
        infinity: f64,
    ) -> Self {
        debug_assert_eq!(matrix.node_count(), layout.node_count());
        Self {
            layout,
            matrix,
            nodesep,
            infinity,
        }
    }

    pub fn iter(&self) -> StressTerms<'a, 'g, N, E> {
        let pred = VicinityPredicate::new(self.matrix, self.infinity);
        let proj = NodeStress::new(self.layout, self.matrix, self.nodesep);
        NodePairs::new(self.layout.graph(), pred, proj)
    }

    pub fn total(&self) -> f64 {
        self.iter().fold(0.0, |acc, term| acc + term)
    }
}

impl<'a, 'g, N, E> IntoIterator for &PairwiseStress<'a, 'g, N, E> {
    type Item = f64;
    type IntoIter = StressTerms<'a, 'g, N, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Total stress of `layout` for the node separation `nodesep`.
///
/// Computes the shortest-path table on every call; see [`compute_stress_with_matrix`] to reuse
/// one.
pub fn compute_stress<N, E>(layout: &Layout<'_, N, E>, nodesep: f64) -> f64 {
    let graph = layout.graph();
    if graph.edge_count() == 0 {
        return 0.0;
    }
    let matrix = get_pairwise_shortest_paths(graph);
    compute_stress_with_matrix(layout, &matrix, nodesep)
}

/// Total stress using a precomputed table for `layout`'s graph.
pub fn compute_stress_with_matrix<N, E>(
    layout: &Layout<'_, N, E>,
    matrix: &DistanceMatrix,
    nodesep: f64,
) -> f64 {
    let graph = layout.graph();
    if graph.edge_count() == 0 {
        return 0.0;
    }
    PairwiseStress::new(layout, matrix, nodesep, connectivity_threshold(graph)).total()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn term_vanishes_at_the_target_distance() {
        assert_eq!(stress_term(200.0, 2.0, 100.0), 0.0);
    }

    #[test]
    fn term_is_the_squared_relative_error() {
        assert_eq!(stress_term(150.0, 1.0, 100.0), 0.25);
        assert_eq!(stress_term(50.0, 1.0, 100.0), 0.25);
        assert_eq!(stress_term(0.0, 3.0, 10.0), 1.0);
    }
}

//! Helper algorithms over unit-weight undirected graphs.

use super::{Graph, NodeId};
use std::collections::VecDeque;

/// Single-source shortest path lengths (in hops) from `source`.
///
/// The result is indexed by [`NodeId::index`]; unreachable nodes are `None`.
pub fn bfs_hops<N, E>(g: &Graph<N, E>, source: NodeId) -> Vec<Option<usize>> {
    let mut hops: Vec<Option<usize>> = vec![None; g.node_count()];
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    hops[source.index()] = Some(0);
    queue.push_back(source);
    while let Some(v) = queue.pop_front() {
        let Some(d) = hops[v.index()] else {
            debug_assert!(false, "queued node without a distance");
            continue;
        };
        g.for_each_neighbor(v, |w| {
            if hops[w.index()].is_none() {
                hops[w.index()] = Some(d + 1);
                queue.push_back(w);
            }
        });
    }
    hops
}

/// Connected components, each listed in discovery order. Components are ordered by their
/// first node in enumeration order.
pub fn components<N, E>(g: &Graph<N, E>) -> Vec<Vec<NodeId>> {
    let mut seen: Vec<bool> = vec![false; g.node_count()];
    let mut out: Vec<Vec<NodeId>> = Vec::new();

    for start in g.nodes() {
        if seen[start.index()] {
            continue;
        }
        seen[start.index()] = true;
        let mut comp: Vec<NodeId> = Vec::new();
        let mut q: VecDeque<NodeId> = VecDeque::new();
        q.push_back(start);
        while let Some(v) = q.pop_front() {
            comp.push(v);
            g.for_each_neighbor(v, |w| {
                if !seen[w.index()] {
                    seen[w.index()] = true;
                    q.push_back(w);
                }
            });
        }
        out.push(comp);
    }

    out
}

pub fn is_connected<N, E>(g: &Graph<N, E>) -> bool {
    match g.first_node() {
        None => true,
        Some(v) => bfs_hops(g, v).iter().all(Option::is_some),
    }
}

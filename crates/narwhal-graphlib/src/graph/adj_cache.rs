//! Adjacency cache used by [`Graph`](super::Graph).
//!
//! Neighbor queries are issued once per node by the shortest-path sweep. Scanning every edge for
//! each query would make the sweep O(V * E) before any traversal work, so incident edges are kept
//! in a compressed (offsets + flat list) layout built on first use.

use super::entries::EdgeEntry;

#[derive(Debug, Clone)]
pub(in crate::graph) struct AdjCache {
    offsets: Vec<usize>,
    edges: Vec<usize>,
}

impl AdjCache {
    pub(in crate::graph) fn build<E>(node_count: usize, entries: &[EdgeEntry<E>]) -> Self {
        let mut degree: Vec<usize> = vec![0; node_count];
        for e in entries {
            degree[e.key.v.index()] += 1;
            if !e.key.is_loop() {
                degree[e.key.w.index()] += 1;
            }
        }

        let mut offsets: Vec<usize> = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        for d in &degree {
            let last = offsets[offsets.len() - 1];
            offsets.push(last + d);
        }

        let mut fill: Vec<usize> = offsets[..node_count].to_vec();
        let mut edges: Vec<usize> = vec![0; offsets[node_count]];
        for (edge_ix, e) in entries.iter().enumerate() {
            let v_ix = e.key.v.index();
            edges[fill[v_ix]] = edge_ix;
            fill[v_ix] += 1;
            if !e.key.is_loop() {
                let w_ix = e.key.w.index();
                edges[fill[w_ix]] = edge_ix;
                fill[w_ix] += 1;
            }
        }

        Self { offsets, edges }
    }

    pub(in crate::graph) fn edges(&self, v_ix: usize) -> &[usize] {
        let start = self.offsets[v_ix];
        let end = self.offsets[v_ix + 1];
        &self.edges[start..end]
    }
}

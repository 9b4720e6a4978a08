//! Layout normalization.
//!
//! A normalized layout has its centroid at the origin and a mean edge length of
//! [`DEFAULT_NODE_DISTANCE`]. Graphs without edges use the mean distance over all node pairs
//! instead. Every node gets the size [`DEFAULT_NODE_SIZE`].

use crate::config::{DEFAULT_NODE_DISTANCE, DEFAULT_NODE_SIZE};
use crate::error::Result;
use crate::model::Layout;
use crate::pairwise::NodePairs;

/// Centers and rescales `layout` in place.
///
/// Fails without touching the layout if any coordinate is non-finite.
pub fn normalize_layout<N, E>(layout: &mut Layout<'_, N, E>) -> Result<()> {
    layout.check_finite()?;
    let graph = layout.graph();
    if graph.node_count() > 0 {
        translate_to_centroid(layout);
        if graph.edge_count() > 0 {
            scale_by_edges(layout);
        } else if graph.node_count() > 1 {
            scale_by_pairs(layout);
        }
    }
    reset_node_sizes(layout);
    Ok(())
}

fn translate_to_centroid<N, E>(layout: &mut Layout<'_, N, E>) {
    debug_assert!(layout.node_count() > 0);
    let (xsum, ysum) = layout
        .geometries()
        .fold((0.0, 0.0), |(xs, ys), (_, g)| (xs + g.x, ys + g.y));
    let n = layout.node_count() as f64;
    layout.translate(-xsum / n, -ysum / n);
}

fn scale_by_edges<N, E>(layout: &mut Layout<'_, N, E>) {
    let graph = layout.graph();
    debug_assert!(graph.edge_count() > 0);
    let dsum: f64 = graph.edges().map(|e| layout.distance(e.v, e.w)).sum();
    let dmean = dsum / graph.edge_count() as f64;
    rescale(layout, dmean);
}

fn scale_by_pairs<N, E>(layout: &mut Layout<'_, N, E>) {
    debug_assert!(layout.node_count() > 1);
    let (dsum, tally) = NodePairs::all(layout.graph())
        .fold((0.0, 0usize), |(sum, tally), (v1, v2)| {
            (sum + layout.distance(v1, v2), tally + 1)
        });
    rescale(layout, dsum / tally as f64);
}

fn rescale<N, E>(layout: &mut Layout<'_, N, E>, mean: f64) {
    // All nodes coincide; there is no scale to normalize.
    if !(mean > 0.0 && mean.is_finite()) {
        tracing::warn!(mean, "cannot rescale a layout with degenerate distances");
        return;
    }
    let factor = DEFAULT_NODE_DISTANCE / mean;
    tracing::trace!(mean, factor, "rescaling layout");
    layout.scale(factor);
}

fn reset_node_sizes<N, E>(layout: &mut Layout<'_, N, E>) {
    let graph = layout.graph();
    for v in graph.nodes() {
        let g = layout.geometry_mut(v);
        g.width = DEFAULT_NODE_SIZE;
        g.height = DEFAULT_NODE_SIZE;
    }
}

//! Layout geometry.
//!
//! A [`Layout`] borrows its graph and owns one [`NodeGeometry`] per node, indexed by
//! [`NodeId`]. Cloning a layout copies the geometry only.

use std::fmt;

use narwhal_graphlib::{Graph, NodeId};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Center position and visual size of a node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NodeGeometry {
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

pub struct Layout<'g, N, E> {
    graph: &'g Graph<N, E>,
    nodes: Vec<NodeGeometry>,
}

impl<N, E> Clone for Layout<'_, N, E> {
    fn clone(&self) -> Self {
        Self {
            graph: self.graph,
            nodes: self.nodes.clone(),
        }
    }
}

impl<N, E> fmt::Debug for Layout<'_, N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.graph
                    .nodes()
                    .map(|v| (self.graph.node_name(v), &self.nodes[v.index()])),
            )
            .finish()
    }
}

impl<'g, N, E> Layout<'g, N, E> {
    /// Places every node at the origin with zero size.
    pub fn new(graph: &'g Graph<N, E>) -> Self {
        Self {
            graph,
            nodes: vec![NodeGeometry::default(); graph.node_count()],
        }
    }

    pub fn from_fn<F>(graph: &'g Graph<N, E>, mut position: F) -> Self
    where
        F: FnMut(NodeId) -> Point,
    {
        let nodes = graph
            .nodes()
            .map(|v| {
                let p = position(v);
                NodeGeometry {
                    x: p.x,
                    y: p.y,
                    ..Default::default()
                }
            })
            .collect();
        Self { graph, nodes }
    }

    pub fn graph(&self) -> &'g Graph<N, E> {
        self.graph
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn geometry(&self, v: NodeId) -> &NodeGeometry {
        &self.nodes[v.index()]
    }

    pub fn geometry_mut(&mut self, v: NodeId) -> &mut NodeGeometry {
        &mut self.nodes[v.index()]
    }

    pub fn geometries(&self) -> impl ExactSizeIterator<Item = (NodeId, &NodeGeometry)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(ix, g)| (NodeId::from_index(ix), g))
    }

    pub fn position(&self, v: NodeId) -> Point {
        self.nodes[v.index()].position()
    }

    pub fn set_position(&mut self, v: NodeId, p: Point) -> &mut Self {
        let g = &mut self.nodes[v.index()];
        g.x = p.x;
        g.y = p.y;
        self
    }

    pub fn x(&self, v: NodeId) -> f64 {
        self.nodes[v.index()].x
    }

    pub fn y(&self, v: NodeId) -> f64 {
        self.nodes[v.index()].y
    }

    /// Euclidean distance between the centers of two nodes.
    pub fn distance(&self, v1: NodeId, v2: NodeId) -> f64 {
        self.position(v1).distance(self.position(v2))
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for g in &mut self.nodes {
            g.x += dx;
            g.y += dy;
        }
    }

    /// Multiplies all node positions by `factor`. Node sizes are left alone.
    pub fn scale(&mut self, factor: f64) {
        for g in &mut self.nodes {
            g.x *= factor;
            g.y *= factor;
        }
    }

    pub fn scaled(&self, factor: f64) -> Self {
        let mut copy = self.clone();
        copy.scale(factor);
        copy
    }

    pub fn find_non_finite(&self) -> Option<NodeId> {
        self.geometries()
            .find(|(_, g)| !g.position().is_finite())
            .map(|(v, _)| v)
    }

    pub fn check_finite(&self) -> Result<()> {
        match self.find_non_finite() {
            None => Ok(()),
            Some(v) => Err(Error::NonFiniteCoordinates {
                node: self.graph.node_name(v).to_string(),
            }),
        }
    }
}

//! Node handles and undirected edge keys.

use std::fmt;

/// Arena handle of a node.
///
/// Handles are dense indices in insertion order, so they double as matrix indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Key of an undirected edge. The endpoints are stored in ascending handle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EdgeKey {
    pub v: NodeId,
    pub w: NodeId,
}

impl EdgeKey {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { v: a, w: b }
        } else {
            Self { v: b, w: a }
        }
    }

    /// Returns the endpoint opposite to `x`.
    pub fn other(&self, x: NodeId) -> NodeId {
        debug_assert!(x == self.v || x == self.w, "node is not an endpoint of this edge");
        if x == self.v { self.w } else { self.v }
    }

    pub fn is_loop(&self) -> bool {
        self.v == self.w
    }
}

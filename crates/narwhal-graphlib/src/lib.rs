#![forbid(unsafe_code)]

//! Graph container APIs used by `narwhal`.
//!
//! Nodes live in an arena and are addressed by dense [`NodeId`] handles. Node enumeration order
//! is insertion order and never changes, which is what the pairwise iteration in `narwhal`
//! relies on. Edges are undirected and carry unit weight for the purpose of the helper
//! algorithms in [`alg`].

pub mod graph;

pub use graph::{EdgeKey, Graph, NodeId, alg};

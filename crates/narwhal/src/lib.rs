#![forbid(unsafe_code)]

//! Stress metric and stress calibration for 2D graph layouts.
//!
//! The stress of a layout compares the Euclidean distance of every connected node pair against
//! its shortest-path distance scaled by a node separation. `narwhal` evaluates that sum lazily
//! over node pairs and calibrates the separation (or a whole-layout scale) by fitting a parabola
//! through three probe evaluations.
//!
//! Graphs come from [`narwhal_graphlib`]; layouts borrow a graph and own per-node geometry.

pub mod calibrate;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pairwise;
pub mod parabola;
pub mod report;
pub mod stress;

pub use narwhal_graphlib as graphlib;

pub use calibrate::{
    compute_stress_fit_nodesep, compute_stress_fit_scale, fit_nodesep_with, fit_scale_with,
};
pub use config::{CalibrationOptions, DEFAULT_NODE_DISTANCE, DEFAULT_NODE_SIZE};
pub use error::{Error, Result};
pub use model::{Layout, NodeGeometry, Point};
pub use normalize::normalize_layout;
pub use pairwise::{
    DistanceMatrix, IdentityPair, NodePair, NodePairs, PairCursor, PairPredicate, PairProjection,
    Tautology, VicinityPredicate, get_pairwise_shortest_paths,
};
pub use parabola::{FitAssessment, FitIssue, ParabolaResult, fit_parabola};
pub use report::{StressMode, StressReport, evaluate};
pub use stress::{NodeStress, PairwiseStress, compute_stress, compute_stress_with_matrix};

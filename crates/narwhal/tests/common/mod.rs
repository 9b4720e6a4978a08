#![allow(dead_code)]

use narwhal::graphlib::Graph;
use narwhal::{Layout, Point};

pub type G = Graph<(), ()>;

/// The cube graph. Node `i` has the bit pattern of `i` as its name, and nodes are adjacent iff
/// their patterns differ in exactly one bit.
pub fn cube_graph() -> G {
    let mut g: G = Graph::new();
    let ids: Vec<_> = (0..8u32).map(|i| g.add_node(format!("{i:03b}"), ())).collect();
    for i in 0..8usize {
        for bit in [1usize, 2, 4] {
            let j = i ^ bit;
            if i < j {
                g.set_edge_between(ids[i], ids[j], ());
            }
        }
    }
    g
}

/// Oblique projection of the unit cube: the back face is shifted by half a unit diagonally.
pub fn cube_layout(g: &G) -> Layout<'_, (), ()> {
    Layout::from_fn(g, |v| {
        let i = v.index();
        let depth = ((i >> 2) & 1) as f64;
        Point::new((i & 1) as f64 + 0.5 * depth, ((i >> 1) & 1) as f64 + 0.5 * depth)
    })
}

pub fn path_graph(n: usize) -> G {
    let mut g: G = Graph::new();
    let ids: Vec<_> = (0..n).map(|i| g.add_node(format!("p{i}"), ())).collect();
    for w in ids.windows(2) {
        g.set_edge_between(w[0], w[1], ());
    }
    g
}

/// A path drawn on a straight line with unit spacing, i.e. a distance-preserving embedding.
pub fn straight_path(g: &G) -> Layout<'_, (), ()> {
    Layout::from_fn(g, |v| Point::new(1.0 + v.index() as f64, 0.0))
}

pub fn isolated_nodes(n: usize) -> G {
    let mut g: G = Graph::new();
    for i in 0..n {
        g.set_node(format!("i{i}"), ());
    }
    g
}

/// Deterministic pseudo-random numbers for fixtures.
pub struct XorShift64Star {
    state: u64,
}

impl XorShift64Star {
    pub fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    pub fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D_u64)
    }

    /// Uniform in `[lo, hi)`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let u = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * u
    }
}

/// A connected random graph (a random spanning tree plus extra edges) with random coordinates.
pub fn random_graph(seed: u64, n: usize, extra_edges: usize) -> G {
    let mut rng = XorShift64Star::new(seed);
    let mut g: G = Graph::new();
    let ids: Vec<_> = (0..n).map(|i| g.add_node(format!("r{i}"), ())).collect();
    for i in 1..n {
        let parent = (rng.next_u64() % i as u64) as usize;
        g.set_edge_between(ids[parent], ids[i], ());
    }
    for _ in 0..extra_edges {
        let a = (rng.next_u64() % n as u64) as usize;
        let b = (rng.next_u64() % n as u64) as usize;
        if a != b {
            g.set_edge_between(ids[a], ids[b], ());
        }
    }
    g
}

pub fn random_layout(g: &G, seed: u64) -> Layout<'_, (), ()> {
    let mut rng = XorShift64Star::new(seed);
    Layout::from_fn(g, |_| Point::new(rng.uniform(-500.0, 500.0), rng.uniform(-500.0, 500.0)))
}

pub fn assert_close(tol: f64, expected: f64, actual: f64) {
    let scale = expected.abs().max(actual.abs()).max(1.0);
    assert!(
        (expected - actual).abs() <= tol * scale,
        "expected {expected}, got {actual} (tolerance {tol})"
    );
}

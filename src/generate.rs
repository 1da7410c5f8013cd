//! Synthetic graphs with known triangle counts
//!
//! Used by tests, benchmarks and `tricount bench --generate`. A generator
//! spec is `kind:arg[:arg]`, e.g. `complete:50`, `cycle:1000`,
//! `friendship:20`, `strip:500`, `gnp:10000:0.001:42`.

use crate::error::{TriResult, TriangleError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tricount_algorithms::{CsrGraph, VertexId};

/// A named synthetic graph family
#[derive(Debug, Clone, PartialEq)]
pub enum GraphSpec {
    /// `K_n`: C(n, 3) triangles
    Complete(usize),
    /// `C_n`: one triangle when n == 3, none otherwise
    Cycle(usize),
    /// `k` triangles sharing one hub vertex
    Friendship(usize),
    /// Path of `n` vertices with every `(i, i + 2)` chord: n - 2 triangles
    TriangleStrip(usize),
    /// Erdős–Rényi G(n, p), seeded
    ErdosRenyi { n: usize, p: f64, seed: u64 },
}

impl GraphSpec {
    /// Known triangle count, where the family has one
    pub fn expected_triangles(&self) -> Option<u64> {
        match *self {
            GraphSpec::Complete(n) => {
                let n = n as u64;
                Some(if n < 3 { 0 } else { n * (n - 1) * (n - 2) / 6 })
            }
            GraphSpec::Cycle(n) => Some(u64::from(n == 3)),
            GraphSpec::Friendship(k) => Some(k as u64),
            GraphSpec::TriangleStrip(n) => Some(n.saturating_sub(2) as u64),
            GraphSpec::ErdosRenyi { .. } => None,
        }
    }

    pub fn build(&self) -> TriResult<CsrGraph> {
        match *self {
            GraphSpec::Complete(n) => complete(n),
            GraphSpec::Cycle(n) => cycle(n),
            GraphSpec::Friendship(k) => friendship(k),
            GraphSpec::TriangleStrip(n) => triangle_strip(n),
            GraphSpec::ErdosRenyi { n, p, seed } => erdos_renyi(n, p, seed),
        }
    }
}

impl std::str::FromStr for GraphSpec {
    type Err = TriangleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || TriangleError::GeneratorSpec(s.to_string());
        let parts: Vec<&str> = s.split(':').collect();
        let size = |i: usize| -> TriResult<usize> {
            parts.get(i).and_then(|t| t.parse().ok()).ok_or_else(bad)
        };

        match parts[0] {
            "complete" if parts.len() == 2 => Ok(GraphSpec::Complete(size(1)?)),
            "cycle" if parts.len() == 2 => Ok(GraphSpec::Cycle(size(1)?)),
            "friendship" if parts.len() == 2 => Ok(GraphSpec::Friendship(size(1)?)),
            "strip" if parts.len() == 2 => Ok(GraphSpec::TriangleStrip(size(1)?)),
            "gnp" if parts.len() == 3 || parts.len() == 4 => {
                let p: f64 = parts[2].parse().map_err(|_| bad())?;
                if !(0.0..=1.0).contains(&p) {
                    return Err(bad());
                }
                let seed = match parts.get(3) {
                    Some(t) => t.parse().map_err(|_| bad())?,
                    None => 0,
                };
                Ok(GraphSpec::ErdosRenyi { n: size(1)?, p, seed })
            }
            _ => Err(bad()),
        }
    }
}

pub fn complete(n: usize) -> TriResult<CsrGraph> {
    let edges: Vec<(VertexId, VertexId)> = (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).collect();
    Ok(CsrGraph::from_edges(n, &edges)?)
}

pub fn cycle(n: usize) -> TriResult<CsrGraph> {
    let edges: Vec<_> = if n < 3 {
        (1..n).map(|i| (i - 1, i)).collect()
    } else {
        (0..n).map(|i| (i, (i + 1) % n)).collect()
    };
    Ok(CsrGraph::from_edges(n, &edges)?)
}

/// Windmill graph: vertex 0 joined to `k` disjoint edges.
pub fn friendship(k: usize) -> TriResult<CsrGraph> {
    let mut edges = Vec::with_capacity(3 * k);
    for t in 0..k {
        let (a, b) = (2 * t + 1, 2 * t + 2);
        edges.extend([(0, a), (0, b), (a, b)]);
    }
    Ok(CsrGraph::from_edges(2 * k + 1, &edges)?)
}

/// A long path of triangles.
pub fn triangle_strip(n: usize) -> TriResult<CsrGraph> {
    let mut edges = Vec::with_capacity(2 * n);
    for i in 0..n {
        if i + 1 < n {
            edges.push((i, i + 1));
        }
        if i + 2 < n {
            edges.push((i, i + 2));
        }
    }
    Ok(CsrGraph::from_edges(n, &edges)?)
}

/// G(n, p) by geometric skipping over the `v < w` pairs, O(n + m) expected.
pub fn erdos_renyi(n: usize, p: f64, seed: u64) -> TriResult<CsrGraph> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::new();
    if p >= 1.0 {
        return complete(n);
    }
    if p > 0.0 {
        let log_q = (1.0 - p).ln();
        // Row w, column v < w, walked in row-major order
        let (mut w, mut v) = (1usize, 0usize);
        loop {
            let r: f64 = rng.gen();
            let skip = ((1.0 - r).ln() / log_q).floor() as usize;
            v = v.saturating_add(skip);
            while w < n && v >= w {
                v -= w;
                w += 1;
            }
            if w >= n {
                break;
            }
            edges.push((v, w));
            v += 1;
        }
    }
    Ok(CsrGraph::from_edges(n, &edges)?)
}

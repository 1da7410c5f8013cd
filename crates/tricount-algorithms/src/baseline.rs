//! Baseline triangle counters
//!
//! Straightforward formulations kept as reference points and cross-checks.
//! Each documents its correction factor:
//!
//! - `brute_force`: every `i < j < k`, no divisor.
//! - `wedge`: every wedge `a < b` centred on `i < a`, no divisor.
//! - `edge_iterator`: every edge `v < w`, `|N(v) ∩ N(w)|`, each triangle seen
//!   once per edge so the sum is divided by 3.
//! - `davis`: masked product `sum((A * A) .* A)`, each triangle seen six
//!   times (three vertices, two directions), divided by 6.
//! - `low`: each triangle `x < i < y` found once, at its middle vertex.

use crate::common::{AlgoResult, CsrGraph};
use crate::intersect::{merge_count, Intersect, MarkerSet};
use tracing::warn;

/// Above this many vertices the cubic scan is flagged in the log.
const BRUTE_FORCE_WARN_VERTICES: usize = 2_000;

/// Tests every vertex triple. O(n^3 log d); use only as an oracle.
pub fn brute_force(graph: &CsrGraph) -> u64 {
    let n = graph.num_vertices();
    if n > BRUTE_FORCE_WARN_VERTICES {
        warn!(n, "brute force triangle count on a large graph");
    }
    let mut count = 0u64;
    for i in 0..n {
        for j in (i + 1)..n {
            if !graph.has_edge(i, j) {
                continue;
            }
            for k in (j + 1)..n {
                if graph.has_edge(j, k) && graph.has_edge(k, i) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Closes every oriented wedge `(a, i, b)` with `i < a < b`.
pub fn wedge(graph: &CsrGraph) -> u64 {
    let mut count = 0u64;
    for i in 0..graph.num_vertices() {
        let row = graph.neighbors(i);
        let upper = &row[row.partition_point(|&x| x <= i)..];
        for (p, &a) in upper.iter().enumerate() {
            for &b in &upper[p + 1..] {
                if graph.has_edge(a, b) {
                    count += 1;
                }
            }
        }
    }
    count
}

/// Direction-oriented edge iterator with a pluggable intersection.
pub fn edge_iterator<I: Intersect>(graph: &CsrGraph, intersect: &mut I) -> u64 {
    let mut count = 0u64;
    for v in 0..graph.num_vertices() {
        for &w in graph.neighbors(v) {
            if v < w {
                count += intersect.count(graph.neighbors(v), graph.neighbors(w));
            }
        }
    }
    count / 3
}

/// Davis, "Graph algorithms via SuiteSparse:GraphBLAS: triangle counting and
/// K-truss", HPEC 2018.
pub fn davis(graph: &CsrGraph) -> AlgoResult<u64> {
    let mut marks = MarkerSet::new(graph.num_vertices())?;
    let mut count = 0u64;
    for j in 0..graph.num_vertices() {
        let row = graph.neighbors(j);
        marks.mark_all(row);
        for &k in row {
            count += graph.neighbors(k).iter().filter(|&&x| marks.is_marked(x)).count() as u64;
        }
        marks.clear();
    }
    Ok(count / 6)
}

/// Wolf, Deveci, Berry, Hammond and Rajamanickam, "Fast linear algebra-based
/// triangle counting with KokkosKernels", HPEC 2017.
///
/// For a middle vertex `i`, each upper neighbor `y` contributes the
/// neighbors of `y` below `i` that are also lower neighbors of `i`.
pub fn low(graph: &CsrGraph) -> u64 {
    let mut count = 0u64;
    for i in 0..graph.num_vertices() {
        let row = graph.neighbors(i);
        let (lower, upper) = row.split_at(row.partition_point(|&w| w < i));
        if lower.is_empty() {
            continue;
        }
        for &y in upper {
            let ny = graph.neighbors(y);
            count += merge_count(lower, &ny[..ny.partition_point(|&x| x < i)]);
        }
    }
    count
}

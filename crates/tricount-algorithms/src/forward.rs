//! Forward algorithm
//!
//! Schank & Wagner, "Finding, Counting and Listing All Triangles in Large
//! Graphs, an Experimental Study", WEA 2005.
//!
//! Vertices are scanned in id order. For every edge `(s, t)` with `s < t` the
//! forward lists `A[s]` and `A[t]` (lower neighbors seen so far) are
//! intersected, then `s` is appended to `A[t]`. A triangle `a < b < c` is
//! found exactly once, on edge `(b, c)`, when `a` already sits in both lists.

use crate::common::{try_filled, AlgoResult, CsrGraph};
use crate::intersect::Intersect;

/// Per-vertex forward lists laid out like `col_index`.
///
/// The list of `v` lives at `slots[row_index[v]..row_index[v] + len[v]]` and
/// only ever grows, in ascending order.
struct ForwardLists {
    slots: Vec<usize>,
    len: Vec<usize>,
}

impl ForwardLists {
    fn new(graph: &CsrGraph) -> AlgoResult<Self> {
        Ok(Self {
            slots: try_filled(graph.col_index().len(), 0, "forward lists")?,
            len: try_filled(graph.num_vertices(), 0, "forward list sizes")?,
        })
    }

    #[inline]
    fn list(&self, graph: &CsrGraph, v: usize) -> &[usize] {
        let start = graph.row_index()[v];
        &self.slots[start..start + self.len[v]]
    }

    #[inline]
    fn push(&mut self, graph: &CsrGraph, v: usize, x: usize) {
        self.slots[graph.row_index()[v] + self.len[v]] = x;
        self.len[v] += 1;
    }
}

/// Counts triangles with the forward algorithm and the given intersection.
///
/// No correction factor: each triangle is reported once.
pub fn forward<I: Intersect>(graph: &CsrGraph, intersect: &mut I) -> AlgoResult<u64> {
    let mut lists = ForwardLists::new(graph)?;
    let mut count = 0u64;

    for s in 0..graph.num_vertices() {
        for &t in graph.neighbors(s) {
            if s < t {
                count += intersect.count(lists.list(graph, s), lists.list(graph, t));
                lists.push(graph, t, s);
            }
        }
    }

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersect::{IntersectionStrategy, Intersector, MergePath};

    fn complete(n: usize) -> CsrGraph {
        let edges: Vec<_> = (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).collect();
        CsrGraph::from_edges(n, &edges).unwrap()
    }

    #[test]
    fn test_forward_complete_graphs() {
        for n in 0usize..9 {
            let expected = (n * n.saturating_sub(1) * n.saturating_sub(2) / 6) as u64;
            assert_eq!(forward(&complete(n), &mut MergePath).unwrap(), expected, "K{n}");
        }
    }

    #[test]
    fn test_forward_with_every_intersection() {
        // Triangle plus pendant
        let g = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        for strategy in IntersectionStrategy::ALL {
            let mut i = Intersector::new(strategy, g.num_vertices(), 1).unwrap();
            assert_eq!(forward(&g, &mut i).unwrap(), 1, "strategy {strategy}");
        }
    }

    #[test]
    fn test_forward_four_cycle() {
        let g = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(forward(&g, &mut MergePath).unwrap(), 0);
    }
}

//! Compact forward
//!
//! Latapy, "Theory and practice of triangle problems in very large (sparse
//! (power-law)) graphs", 2006; Algorithm 3.7 in Schank's dissertation.
//!
//! The graph is reordered highest degree first and every vertex keeps only
//! its lower-id neighbors. For each `i` and each lower neighbor `l`, the
//! triangles `k < l < i` are the common members of `low(i)` below `l` and
//! `low(l)`, found by merge-path.

use crate::common::{try_with_capacity, AlgoResult, CsrGraph};
use crate::intersect::merge_count;
use crate::orientation::{reorder_by_degree, DegreeOrder};

/// Lower-neighbor lists in CSR form
struct LowerNeighbors {
    row_index: Vec<usize>,
    col_index: Vec<usize>,
}

impl LowerNeighbors {
    fn build(graph: &CsrGraph) -> AlgoResult<Self> {
        let n = graph.num_vertices();
        let mut row_index = try_with_capacity(n + 1, "compact row index")?;
        let mut col_index = try_with_capacity(graph.num_edges(), "compact column index")?;
        row_index.push(0);
        for v in 0..n {
            let row = graph.neighbors(v);
            // Rows are sorted, so the lower neighbors are a prefix.
            let lower = row.partition_point(|&w| w < v);
            col_index.extend_from_slice(&row[..lower]);
            row_index.push(col_index.len());
        }
        Ok(Self { row_index, col_index })
    }

    #[inline]
    fn row(&self, v: usize) -> &[usize] {
        &self.col_index[self.row_index[v]..self.row_index[v + 1]]
    }
}

/// Counts triangles over a graph already in the desired vertex order.
pub fn compact_forward_ordered(graph: &CsrGraph) -> AlgoResult<u64> {
    let low = LowerNeighbors::build(graph)?;
    let mut count = 0u64;
    for i in 0..graph.num_vertices() {
        let row = low.row(i);
        for (p, &l) in row.iter().enumerate() {
            count += merge_count(&row[..p], low.row(l));
        }
    }
    Ok(count)
}

/// Reorders by descending degree, then counts.
pub fn compact_forward(graph: &CsrGraph) -> AlgoResult<u64> {
    let ordered = reorder_by_degree(graph, DegreeOrder::Descending)?;
    compact_forward_ordered(&ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_forward_small_graphs() {
        let k4 = CsrGraph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        assert_eq!(compact_forward(&k4).unwrap(), 4);

        let pendant = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        assert_eq!(compact_forward(&pendant).unwrap(), 1);

        let square = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(compact_forward(&square).unwrap(), 0);

        assert_eq!(compact_forward(&CsrGraph::empty(0)).unwrap(), 0);
    }

    #[test]
    fn test_ordered_variant_matches() {
        // Two triangles sharing edge {1, 2}
        let g = CsrGraph::from_edges(4, &[(0, 1), (0, 2), (1, 2), (1, 3), (2, 3)]).unwrap();
        assert_eq!(compact_forward_ordered(&g).unwrap(), 2);
        assert_eq!(compact_forward(&g).unwrap(), 2);
    }
}

//! Parallel oriented edge iterator
//!
//! The outer vertex loop is split across rayon workers. Each worker owns a
//! private marker array; a vertex `v` marks `N(v)` and for every `w > v`
//! counts marked `x > w` in `N(w)`, so each triangle `v < w < x` is
//! attributed to exactly one `(v, w)` pair and the per-vertex counts are
//! simply summed.

use crate::common::{AlgoError, AlgoResult, CsrGraph};
use crate::intersect::MarkerSet;
use rayon::prelude::*;

fn count_from(graph: &CsrGraph, marks: &mut MarkerSet, v: usize) -> u64 {
    let row = graph.neighbors(v);
    marks.mark_all(row);
    let mut count = 0u64;
    for &w in &row[row.partition_point(|&w| w <= v)..] {
        let nw = graph.neighbors(w);
        count += nw[nw.partition_point(|&x| x <= w)..]
            .iter()
            .filter(|&&x| marks.is_marked(x))
            .count() as u64;
    }
    marks.clear();
    count
}

/// `marker_len` sizes each worker's marker array and must cover every vertex id.
fn run(graph: &CsrGraph, marker_len: usize) -> AlgoResult<u64> {
    (0..graph.num_vertices())
        .into_par_iter()
        .map_init(
            || MarkerSet::new(marker_len),
            |marks, v| match marks {
                Ok(marks) => Ok(count_from(graph, marks, v)),
                Err(e) => Err(e.clone()),
            },
        )
        .try_reduce(|| 0, |a, b| Ok(a + b))
}

/// Counts triangles on `threads` workers, or on rayon's global pool when `None`.
pub fn parallel_edge_iterator(graph: &CsrGraph, threads: Option<usize>) -> AlgoResult<u64> {
    match threads {
        None => run(graph, graph.num_vertices()),
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| AlgoError::ThreadPool(e.to_string()))?;
            pool.install(|| run(graph, graph.num_vertices()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::brute_force;

    #[test]
    fn test_parallel_matches_brute_force() {
        let mut edges = Vec::new();
        for i in 0..60usize {
            edges.push((i, (i + 1) % 60));
            edges.push((i, (i + 2) % 60));
            edges.push((i, (i * 11 + 5) % 60));
        }
        let g = CsrGraph::from_edges(60, &edges).unwrap();
        let expected = brute_force(&g);
        assert!(expected > 0);
        assert_eq!(parallel_edge_iterator(&g, None).unwrap(), expected);
        assert_eq!(parallel_edge_iterator(&g, Some(3)).unwrap(), expected);
    }

    #[test]
    fn test_worker_allocation_failure_is_reported() {
        let g = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        let pool = rayon::ThreadPoolBuilder::new().num_threads(2).build().unwrap();
        let result = pool.install(|| run(&g, usize::MAX));
        assert!(
            matches!(result, Err(AlgoError::AllocationFailure { what: "marker array", len: usize::MAX })),
            "{result:?}"
        );
    }

    #[test]
    fn test_parallel_empty() {
        assert_eq!(parallel_edge_iterator(&CsrGraph::empty(5), Some(1)).unwrap(), 0);
    }
}

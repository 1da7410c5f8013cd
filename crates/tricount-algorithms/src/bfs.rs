//! Breadth-first level assignment
//!
//! One BFS per connected component, roots taken in ascending id order. The
//! root gets level 1, `0` means unvisited. While a vertex is dequeued each of
//! its half-edges is classified: horizontal when both endpoints share a level,
//! cross otherwise.

use crate::common::{try_filled, try_with_capacity, AlgoError, AlgoResult, CsrGraph, VertexId};
use std::collections::VecDeque;

/// Level of a vertex that no BFS has reached yet
pub const UNVISITED: u32 = 0;

/// Parent of a BFS root or of a vertex with no live edge
pub const NO_PARENT: VertexId = VertexId::MAX;

/// Levels and the horizontal/cross half-edge partition of one BFS pass
#[derive(Debug, Clone)]
pub struct BfsLevels {
    /// `level[v]`, root of each component = 1
    pub level: Vec<u32>,
    /// Indexed like `col_index`: both endpoints on the same level
    pub horizontal: Vec<bool>,
    /// Vertices in discovery order
    pub order: Vec<VertexId>,
}

impl BfsLevels {
    /// Number of undirected horizontal edges
    pub fn horizontal_edges(&self) -> usize {
        self.horizontal.iter().filter(|&&h| h).count() / 2
    }

    /// Number of connected components (= BFS roots)
    pub fn components(&self) -> usize {
        self.order.iter().filter(|&&v| self.level[v] == 1).count()
    }
}

/// FIFO queue sized for every vertex of the graph.
pub fn new_queue(n: usize) -> AlgoResult<VecDeque<VertexId>> {
    let mut queue = VecDeque::new();
    queue
        .try_reserve_exact(n)
        .map_err(|_| AlgoError::AllocationFailure { what: "bfs queue", len: n })?;
    Ok(queue)
}

/// Runs one BFS from `root`, filling `level` and `horizontal` for its component.
///
/// `root` must be unvisited. Returns the discovered vertices through `order`.
pub fn bfs_from(
    graph: &CsrGraph,
    root: VertexId,
    level: &mut [u32],
    horizontal: &mut [bool],
    queue: &mut VecDeque<VertexId>,
    order: &mut Vec<VertexId>,
) {
    let col = graph.col_index();
    level[root] = 1;
    order.push(root);
    queue.push_back(root);

    while let Some(v) = queue.pop_front() {
        let lv = level[v];
        for i in graph.row_range(v) {
            let w = col[i];
            if level[w] == UNVISITED {
                level[w] = lv + 1;
                order.push(w);
                queue.push_back(w);
                horizontal[i] = false;
            } else {
                horizontal[i] = level[w] == lv;
            }
        }
    }
}

/// Assigns BFS levels to every vertex and classifies every half-edge.
pub fn assign_levels(graph: &CsrGraph) -> AlgoResult<BfsLevels> {
    let mut queue = new_queue(graph.num_vertices())?;
    assign_levels_with(graph, &mut queue)
}

/// Like [`assign_levels`], reusing a caller-owned queue.
///
/// The queue is empty again when this returns.
pub fn assign_levels_with(graph: &CsrGraph, queue: &mut VecDeque<VertexId>) -> AlgoResult<BfsLevels> {
    let n = graph.num_vertices();
    let mut level = try_filled(n, UNVISITED, "level array")?;
    let mut horizontal = try_filled(graph.col_index().len(), false, "horizontal edge flags")?;
    let mut order = try_with_capacity(n, "bfs order")?;

    for root in 0..n {
        if level[root] == UNVISITED {
            bfs_from(graph, root, &mut level, &mut horizontal, queue, &mut order);
        }
    }

    Ok(BfsLevels { level, horizontal, order })
}

/// BFS spanning forest over the half-edges flagged in `live`.
///
/// `live` is indexed like `col_index` and must be symmetric. Roots are taken
/// in ascending id order and every vertex's parent is the first dequeued
/// vertex that reaches it. `parent` and `visited` are overwritten.
pub fn spanning_forest(
    graph: &CsrGraph,
    live: &[bool],
    parent: &mut [VertexId],
    visited: &mut [bool],
    queue: &mut VecDeque<VertexId>,
) {
    let col = graph.col_index();
    parent.fill(NO_PARENT);
    visited.fill(false);

    for root in 0..graph.num_vertices() {
        if visited[root] {
            continue;
        }
        visited[root] = true;
        queue.push_back(root);
        while let Some(v) = queue.pop_front() {
            for i in graph.row_range(v) {
                let w = col[i];
                if live[i] && !visited[w] {
                    visited[w] = true;
                    parent[w] = v;
                    queue.push_back(w);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_queue_fails_cleanly() {
        assert_eq!(
            new_queue(usize::MAX).unwrap_err(),
            AlgoError::AllocationFailure { what: "bfs queue", len: usize::MAX }
        );
    }

    #[test]
    fn test_levels_on_path() {
        // 0 - 1 - 2 - 3
        let g = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3)]).unwrap();
        let bfs = assign_levels(&g).unwrap();
        assert_eq!(bfs.level, vec![1, 2, 3, 4]);
        assert_eq!(bfs.horizontal_edges(), 0);
        assert_eq!(bfs.order, vec![0, 1, 2, 3]);
        assert_eq!(bfs.components(), 1);
    }

    #[test]
    fn test_triangle_has_one_horizontal_edge() {
        let g = CsrGraph::from_edges(3, &[(0, 1), (1, 2), (2, 0)]).unwrap();
        let bfs = assign_levels(&g).unwrap();
        assert_eq!(bfs.level, vec![1, 2, 2]);
        assert_eq!(bfs.horizontal_edges(), 1);
        // Both half-edges of {1, 2} are horizontal.
        let col = g.col_index();
        for v in 0..3 {
            for i in g.row_range(v) {
                let expected = (v, col[i]) == (1, 2) || (v, col[i]) == (2, 1);
                assert_eq!(bfs.horizontal[i], expected);
            }
        }
    }

    #[test]
    fn test_one_root_per_component() {
        // {0, 1}, {2}, {3, 4, 5}
        let g = CsrGraph::from_edges(6, &[(0, 1), (3, 4), (4, 5), (3, 5)]).unwrap();
        let bfs = assign_levels(&g).unwrap();
        assert_eq!(bfs.level, vec![1, 2, 1, 1, 2, 2]);
        assert_eq!(bfs.components(), 3);
        assert_eq!(bfs.horizontal_edges(), 1);
    }

    #[test]
    fn test_edges_never_skip_a_level() {
        let edges: Vec<_> = (0..30).flat_map(|i| [(i, (i * 7 + 3) % 30), (i, (i + 1) % 30)]).collect();
        let g = CsrGraph::from_edges(30, &edges).unwrap();
        let bfs = assign_levels(&g).unwrap();
        for (v, w) in g.edges() {
            assert!(bfs.level[v].abs_diff(bfs.level[w]) <= 1);
        }
    }

    #[test]
    fn test_spanning_forest_skips_dead_edges() {
        // Triangle 0-1-2 plus edge 3-4; kill {0, 1}
        let g = CsrGraph::from_edges(5, &[(0, 1), (1, 2), (2, 0), (3, 4)]).unwrap();
        let live: Vec<bool> = (0..g.num_vertices())
            .flat_map(|v| g.neighbors(v).iter().map(move |&w| (v, w)).collect::<Vec<_>>())
            .map(|(v, w)| !matches!((v, w), (0, 1) | (1, 0)))
            .collect();
        let mut parent = vec![0; 5];
        let mut visited = vec![true; 5];
        let mut queue = new_queue(5).unwrap();
        spanning_forest(&g, &live, &mut parent, &mut visited, &mut queue);
        assert_eq!(parent, vec![NO_PARENT, 2, 0, NO_PARENT, 3]);
        assert!(queue.is_empty());
    }
}

//! Tree listing
//!
//! Itai and Rodeh, "Finding a minimum circuit in a graph", SIAM J. Computing
//! 7(4), 1978.
//!
//! Each round builds a BFS spanning forest over the edges still alive. A
//! live triangle containing a tree edge is found from one of its non-tree
//! edges `{u, v}`: the third vertex is the parent of `u` or the parent of
//! `v`. Both half-edges of `{u, v}` are tried, parent of the source first,
//! which credits every such triangle exactly twice in that round. The tree
//! edges are then removed, so no triangle is seen in a later round, and the
//! rounds repeat until no edge is left.

use crate::bfs::{new_queue, spanning_forest, NO_PARENT};
use crate::common::{try_filled, AlgoResult, CsrGraph, VertexId};
use tracing::debug;

/// Index of half-edge `v -> w` when it exists and is still live.
#[inline]
fn live_slot(graph: &CsrGraph, live: &[bool], v: VertexId, w: VertexId) -> Option<usize> {
    if v == NO_PARENT {
        return None;
    }
    let start = graph.row_index()[v];
    graph
        .neighbors(v)
        .binary_search(&w)
        .ok()
        .map(|offset| start + offset)
        .filter(|&i| live[i])
}

/// Counts triangles by repeatedly peeling BFS spanning forests.
pub fn tree_list(graph: &CsrGraph) -> AlgoResult<u64> {
    let n = graph.num_vertices();
    let col = graph.col_index();
    let mut live = try_filled(col.len(), true, "live edge mask")?;
    let mut remaining = col.len();
    let mut parent = try_filled(n, NO_PARENT, "parent array")?;
    let mut visited = try_filled(n, false, "visited flags")?;
    let mut queue = new_queue(n)?;
    let mut hits = 0u64;
    let mut rounds = 0usize;

    while remaining > 0 {
        rounds += 1;
        spanning_forest(graph, &live, &mut parent, &mut visited, &mut queue);

        for u in 0..n {
            let pu = parent[u];
            for i in graph.row_range(u) {
                let v = col[i];
                // Skip dead edges and the edge up to the parent
                if !live[i] || pu == v {
                    continue;
                }
                if live_slot(graph, &live, pu, v).is_some() || live_slot(graph, &live, parent[v], u).is_some() {
                    hits += 1;
                }
            }
        }

        for v in 0..n {
            let p = parent[v];
            if p == NO_PARENT {
                continue;
            }
            for (a, b) in [(p, v), (v, p)] {
                if let Some(i) = live_slot(graph, &live, a, b) {
                    live[i] = false;
                    remaining -= 1;
                }
            }
        }
    }

    debug!(rounds, hits, "tree listing finished");
    Ok(hits / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::brute_force;

    #[test]
    fn test_tree_list_small_graphs() {
        let k4 = CsrGraph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        assert_eq!(tree_list(&k4).unwrap(), 4);

        let pendant = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
        assert_eq!(tree_list(&pendant).unwrap(), 1);

        let square = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]).unwrap();
        assert_eq!(tree_list(&square).unwrap(), 0);

        assert_eq!(tree_list(&CsrGraph::empty(0)).unwrap(), 0);
        assert_eq!(tree_list(&CsrGraph::empty(3)).unwrap(), 0);
    }

    #[test]
    fn test_triangles_without_tree_edges_wait_for_later_rounds() {
        // K6: the first forest is a star, K5 survives into the next round
        let edges: Vec<_> = (0..6).flat_map(|i| (i + 1..6).map(move |j| (i, j))).collect();
        let k6 = CsrGraph::from_edges(6, &edges).unwrap();
        assert_eq!(tree_list(&k6).unwrap(), 20);
    }

    #[test]
    fn test_tree_list_matches_brute_force_on_circulant() {
        let n = 45;
        let mut edges = Vec::new();
        for i in 0..n {
            for d in [1, 3, 4, 7] {
                edges.push((i, (i + d) % n));
            }
            edges.push((i, (i * 13 + 2) % n));
        }
        let g = CsrGraph::from_edges(n, &edges).unwrap();
        let expected = brute_force(&g);
        assert!(expected > 0);
        assert_eq!(tree_list(&g).unwrap(), expected);
    }
}

//! Single entry point over every counting algorithm

use crate::baseline::{brute_force, davis, edge_iterator, low, wedge};
use crate::bader::{bader, bader_forward, bader_hybrid, bader_integrated, bader_recursive};
use crate::common::{AlgoResult, CsrGraph};
use crate::compact_forward::compact_forward;
use crate::config::{Algorithm, CountConfig};
use crate::forward::forward;
use crate::intersect::Intersector;
use crate::orientation::orient;
use crate::parallel::parallel_edge_iterator;
use crate::treelist::tree_list;
use tracing::debug;

/// Counts the triangles of `graph` with `algorithm`.
///
/// The graph is relabelled per `config.orientation` first; the count does
/// not depend on the labelling.
pub fn count_triangles(graph: &CsrGraph, algorithm: Algorithm, config: &CountConfig) -> AlgoResult<u64> {
    config.validate()?;
    let graph = orient(graph, config.orientation, config.degree_order)?;
    let graph = graph.as_ref();
    debug!(
        %algorithm,
        intersection = %config.intersection,
        n = graph.num_vertices(),
        m = graph.num_edges(),
        max_degree = graph.max_degree(),
        "counting triangles"
    );

    let pluggable = || Intersector::new(config.intersection, graph.num_vertices(), config.hybrid_threshold);

    match algorithm {
        Algorithm::BruteForce => Ok(brute_force(graph)),
        Algorithm::Wedge => Ok(wedge(graph)),
        Algorithm::EdgeIterator => Ok(edge_iterator(graph, &mut pluggable()?)),
        Algorithm::Davis => davis(graph),
        Algorithm::Low => Ok(low(graph)),
        Algorithm::Forward => forward(graph, &mut pluggable()?),
        Algorithm::CompactForward => compact_forward(graph),
        Algorithm::TreeList => tree_list(graph),
        Algorithm::Bader => bader(graph, config.same_level_rule),
        Algorithm::BaderIntegrated => bader_integrated(graph, config.same_level_rule),
        Algorithm::BaderHybrid => bader_hybrid(graph, config),
        Algorithm::BaderForward => bader_forward(graph, config),
        Algorithm::BaderRecursive => bader_recursive(graph, config),
        Algorithm::ParallelEdgeIterator => parallel_edge_iterator(graph, config.threads),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::AlgoError;
    use crate::orientation::Orientation;

    #[test]
    fn test_every_algorithm_on_k4() {
        let g = CsrGraph::from_edges(4, &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]).unwrap();
        for algorithm in Algorithm::ALL {
            for orientation in Orientation::ALL {
                let config = CountConfig { orientation, ..Default::default() };
                assert_eq!(count_triangles(&g, algorithm, &config).unwrap(), 4, "{algorithm} {orientation}");
            }
        }
    }

    #[test]
    fn test_invalid_config_is_rejected_before_counting() {
        let g = CsrGraph::empty(3);
        let config = CountConfig { threads: Some(0), ..Default::default() };
        assert!(matches!(
            count_triangles(&g, Algorithm::Forward, &config),
            Err(AlgoError::InvalidConfig(_))
        ));
    }
}

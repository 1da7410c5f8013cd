use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tricount::generate::{complete, cycle, erdos_renyi, friendship, triangle_strip};
use tricount::{
    count_triangles, Algorithm, CountConfig, CsrGraph, DegreeOrder, IntersectionStrategy, Orientation,
    SameLevelRule,
};
use tricount_algorithms::bader::bader_recursive_with_stats;
use tricount_algorithms::orientation::{relabel, reorder_by_degree};
use tricount_algorithms::brute_force;

/// Every algorithm under every orientation and intersection primitive
fn all_configs() -> Vec<CountConfig> {
    let mut configs = Vec::new();
    for orientation in Orientation::ALL {
        for intersection in IntersectionStrategy::ALL {
            for same_level_rule in [SameLevelRule::TieBreak, SameLevelRule::DivideByThree] {
                configs.push(CountConfig {
                    orientation,
                    intersection,
                    same_level_rule,
                    hybrid_threshold: 4,
                    small_graph_threshold: 0,
                    ..Default::default()
                });
            }
        }
    }
    configs
}

fn assert_all_agree(graph: &CsrGraph, expected: u64) {
    for config in all_configs() {
        for algorithm in Algorithm::ALL {
            let got = count_triangles(graph, algorithm, &config).unwrap();
            assert_eq!(
                got, expected,
                "{algorithm} with {} / {} / {:?}",
                config.orientation, config.intersection, config.same_level_rule
            );
        }
    }
}

#[test]
fn test_empty_graph() {
    assert_all_agree(&CsrGraph::empty(0), 0);
    assert_all_agree(&CsrGraph::empty(10), 0);
}

#[test]
fn test_complete_graphs() {
    assert_all_agree(&complete(4).unwrap(), 4);
    assert_all_agree(&complete(5).unwrap(), 10);
    for n in [3u64, 6, 9] {
        assert_all_agree(&complete(n as usize).unwrap(), n * (n - 1) * (n - 2) / 6);
    }
}

#[test]
fn test_four_cycle_has_no_triangles() {
    assert_all_agree(&cycle(4).unwrap(), 0);
}

#[test]
fn test_triangle_with_pendant() {
    let g = CsrGraph::from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3)]).unwrap();
    assert_all_agree(&g, 1);
}

#[test]
fn test_known_families() {
    assert_all_agree(&friendship(9).unwrap(), 9);
    assert_all_agree(&triangle_strip(40).unwrap(), 38);
}

#[test]
fn test_random_graphs_match_brute_force() {
    for seed in 0..4 {
        let g = erdos_renyi(120, 0.08, seed).unwrap();
        let expected = brute_force(&g);
        assert!(expected > 0);
        assert_all_agree(&g, expected);
    }
}

#[test]
fn test_counting_is_idempotent_and_leaves_graph_untouched() {
    let g = erdos_renyi(80, 0.1, 5).unwrap();
    let before = g.clone();
    let config = CountConfig::default();
    for algorithm in Algorithm::ALL {
        let first = count_triangles(&g, algorithm, &config).unwrap();
        let second = count_triangles(&g, algorithm, &config).unwrap();
        assert_eq!(first, second, "{algorithm}");
    }
    assert_eq!(g, before);
}

#[test]
fn test_recursive_reduction_goes_deep_and_matches_brute_force() {
    // Dense random graphs keep horizontal edges at every level
    let config = CountConfig {
        small_graph_threshold: 0,
        recursive_fanout_threshold: 1.0,
        ..Default::default()
    };
    for seed in 0..3 {
        let g = erdos_renyi(60, 0.5, seed).unwrap();
        let (count, stats) = bader_recursive_with_stats(&g, &config).unwrap();
        assert_eq!(count, brute_force(&g));
        assert!(stats.max_depth >= 2, "depth {}", stats.max_depth);
        assert!(stats.splits >= 2);
    }
}

#[test]
fn test_relabelling_invariance() {
    let g = erdos_renyi(90, 0.1, 9).unwrap();
    let expected = brute_force(&g);
    let mut rng = StdRng::seed_from_u64(17);
    let config = CountConfig::default();

    for _ in 0..5 {
        // Fisher-Yates
        let mut perm: Vec<usize> = (0..g.num_vertices()).collect();
        for i in (1..perm.len()).rev() {
            let j = rng.gen_range(0..=i);
            perm.swap(i, j);
        }
        let shuffled = relabel(&g, &perm).unwrap();
        assert!(shuffled.validate().is_ok());
        for algorithm in [Algorithm::Forward, Algorithm::CompactForward, Algorithm::BaderRecursive] {
            assert_eq!(count_triangles(&shuffled, algorithm, &config).unwrap(), expected);
        }
    }
}

#[test]
fn test_degree_reorder_is_valid_and_monotone() {
    let g = erdos_renyi(150, 0.05, 2).unwrap();
    for order in [DegreeOrder::Ascending, DegreeOrder::Descending] {
        let r = reorder_by_degree(&g, order).unwrap();
        assert!(r.validate().is_ok());
        assert_eq!(r.num_edges(), g.num_edges());
        for v in 1..r.num_vertices() {
            match order {
                DegreeOrder::Ascending => assert!(r.degree(v - 1) <= r.degree(v)),
                DegreeOrder::Descending => assert!(r.degree(v - 1) >= r.degree(v)),
            }
        }
    }
}

#[test]
fn test_parallel_matches_sequential_for_any_thread_count() {
    let g = erdos_renyi(300, 0.04, 21).unwrap();
    let sequential = count_triangles(&g, Algorithm::Forward, &CountConfig::default()).unwrap();
    for threads in [1, 2, 7] {
        let config = CountConfig { threads: Some(threads), ..Default::default() };
        assert_eq!(
            count_triangles(&g, Algorithm::ParallelEdgeIterator, &config).unwrap(),
            sequential
        );
    }
}

pub mod common;
pub mod intersect;
pub mod bfs;
pub mod orientation;
pub mod config;
pub mod baseline;
pub mod forward;
pub mod compact_forward;
pub mod treelist;
pub mod bader;
pub mod parallel;
pub mod dispatch;

pub use common::{AlgoError, AlgoResult, CsrGraph, GraphError, GraphResult, InducedSubgraph, VertexId};
pub use intersect::{Intersect, IntersectionStrategy, Intersector, MarkerSet, DEFAULT_HYBRID_THRESHOLD};
pub use bfs::{assign_levels, BfsLevels};
pub use orientation::{orient, reorder_by_bfs, reorder_by_degree, DegreeOrder, Orientation};
pub use config::{Algorithm, CountConfig, SameLevelRule};
pub use baseline::{brute_force, davis, edge_iterator, low, wedge};
pub use forward::forward;
pub use compact_forward::{compact_forward, compact_forward_ordered};
pub use treelist::tree_list;
pub use bader::{
    bader, bader_forward, bader_forward_with_stats, bader_hybrid, bader_integrated, bader_levels,
    bader_recursive, bader_recursive_with_stats, ReductionStats,
};
pub use parallel::parallel_edge_iterator;
pub use dispatch::count_triangles;

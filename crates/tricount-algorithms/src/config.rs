//! Algorithm selection and tuning knobs

use crate::common::{AlgoError, AlgoResult};
use crate::intersect::{IntersectionStrategy, DEFAULT_HYBRID_THRESHOLD};
use crate::orientation::{DegreeOrder, Orientation};

/// Triangle counting algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Algorithm {
    /// Every vertex triple; reference oracle
    BruteForce,
    /// Oriented wedge closing
    Wedge,
    /// Oriented edge iterator, divisor 3
    EdgeIterator,
    /// Masked sparse product, divisor 6
    Davis,
    /// Lower-triangle product, one hit per triangle at its middle vertex
    Low,
    /// Incremental forward lists
    Forward,
    /// Degree-ordered lower-neighbor lists with merge-path
    CompactForward,
    /// Repeated BFS spanning forests, tree edges peeled each round
    TreeList,
    /// BFS levels, marker scan of horizontal edges
    Bader,
    /// Counting fused into the BFS
    BaderIntegrated,
    /// Forward fallback or level classification, chosen per graph
    BaderHybrid,
    /// One horizontal/cross split, forward on the horizontal subgraph
    BaderForward,
    /// Horizontal/cross split applied recursively
    BaderRecursive,
    /// Oriented edge iterator on rayon workers
    ParallelEdgeIterator,
}

impl Algorithm {
    pub const ALL: [Algorithm; 14] = [
        Algorithm::BruteForce,
        Algorithm::Wedge,
        Algorithm::EdgeIterator,
        Algorithm::Davis,
        Algorithm::Low,
        Algorithm::Forward,
        Algorithm::CompactForward,
        Algorithm::TreeList,
        Algorithm::Bader,
        Algorithm::BaderIntegrated,
        Algorithm::BaderHybrid,
        Algorithm::BaderForward,
        Algorithm::BaderRecursive,
        Algorithm::ParallelEdgeIterator,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::BruteForce => "brute-force",
            Algorithm::Wedge => "wedge",
            Algorithm::EdgeIterator => "edge-iterator",
            Algorithm::Davis => "davis",
            Algorithm::Low => "low",
            Algorithm::Forward => "forward",
            Algorithm::CompactForward => "compact-forward",
            Algorithm::TreeList => "tree-list",
            Algorithm::Bader => "bader",
            Algorithm::BaderIntegrated => "bader-integrated",
            Algorithm::BaderHybrid => "bader-hybrid",
            Algorithm::BaderForward => "bader-forward",
            Algorithm::BaderRecursive => "bader-recursive",
            Algorithm::ParallelEdgeIterator => "parallel-edge-iterator",
        }
    }

    /// Baselines too slow to run on large graphs
    pub fn is_reference_only(&self) -> bool {
        matches!(self, Algorithm::BruteForce | Algorithm::Wedge)
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|a| a.name() == s)
            .ok_or_else(|| format!("unknown algorithm '{s}'"))
    }
}

/// How the BFS-level algorithms count triangles whose three vertices share a level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SameLevelRule {
    /// Count a same-level hit once, on the pair that precedes the third vertex
    #[default]
    TieBreak,
    /// Count every hit and divide the same-level counter by three
    DivideByThree,
}

/// Counting configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CountConfig {
    /// Intersection primitive for the pluggable algorithms
    pub intersection: IntersectionStrategy,
    /// Shorter-list length above which `Hybrid` uses the marker
    pub hybrid_threshold: usize,
    /// Relabelling applied before counting
    pub orientation: Orientation,
    /// Direction used by `Orientation::Degree`
    pub degree_order: DegreeOrder,
    /// Edge count below which the BFS-level family falls back to forward
    pub small_graph_threshold: usize,
    /// Horizontal edge fraction above which the BFS-level family falls back to forward
    pub recursive_fanout_threshold: f64,
    /// Same-level triangle accounting in the BFS-level family
    pub same_level_rule: SameLevelRule,
    /// Worker threads for `ParallelEdgeIterator` (None = rayon default)
    pub threads: Option<usize>,
}

impl Default for CountConfig {
    fn default() -> Self {
        Self {
            intersection: IntersectionStrategy::Hybrid,
            hybrid_threshold: DEFAULT_HYBRID_THRESHOLD,
            orientation: Orientation::Id,
            degree_order: DegreeOrder::Descending,
            small_graph_threshold: 100,
            recursive_fanout_threshold: 0.7,
            same_level_rule: SameLevelRule::TieBreak,
            threads: None,
        }
    }
}

impl CountConfig {
    /// Rejects values no algorithm can honour.
    pub fn validate(&self) -> AlgoResult<()> {
        if self.hybrid_threshold == 0 {
            return Err(AlgoError::InvalidConfig("hybrid_threshold must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.recursive_fanout_threshold) {
            return Err(AlgoError::InvalidConfig(format!(
                "recursive_fanout_threshold must be within [0, 1], got {}",
                self.recursive_fanout_threshold
            )));
        }
        if self.threads == Some(0) {
            return Err(AlgoError::InvalidConfig("threads must be at least 1".into()));
        }
        Ok(())
    }
}

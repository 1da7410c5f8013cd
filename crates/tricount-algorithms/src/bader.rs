//! BFS-level ("Bader") triangle counting
//!
//! A BFS per connected component assigns levels. Adjacent vertices differ by
//! at most one level, so every triangle has either all three vertices on one
//! level (three horizontal edges) or exactly two (one horizontal edge, two
//! cross edges). Scanning only horizontal edges therefore finds every
//! triangle:
//!
//! - mixed-level triangles once, on their single horizontal edge;
//! - same-level triangles three times, once per edge, which
//!   [`SameLevelRule`] reduces to one.
//!
//! The recursive variant splits the graph into the horizontal subgraph `G0`
//! and the cross edges `G1`, counts the mixed triangles directly and recurses
//! into `G0`, which holds exactly the same-level triangles.

use crate::bfs::{assign_levels, assign_levels_with, new_queue, BfsLevels, UNVISITED};
use crate::common::{try_filled, AlgoResult, CsrGraph, InducedSubgraph, VertexId};
use crate::config::{CountConfig, SameLevelRule};
use crate::forward::forward;
use crate::intersect::{Intersect, Intersector, MarkerSet};
use std::collections::VecDeque;
use tracing::debug;

/// Mixed-level (`c1`) and same-level (`c2`) triangle hits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct LevelTally {
    mixed: u64,
    same: u64,
}

impl LevelTally {
    /// Records common neighbor `x` of horizontal pair `(v, w)`.
    ///
    /// `x_last` says whether `x` is the last vertex of the triangle under the
    /// ordering the caller scans horizontal edges in.
    #[inline]
    fn record(&mut self, rule: SameLevelRule, level_v: u32, level_x: u32, x_last: bool) {
        if level_x != level_v {
            self.mixed += 1;
        } else {
            match rule {
                SameLevelRule::DivideByThree => self.same += 1,
                SameLevelRule::TieBreak => {
                    if x_last {
                        self.same += 1
                    }
                }
            }
        }
    }

    fn total(&self, rule: SameLevelRule) -> u64 {
        match rule {
            SameLevelRule::DivideByThree => self.mixed + self.same / 3,
            SameLevelRule::TieBreak => self.mixed + self.same,
        }
    }
}

/// Level-classified count over horizontal edges, marking `N(v)` once per vertex.
pub fn bader(graph: &CsrGraph, rule: SameLevelRule) -> AlgoResult<u64> {
    let levels = assign_levels(graph)?;
    let mut marks = MarkerSet::new(graph.num_vertices())?;
    Ok(scan_horizontal(graph, &levels, &mut marks, rule))
}

fn scan_horizontal(graph: &CsrGraph, levels: &BfsLevels, marks: &mut MarkerSet, rule: SameLevelRule) -> u64 {
    let col = graph.col_index();
    let mut tally = LevelTally::default();

    for v in 0..graph.num_vertices() {
        let lv = levels.level[v];
        marks.mark_all(graph.neighbors(v));
        for i in graph.row_range(v) {
            let w = col[i];
            if !levels.horizontal[i] || w < v {
                continue;
            }
            for &x in graph.neighbors(w) {
                if marks.is_marked(x) {
                    tally.record(rule, lv, levels.level[x], w < x);
                }
            }
        }
        marks.clear();
    }

    tally.total(rule)
}

/// Level-classified count over horizontal edges with a pluggable intersection.
pub fn bader_levels<I: Intersect>(
    graph: &CsrGraph,
    levels: &BfsLevels,
    intersect: &mut I,
    rule: SameLevelRule,
) -> u64 {
    let col = graph.col_index();
    let mut tally = LevelTally::default();

    for v in 0..graph.num_vertices() {
        let lv = levels.level[v];
        for i in graph.row_range(v) {
            let w = col[i];
            if !levels.horizontal[i] || w < v {
                continue;
            }
            intersect.for_each_common(graph.neighbors(v), graph.neighbors(w), |x| {
                tally.record(rule, lv, levels.level[x], w < x)
            });
        }
    }

    tally.total(rule)
}

/// Counting fused into the BFS.
///
/// When `v` is dequeued its neighbors are marked; every already-visited
/// neighbor `w` on the same level is scanned from whichever endpoint
/// dominates (higher degree, then lower id). A neighbor of `v` still
/// unvisited at that point lands one level below `v`, so treating its level
/// as different is already correct.
pub fn bader_integrated(graph: &CsrGraph, rule: SameLevelRule) -> AlgoResult<u64> {
    let n = graph.num_vertices();
    let mut level = try_filled(n, UNVISITED, "level array")?;
    let mut marks = MarkerSet::new(n)?;
    let mut queue = new_queue(n)?;
    let mut tally = LevelTally::default();

    let dominates = |a: VertexId, b: VertexId| {
        let (da, db) = (graph.degree(a), graph.degree(b));
        da > db || (da == db && a < b)
    };

    for root in 0..n {
        if level[root] != UNVISITED {
            continue;
        }
        level[root] = 1;
        queue.push_back(root);

        while let Some(v) = queue.pop_front() {
            let lv = level[v];
            let row = graph.neighbors(v);
            marks.mark_all(row);
            for &w in row {
                if level[w] == UNVISITED {
                    level[w] = lv + 1;
                    queue.push_back(w);
                } else if level[w] == lv && dominates(v, w) {
                    for &x in graph.neighbors(w) {
                        if marks.is_marked(x) {
                            tally.record(rule, lv, level[x], dominates(w, x));
                        }
                    }
                }
            }
            marks.clear();
        }
    }

    Ok(tally.total(rule))
}

/// Forward fallback or level classification, decided once for the whole graph.
pub fn bader_hybrid(graph: &CsrGraph, config: &CountConfig) -> AlgoResult<u64> {
    let mut intersect = Intersector::new(config.intersection, graph.num_vertices(), config.hybrid_threshold)?;
    let m = graph.num_edges();
    if m == 0 {
        return Ok(0);
    }
    if m < config.small_graph_threshold {
        debug!(m, intersection = %intersect.strategy(), "small graph, counting with forward");
        return forward(graph, &mut intersect);
    }

    let levels = assign_levels(graph)?;
    let fraction = levels.horizontal_edges() as f64 / m as f64;
    if fraction > config.recursive_fanout_threshold {
        debug!(fraction, intersection = %intersect.strategy(), "mostly horizontal edges, counting with forward");
        return forward(graph, &mut intersect);
    }
    debug!(fraction, components = levels.components(), "counting over horizontal edges");
    Ok(bader_levels(graph, &levels, &mut intersect, config.same_level_rule))
}

/// What the recursive reduction did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReductionStats {
    /// Deepest recursion level reached; the input graph is level 0
    pub max_depth: usize,
    /// Horizontal/cross splits performed
    pub splits: usize,
    /// Subgraphs handed to the forward algorithm
    pub forward_fallbacks: usize,
}

/// Scratch shared by every level of the recursion, sized for the input graph.
///
/// Subgraphs only ever have fewer vertices, so one allocation serves them all.
pub struct ReductionScratch {
    marks: MarkerSet,
    queue: VecDeque<VertexId>,
    intersect: Intersector,
}

impl ReductionScratch {
    pub fn new(n: usize, config: &CountConfig) -> AlgoResult<Self> {
        Ok(Self {
            marks: MarkerSet::new(n)?,
            queue: new_queue(n)?,
            intersect: Intersector::new(config.intersection, n, config.hybrid_threshold)?,
        })
    }
}

/// Mixed-level triangles: both endpoints of a horizontal edge share a cross neighbor.
fn cross_triangles(graph: &CsrGraph, levels: &BfsLevels, marks: &mut MarkerSet) -> u64 {
    let col = graph.col_index();
    let horizontal = &levels.horizontal;
    let mut count = 0u64;

    for v in 0..graph.num_vertices() {
        let range = graph.row_range(v);
        let mut any_cross = false;
        for i in range.clone() {
            if !horizontal[i] {
                marks.mark(col[i]);
                any_cross = true;
            }
        }
        if !any_cross {
            continue;
        }
        for i in range {
            let w = col[i];
            if horizontal[i] && v < w {
                count += graph
                    .row_range(w)
                    .filter(|&j| !horizontal[j] && marks.is_marked(col[j]))
                    .count() as u64;
            }
        }
        marks.clear();
    }

    count
}

fn reduce(
    graph: &CsrGraph,
    config: &CountConfig,
    scratch: &mut ReductionScratch,
    depth: usize,
    max_depth: Option<usize>,
    stats: &mut ReductionStats,
) -> AlgoResult<u64> {
    debug_assert!(scratch.marks.capacity() >= graph.num_vertices());
    stats.max_depth = stats.max_depth.max(depth);
    let m = graph.num_edges();
    if m == 0 {
        return Ok(0);
    }
    if m < config.small_graph_threshold {
        debug!(depth, m, "subgraph below size threshold, counting with forward");
        stats.forward_fallbacks += 1;
        return forward(graph, &mut scratch.intersect);
    }

    let levels = assign_levels_with(graph, &mut scratch.queue)?;
    let k = levels.horizontal_edges();
    let fraction = k as f64 / m as f64;
    if fraction > config.recursive_fanout_threshold {
        debug!(depth, m, fraction, "leveling not paying off, counting with forward");
        stats.forward_fallbacks += 1;
        return forward(graph, &mut scratch.intersect);
    }

    stats.splits += 1;
    let cross = cross_triangles(graph, &levels, &mut scratch.marks);
    let g0 = InducedSubgraph::from_half_edges(graph, &levels.horizontal)?;
    debug!(
        depth,
        m,
        horizontal = k,
        cross,
        components = levels.components(),
        g0_vertices = g0.original_ids.len(),
        g0_first = ?g0.original_ids.first(),
        "split into horizontal and cross edges"
    );
    drop(levels);

    let same_level = match max_depth {
        Some(limit) if depth >= limit => {
            stats.forward_fallbacks += 1;
            forward(&g0.graph, &mut scratch.intersect)?
        }
        _ => reduce(&g0.graph, config, scratch, depth + 1, max_depth, stats)?,
    };
    Ok(cross + same_level)
}

/// Recursive horizontal/cross reduction, reporting what it did.
pub fn bader_recursive_with_stats(graph: &CsrGraph, config: &CountConfig) -> AlgoResult<(u64, ReductionStats)> {
    let mut scratch = ReductionScratch::new(graph.num_vertices(), config)?;
    let mut stats = ReductionStats::default();
    let count = reduce(graph, config, &mut scratch, 0, None, &mut stats)?;
    Ok((count, stats))
}

/// Recursive horizontal/cross reduction.
pub fn bader_recursive(graph: &CsrGraph, config: &CountConfig) -> AlgoResult<u64> {
    bader_recursive_with_stats(graph, config).map(|(count, _)| count)
}

/// One horizontal/cross split with the horizontal subgraph counted by forward,
/// reporting what it did.
pub fn bader_forward_with_stats(graph: &CsrGraph, config: &CountConfig) -> AlgoResult<(u64, ReductionStats)> {
    let mut scratch = ReductionScratch::new(graph.num_vertices(), config)?;
    let mut stats = ReductionStats::default();
    // Never fall back on the whole graph: always split once.
    let split_config = CountConfig {
        small_graph_threshold: 0,
        recursive_fanout_threshold: 1.0,
        ..config.clone()
    };
    let count = reduce(graph, &split_config, &mut scratch, 0, Some(0), &mut stats)?;
    Ok((count, stats))
}

/// One horizontal/cross split; the horizontal subgraph is counted with forward.
pub fn bader_forward(graph: &CsrGraph, config: &CountConfig) -> AlgoResult<u64> {
    bader_forward_with_stats(graph, config).map(|(count, _)| count)
}

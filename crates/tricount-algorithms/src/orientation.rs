//! Orientation strategies
//!
//! Every algorithm in this crate orients edges from lower to higher vertex id.
//! Other precedence orders are obtained by relabelling the graph first, so an
//! orientation here is a permutation of vertex ids:
//!
//! - `Id`: the identity.
//! - `Degree`: ids sorted by `(degree, id)`, ascending or descending.
//! - `BfsLevel`: ids in BFS discovery order, so level never decreases with id
//!   inside a component.

use crate::bfs::assign_levels;
use crate::common::{try_filled, try_with_capacity, AlgoResult, CsrGraph, VertexId};
use std::borrow::Cow;
use tracing::debug;

/// Vertex precedence used before counting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Orientation {
    #[default]
    Id,
    Degree,
    BfsLevel,
}

impl Orientation {
    pub const ALL: [Orientation; 3] = [Orientation::Id, Orientation::Degree, Orientation::BfsLevel];

    pub fn name(&self) -> &'static str {
        match self {
            Orientation::Id => "id",
            Orientation::Degree => "degree",
            Orientation::BfsLevel => "bfs-level",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|o| o.name() == s)
            .ok_or_else(|| format!("unknown orientation '{s}'"))
    }
}

/// Direction of a degree reorder
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DegreeOrder {
    /// Lowest degree gets id 0
    Ascending,
    /// Highest degree gets id 0
    #[default]
    Descending,
}

/// Returns a fresh graph whose vertex `new_id[v]` is vertex `v` of `graph`.
///
/// `new_id` must be a permutation of `0..n`. Rows are re-sorted under the new
/// ids; the input is untouched.
pub fn relabel(graph: &CsrGraph, new_id: &[VertexId]) -> AlgoResult<CsrGraph> {
    let n = graph.num_vertices();
    let mut old_id = try_filled(n, 0, "inverse permutation")?;
    for (v, &nv) in new_id.iter().enumerate() {
        old_id[nv] = v;
    }

    let mut row_index = try_with_capacity(n + 1, "relabelled row index")?;
    let mut col_index = try_with_capacity(graph.col_index().len(), "relabelled column index")?;
    row_index.push(0);
    for &v in &old_id {
        let start = col_index.len();
        col_index.extend(graph.neighbors(v).iter().map(|&w| new_id[w]));
        col_index[start..].sort_unstable();
        row_index.push(col_index.len());
    }

    Ok(CsrGraph::from_csr_parts_unchecked(row_index, col_index))
}

/// Permutes vertices by degree, ties broken by original id.
pub fn reorder_by_degree(graph: &CsrGraph, order: DegreeOrder) -> AlgoResult<CsrGraph> {
    let n = graph.num_vertices();
    let mut by_degree: Vec<VertexId> = try_with_capacity(n, "degree order")?;
    by_degree.extend(0..n);
    match order {
        DegreeOrder::Ascending => by_degree.sort_by_key(|&v| (graph.degree(v), v)),
        DegreeOrder::Descending => {
            by_degree.sort_by_key(|&v| (std::cmp::Reverse(graph.degree(v)), v))
        }
    }

    let mut new_id = try_filled(n, 0, "degree permutation")?;
    for (rank, &v) in by_degree.iter().enumerate() {
        new_id[v] = rank;
    }
    relabel(graph, &new_id)
}

/// Permutes vertices into BFS discovery order.
pub fn reorder_by_bfs(graph: &CsrGraph) -> AlgoResult<CsrGraph> {
    let levels = assign_levels(graph)?;
    let mut new_id = try_filled(graph.num_vertices(), 0, "bfs permutation")?;
    for (rank, &v) in levels.order.iter().enumerate() {
        new_id[v] = rank;
    }
    relabel(graph, &new_id)
}

/// Applies `orientation`, borrowing the input when no relabelling is needed.
pub fn orient<'g>(
    graph: &'g CsrGraph,
    orientation: Orientation,
    degree_order: DegreeOrder,
) -> AlgoResult<Cow<'g, CsrGraph>> {
    match orientation {
        Orientation::Id => Ok(Cow::Borrowed(graph)),
        Orientation::Degree => {
            debug!(?degree_order, n = graph.num_vertices(), "reordering vertices by degree");
            Ok(Cow::Owned(reorder_by_degree(graph, degree_order)?))
        }
        Orientation::BfsLevel => {
            debug!(n = graph.num_vertices(), "reordering vertices by bfs level");
            Ok(Cow::Owned(reorder_by_bfs(graph)?))
        }
    }
}

//! Shared graph model for the counting algorithms
//!
//! Provides the read-only Compressed Sparse Row (CSR) adjacency every algorithm
//! runs over, the error types, and fallible scratch allocation.

use thiserror::Error;

/// Vertex identifier (dense index 0..n)
pub type VertexId = usize;

/// Errors raised by a counting call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgoError {
    #[error("allocation of {len} entries for {what} failed")]
    AllocationFailure { what: &'static str, len: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to build worker pool: {0}")]
    ThreadPool(String),
}

pub type AlgoResult<T> = Result<T, AlgoError>;

/// Errors found while building or validating a CSR graph
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("row index must have n + 1 entries, got {0}")]
    MissingRowIndex(usize),

    #[error("row index is not monotone at vertex {0}")]
    NonMonotoneRowIndex(VertexId),

    #[error("row index ends at {end} but column index has {len} entries")]
    RowIndexMismatch { end: usize, len: usize },

    #[error("column index has odd length {0}; an undirected graph stores every edge twice")]
    OddHalfEdgeCount(usize),

    #[error("vertex {vertex} has neighbor {neighbor} out of range for n={n}")]
    VertexOutOfRange { vertex: VertexId, neighbor: VertexId, n: usize },

    #[error("self-loop at vertex {0}")]
    SelfLoop(VertexId),

    #[error("neighbors of vertex {0} are not strictly ascending")]
    UnsortedNeighbors(VertexId),

    #[error("edge {0} -> {1} has no reverse edge")]
    AsymmetricEdge(VertexId, VertexId),

    #[error(transparent)]
    Allocation(#[from] AlgoError),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Allocates a vector of `len` copies of `value`, reporting allocation failure
/// instead of aborting.
pub(crate) fn try_filled<T: Clone>(len: usize, value: T, what: &'static str) -> AlgoResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| AlgoError::AllocationFailure { what, len })?;
    v.resize(len, value);
    Ok(v)
}

/// Allocates an empty vector with room for `len` entries.
pub(crate) fn try_with_capacity<T>(len: usize, what: &'static str) -> AlgoResult<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| AlgoError::AllocationFailure { what, len })?;
    Ok(v)
}

/// A simple undirected graph in Compressed Sparse Row format.
///
/// Every undirected edge `{v, w}` is stored twice, once in each endpoint's
/// row. Rows are sorted ascending, duplicate-free and contain no self-loops.
/// The counting algorithms rely on these invariants but never check them;
/// use [`CsrGraph::validate`] or the checked constructors upstream.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsrGraph {
    /// Offsets into `col_index`. Size = num_vertices + 1
    row_index: Vec<usize>,
    /// Concatenated neighbor rows. Size = 2 * num_edges
    col_index: Vec<VertexId>,
}

impl CsrGraph {
    /// Graph with `n` isolated vertices.
    pub fn empty(n: usize) -> Self {
        Self {
            row_index: vec![0; n + 1],
            col_index: Vec::new(),
        }
    }

    /// Builds a graph from undirected edges.
    ///
    /// Edges are symmetrised, self-loops dropped and duplicates merged, so the
    /// result always satisfies the CSR invariants.
    pub fn from_edges(n: usize, edges: &[(VertexId, VertexId)]) -> GraphResult<Self> {
        let rows = n
            .checked_add(1)
            .ok_or(AlgoError::AllocationFailure { what: "row index", len: n })?;
        let mut degree = try_filled(n, 0usize, "degree array")?;
        for &(u, v) in edges {
            if u >= n || v >= n {
                return Err(GraphError::VertexOutOfRange { vertex: u, neighbor: v, n });
            }
            if u != v {
                degree[u] += 1;
                degree[v] += 1;
            }
        }

        let mut row_index = try_with_capacity(rows, "row index")?;
        row_index.push(0);
        for d in &degree {
            row_index.push(row_index[row_index.len() - 1] + d);
        }
        drop(degree);

        let mut fill = row_index[..n].to_vec();
        let mut col_index = try_filled(row_index[n], 0, "column index")?;
        for &(u, v) in edges {
            if u == v {
                continue;
            }
            col_index[fill[u]] = v;
            fill[u] += 1;
            col_index[fill[v]] = u;
            fill[v] += 1;
        }

        // Sort and dedup each row, then compact.
        let mut compact = try_with_capacity(col_index.len(), "column index")?;
        let mut compact_rows = try_with_capacity(rows, "row index")?;
        compact_rows.push(0);
        for v in 0..n {
            let row = &mut col_index[row_index[v]..row_index[v + 1]];
            row.sort_unstable();
            let mut last = None;
            for &w in row.iter() {
                if last != Some(w) {
                    compact.push(w);
                    last = Some(w);
                }
            }
            compact_rows.push(compact.len());
        }

        Ok(Self {
            row_index: compact_rows,
            col_index: compact,
        })
    }

    /// Builds a graph directly from CSR parts, checking every invariant.
    pub fn from_csr_parts(row_index: Vec<usize>, col_index: Vec<VertexId>) -> GraphResult<Self> {
        let graph = Self::from_csr_parts_unchecked(row_index, col_index);
        graph.validate()?;
        Ok(graph)
    }

    /// Builds a graph from CSR parts without validation.
    ///
    /// The caller guarantees the invariants; violating them gives wrong counts
    /// or panics, never memory unsafety.
    pub fn from_csr_parts_unchecked(row_index: Vec<usize>, col_index: Vec<VertexId>) -> Self {
        Self { row_index, col_index }
    }

    /// Checks the CSR invariants, reporting the first violation.
    pub fn validate(&self) -> GraphResult<()> {
        if self.row_index.is_empty() {
            return Err(GraphError::MissingRowIndex(0));
        }
        let n = self.num_vertices();
        if self.row_index[0] != 0 {
            return Err(GraphError::NonMonotoneRowIndex(0));
        }
        for v in 0..n {
            if self.row_index[v] > self.row_index[v + 1] {
                return Err(GraphError::NonMonotoneRowIndex(v));
            }
        }
        let end = self.row_index[n];
        if end != self.col_index.len() {
            return Err(GraphError::RowIndexMismatch { end, len: self.col_index.len() });
        }
        if end % 2 != 0 {
            return Err(GraphError::OddHalfEdgeCount(end));
        }
        for v in 0..n {
            let row = self.neighbors(v);
            for (i, &w) in row.iter().enumerate() {
                if w >= n {
                    return Err(GraphError::VertexOutOfRange { vertex: v, neighbor: w, n });
                }
                if w == v {
                    return Err(GraphError::SelfLoop(v));
                }
                if i > 0 && row[i - 1] >= w {
                    return Err(GraphError::UnsortedNeighbors(v));
                }
            }
        }
        for v in 0..n {
            for &w in self.neighbors(v) {
                if !self.has_edge(w, v) {
                    return Err(GraphError::AsymmetricEdge(v, w));
                }
            }
        }
        Ok(())
    }

    /// Number of vertices (n)
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.row_index.len().saturating_sub(1)
    }

    /// Number of undirected edges (m)
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.col_index.len() / 2
    }

    /// Row offsets, length n + 1
    #[inline]
    pub fn row_index(&self) -> &[usize] {
        &self.row_index
    }

    /// Concatenated neighbor rows, length 2m
    #[inline]
    pub fn col_index(&self) -> &[VertexId] {
        &self.col_index
    }

    /// Half-edge range of `v` inside `col_index`
    #[inline]
    pub fn row_range(&self, v: VertexId) -> std::ops::Range<usize> {
        self.row_index[v]..self.row_index[v + 1]
    }

    /// Sorted neighbors of `v`
    #[inline]
    pub fn neighbors(&self, v: VertexId) -> &[VertexId] {
        &self.col_index[self.row_index[v]..self.row_index[v + 1]]
    }

    /// Degree of `v`
    #[inline]
    pub fn degree(&self, v: VertexId) -> usize {
        self.row_index[v + 1] - self.row_index[v]
    }

    /// Largest degree in the graph, 0 when empty
    pub fn max_degree(&self) -> usize {
        (0..self.num_vertices()).map(|v| self.degree(v)).max().unwrap_or(0)
    }

    /// Checks adjacency by binary search in the row of `v`.
    #[inline]
    pub fn has_edge(&self, v: VertexId, w: VertexId) -> bool {
        self.neighbors(v).binary_search(&w).is_ok()
    }

    /// Iterates every undirected edge once as `(v, w)` with `v < w`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        (0..self.num_vertices()).flat_map(move |v| {
            self.neighbors(v)
                .iter()
                .filter(move |&&w| v < w)
                .map(move |&w| (v, w))
        })
    }
}

/// A subgraph with its own compact id space.
///
/// `original_ids[i]` is the parent-graph id of subgraph vertex `i`. The
/// mapping is monotone, so rows stay sorted after remapping.
#[derive(Debug, Clone)]
pub struct InducedSubgraph {
    pub graph: CsrGraph,
    pub original_ids: Vec<VertexId>,
}

impl InducedSubgraph {
    /// Keeps the half-edges selected by `keep` (indexed like `col_index`) and
    /// the vertices touching at least one of them.
    ///
    /// `keep` must be symmetric: a half-edge is kept iff its reverse is.
    pub fn from_half_edges(parent: &CsrGraph, keep: &[bool]) -> AlgoResult<Self> {
        let n = parent.num_vertices();
        let mut new_id = try_filled(n, usize::MAX, "subgraph id map")?;
        let mut original_ids = Vec::new();
        let mut kept_edges = 0usize;
        for v in 0..n {
            let touched = parent.row_range(v).filter(|&i| keep[i]).count();
            if touched > 0 {
                new_id[v] = original_ids.len();
                original_ids.push(v);
                kept_edges += touched;
            }
        }

        let mut row_index = try_with_capacity(original_ids.len() + 1, "subgraph row index")?;
        let mut col_index = try_with_capacity(kept_edges, "subgraph column index")?;
        row_index.push(0);
        for &v in &original_ids {
            for i in parent.row_range(v) {
                if keep[i] {
                    col_index.push(new_id[parent.col_index()[i]]);
                }
            }
            row_index.push(col_index.len());
        }

        Ok(Self {
            graph: CsrGraph::from_csr_parts_unchecked(row_index, col_index),
            original_ids,
        })
    }
}

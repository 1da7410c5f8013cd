//! Graph file loaders
//!
//! Two text formats are understood:
//!
//! - **Edge list**: one `u v` pair per line, 0-based ids, extra columns
//!   ignored, lines starting with `#` or `%` skipped. The vertex count is one
//!   more than the largest id seen.
//! - **Matrix Market** coordinate files: `%%MatrixMarket matrix coordinate
//!   <field> <symmetry>` banner, `%` comments, a `rows cols nnz` size line
//!   and 1-based `i j [value...]` entries. Values are ignored; `general`
//!   matrices are symmetrised.
//!
//! Either way the result is a valid simple graph: self-loops and duplicate
//! edges are dropped.

use crate::error::{TriResult, TriangleError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};
use tricount_algorithms::{CsrGraph, GraphError, VertexId};

/// On-disk graph format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GraphFormat {
    /// Chosen from the extension: `.mtx` is Matrix Market, anything else an edge list
    #[default]
    Auto,
    EdgeList,
    MatrixMarket,
}

impl GraphFormat {
    fn resolve(self, path: &Path) -> GraphFormat {
        match self {
            GraphFormat::Auto => match path.extension().and_then(|e| e.to_str()) {
                Some("mtx") => GraphFormat::MatrixMarket,
                _ => GraphFormat::EdgeList,
            },
            other => other,
        }
    }
}

impl std::str::FromStr for GraphFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(GraphFormat::Auto),
            "edge-list" | "edges" => Ok(GraphFormat::EdgeList),
            "matrix-market" | "mtx" => Ok(GraphFormat::MatrixMarket),
            other => Err(format!("unknown graph format '{other}'")),
        }
    }
}

/// Loads the graph stored at `path`.
pub fn load_graph(path: impl AsRef<Path>, format: GraphFormat) -> TriResult<CsrGraph> {
    let path = path.as_ref();
    let format = format.resolve(path);
    debug!(path = %path.display(), ?format, "loading graph");
    let reader = BufReader::new(File::open(path)?);
    let graph = match format {
        GraphFormat::MatrixMarket => read_matrix_market(reader)?,
        _ => read_edge_list(reader)?,
    };
    info!(
        path = %path.display(),
        vertices = graph.num_vertices(),
        edges = graph.num_edges(),
        "loaded graph"
    );
    Ok(graph)
}

fn parse_id(token: Option<&str>, line: usize, what: &str) -> TriResult<usize> {
    let token = token.ok_or_else(|| TriangleError::parse(line, format!("missing {what}")))?;
    token
        .parse::<usize>()
        .map_err(|e| TriangleError::parse(line, format!("invalid {what} '{token}': {e}")))
}

/// Builds the CSR graph, blaming `line` (where the vertex count was set) when
/// the arrays cannot be allocated.
fn build_graph(n: usize, edges: &[(VertexId, VertexId)], line: usize) -> TriResult<CsrGraph> {
    CsrGraph::from_edges(n, edges).map_err(|e| match e {
        GraphError::Allocation(alloc) => TriangleError::parse(line, format!("{n} vertices: {alloc}")),
        other => other.into(),
    })
}

/// Reads a whitespace-separated edge list.
pub fn read_edge_list<R: BufRead>(reader: R) -> TriResult<CsrGraph> {
    let mut edges: Vec<(VertexId, VertexId)> = Vec::new();
    let mut n = 0usize;
    let mut n_line = 0usize;

    for (i, line) in reader.lines().enumerate() {
        let line_no = i + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();
        let u = parse_id(tokens.next(), line_no, "source vertex")?;
        let v = parse_id(tokens.next(), line_no, "target vertex")?;
        let needed = u
            .max(v)
            .checked_add(1)
            .ok_or_else(|| TriangleError::parse(line_no, format!("vertex id {} too large", u.max(v))))?;
        if needed > n {
            n = needed;
            n_line = line_no;
        }
        edges.push((u, v));
    }

    build_graph(n, &edges, n_line)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Symmetry {
    General,
    Symmetric,
}

fn parse_banner(line: &str, line_no: usize) -> TriResult<Symmetry> {
    let lower = line.to_ascii_lowercase();
    let fields: Vec<&str> = lower.split_whitespace().collect();
    if fields.len() < 5 || fields[0] != "%%matrixmarket" || fields[1] != "matrix" {
        return Err(TriangleError::parse(line_no, "expected '%%MatrixMarket matrix ...' banner"));
    }
    if fields[2] != "coordinate" {
        return Err(TriangleError::parse(line_no, format!("unsupported storage '{}'", fields[2])));
    }
    match fields[4] {
        "general" => Ok(Symmetry::General),
        // Skew matrices have a zero diagonal and a mirrored pattern
        "symmetric" | "skew-symmetric" | "hermitian" => Ok(Symmetry::Symmetric),
        other => Err(TriangleError::parse(line_no, format!("unsupported symmetry '{other}'"))),
    }
}

/// Reads a Matrix Market coordinate file as an undirected pattern.
pub fn read_matrix_market<R: BufRead>(reader: R) -> TriResult<CsrGraph> {
    let mut lines = reader.lines().enumerate();

    let symmetry = match lines.next() {
        Some((i, line)) => parse_banner(&line?, i + 1)?,
        None => return Err(TriangleError::parse(1, "empty file")),
    };

    let mut size: Option<(usize, usize, usize)> = None;
    let mut size_line = 1usize;
    let mut edges: Vec<(VertexId, VertexId)> = Vec::new();

    for (i, line) in lines {
        let line_no = i + 1;
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('%') {
            continue;
        }
        let mut tokens = trimmed.split_whitespace();

        let Some((rows, cols, nnz)) = size else {
            let rows = parse_id(tokens.next(), line_no, "row count")?;
            let cols = parse_id(tokens.next(), line_no, "column count")?;
            let nnz = parse_id(tokens.next(), line_no, "entry count")?;
            if rows != cols {
                return Err(TriangleError::parse(line_no, format!("matrix is {rows}x{cols}, expected square")));
            }
            edges
                .try_reserve(nnz)
                .map_err(|e| TriangleError::parse(line_no, format!("cannot hold {nnz} entries: {e}")))?;
            size = Some((rows, cols, nnz));
            size_line = line_no;
            continue;
        };

        let r = parse_id(tokens.next(), line_no, "row index")?;
        let c = parse_id(tokens.next(), line_no, "column index")?;
        if r == 0 || c == 0 || r > rows || c > cols {
            return Err(TriangleError::parse(
                line_no,
                format!("entry ({r}, {c}) outside 1..={rows}"),
            ));
        }
        if edges.len() == nnz {
            return Err(TriangleError::parse(line_no, format!("more than {nnz} entries")));
        }
        edges.push((r - 1, c - 1));
    }

    let Some((n, _, nnz)) = size else {
        return Err(TriangleError::parse(1, "missing size line"));
    };
    if edges.len() != nnz {
        return Err(TriangleError::parse(
            1,
            format!("size line announces {nnz} entries, found {}", edges.len()),
        ));
    }
    debug!(?symmetry, n, nnz, "parsed matrix market entries");
    // Both cases collapse to the same undirected pattern
    build_graph(n, &edges, size_line)
}

//! Tricount
//!
//! Triangle counting on simple undirected graphs stored in CSR form.
//!
//! The counting core lives in `tricount-algorithms`. This crate adds what a
//! caller needs around it:
//!
//! - graph loaders for edge lists and Matrix Market files
//! - synthetic generators with known triangle counts
//! - `CountConfig` loading from JSON or YAML
//! - [`TriangleCounter`], which runs and times an algorithm and logs the result
//!
//! ## Example Usage
//!
//! ```rust
//! use tricount::{generate, Algorithm, CountConfig, TriangleCounter};
//!
//! let graph = generate::complete(5).unwrap();
//! let counter = TriangleCounter::new(CountConfig::default());
//! let report = counter.count(&graph, Algorithm::BaderHybrid).unwrap();
//! assert_eq!(report.triangles, 10);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod engine;
pub mod error;
pub mod generate;
pub mod loader;

pub use config::load_config;
pub use engine::{CountReport, TriangleCounter, REFERENCE_VERTEX_LIMIT};
pub use error::{TriResult, TriangleError};
pub use generate::GraphSpec;
pub use loader::{load_graph, read_edge_list, read_matrix_market, GraphFormat};

// Re-export the core types for convenience
pub use tricount_algorithms::{
    count_triangles, Algorithm, CountConfig, CsrGraph, DegreeOrder, IntersectionStrategy, Orientation,
    SameLevelRule, VertexId,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), "0.3.0");
    }
}

//! Error type of the integration layer

use std::path::PathBuf;
use thiserror::Error;
use tricount_algorithms::{AlgoError, GraphError};

/// Errors raised while loading, configuring or counting
#[derive(Error, Debug)]
pub enum TriangleError {
    /// Counting failed
    #[error("Algorithm error: {0}")]
    Algorithm(#[from] AlgoError),

    /// Graph violates the CSR invariants
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed graph file
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Config file could not be read or deserialised
    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Generator spec not understood
    #[error("Invalid generator spec '{0}'")]
    GeneratorSpec(String),

    /// Algorithms disagreed on the same graph
    #[error("Count mismatch: {algorithm} returned {got}, expected {expected}")]
    Mismatch { algorithm: String, got: u64, expected: u64 },
}

impl TriangleError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        TriangleError::Parse { line, message: message.into() }
    }
}

pub type TriResult<T> = Result<T, TriangleError>;

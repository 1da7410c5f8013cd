//! Counting engine: configured algorithm runs with timing and logging

use crate::error::{TriResult, TriangleError};
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};
use tracing::{info, warn};
use tricount_algorithms::{count_triangles, Algorithm, CountConfig, CsrGraph};

/// Above this many vertices the reference-only baselines are skipped by `run_all`
pub const REFERENCE_VERTEX_LIMIT: usize = 2_000;

/// Outcome of one counting run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountReport {
    pub algorithm: Algorithm,
    pub triangles: u64,
    #[serde(rename = "elapsed_ms", serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64() * 1e3)
}

/// Runs counting algorithms under one configuration
#[derive(Debug, Clone, Default)]
pub struct TriangleCounter {
    config: CountConfig,
}

impl TriangleCounter {
    pub fn new(config: CountConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CountConfig {
        &self.config
    }

    /// Counts the triangles of `graph` with `algorithm`.
    pub fn count(&self, graph: &CsrGraph, algorithm: Algorithm) -> TriResult<CountReport> {
        if algorithm.is_reference_only() && graph.num_vertices() > REFERENCE_VERTEX_LIMIT {
            warn!(
                %algorithm,
                n = graph.num_vertices(),
                "reference algorithm on a large graph, expect a long run"
            );
        }

        let start = Instant::now();
        let triangles = count_triangles(graph, algorithm, &self.config)?;
        let elapsed = start.elapsed();

        info!(
            %algorithm,
            triangles,
            elapsed_ms = elapsed.as_secs_f64() * 1e3,
            "count complete"
        );
        Ok(CountReport { algorithm, triangles, elapsed })
    }

    /// Runs every algorithm and checks that they agree.
    ///
    /// Reference-only baselines are skipped on graphs above
    /// [`REFERENCE_VERTEX_LIMIT`] vertices. The first report is the yardstick;
    /// any other count differing from it yields [`TriangleError::Mismatch`].
    pub fn run_all(&self, graph: &CsrGraph) -> TriResult<Vec<CountReport>> {
        let large = graph.num_vertices() > REFERENCE_VERTEX_LIMIT;
        let mut reports = Vec::with_capacity(Algorithm::ALL.len());
        for algorithm in Algorithm::ALL {
            if large && algorithm.is_reference_only() {
                info!(%algorithm, "skipping reference algorithm on large graph");
                continue;
            }
            reports.push(self.count(graph, algorithm)?);
        }

        if let Some(first) = reports.first() {
            let expected = first.triangles;
            if let Some(bad) = reports.iter().find(|r| r.triangles != expected) {
                return Err(TriangleError::Mismatch {
                    algorithm: bad.algorithm.to_string(),
                    got: bad.triangles,
                    expected,
                });
            }
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::{complete, friendship};

    #[test]
    fn test_count_reports_algorithm_and_total() {
        let counter = TriangleCounter::default();
        let report = counter.count(&complete(6).unwrap(), Algorithm::BaderRecursive).unwrap();
        assert_eq!(report.triangles, 20);
        assert_eq!(report.algorithm, Algorithm::BaderRecursive);
    }

    #[test]
    fn test_run_all_agrees() {
        let counter = TriangleCounter::new(CountConfig {
            small_graph_threshold: 0,
            ..Default::default()
        });
        let reports = counter.run_all(&friendship(12).unwrap()).unwrap();
        assert_eq!(reports.len(), Algorithm::ALL.len());
        assert!(reports.iter().all(|r| r.triangles == 12));
    }

    #[test]
    fn test_report_serialises_millis() {
        let report = CountReport {
            algorithm: Algorithm::Forward,
            triangles: 3,
            elapsed: Duration::from_micros(1500),
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["algorithm"], "forward");
        assert_eq!(json["triangles"], 3);
        let millis = json["elapsed_ms"].as_f64().unwrap();
        assert!((millis - 1.5).abs() < 1e-9, "{millis}");
    }
}

//! Config file loading
//!
//! A `CountConfig` can be stored as JSON or YAML; the format is picked from
//! the file extension. Missing fields take their default values.

use crate::error::{TriResult, TriangleError};
use std::path::Path;
use tracing::debug;
use tricount_algorithms::CountConfig;

/// Reads and validates a `CountConfig` from `path`.
pub fn load_config(path: impl AsRef<Path>) -> TriResult<CountConfig> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)?;
    let config = parse_config(path, &text)?;
    config.validate()?;
    debug!(path = %path.display(), ?config, "loaded count config");
    Ok(config)
}

fn parse_config(path: &Path, text: &str) -> TriResult<CountConfig> {
    let config_error = |message: String| TriangleError::Config { path: path.to_path_buf(), message };
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => serde_json::from_str(text).map_err(|e| config_error(e.to_string())),
        Some("yaml") | Some("yml") => serde_yaml::from_str(text).map_err(|e| config_error(e.to_string())),
        other => Err(config_error(format!(
            "unsupported config extension {:?}, expected .json, .yaml or .yml",
            other.unwrap_or("")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tricount_algorithms::{IntersectionStrategy, Orientation, SameLevelRule};

    fn write_temp(suffix: &str, body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json_config() {
        let file = write_temp(
            ".json",
            r#"{"intersection": "merge", "orientation": "bfs-level", "small_graph_threshold": 5}"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.intersection, IntersectionStrategy::Merge);
        assert_eq!(config.orientation, Orientation::BfsLevel);
        assert_eq!(config.small_graph_threshold, 5);
        // Untouched fields keep their defaults
        assert_eq!(config.hybrid_threshold, 32);
    }

    #[test]
    fn test_load_yaml_config() {
        let file = write_temp(
            ".yaml",
            "same_level_rule: divide-by-three\nrecursive_fanout_threshold: 0.5\nthreads: 2\n",
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.same_level_rule, SameLevelRule::DivideByThree);
        assert_eq!(config.recursive_fanout_threshold, 0.5);
        assert_eq!(config.threads, Some(2));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let file = write_temp(".json", r#"{"recursive_fanout_threshold": 2.0}"#);
        assert!(matches!(load_config(file.path()), Err(TriangleError::Algorithm(_))));

        let file = write_temp(".toml", "threads = 2");
        assert!(matches!(load_config(file.path()), Err(TriangleError::Config { .. })));

        let file = write_temp(".json", r#"{"intersection": "bogus"}"#);
        assert!(matches!(load_config(file.path()), Err(TriangleError::Config { .. })));
    }
}

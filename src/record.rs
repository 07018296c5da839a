use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// A single benchmark execution as reported by google-benchmark's JSON output
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunRecord {
    /// Run name, e.g. `LeastPopular<queries::Sorted>/Span:2/manual_time`
    #[serde(rename = "name")]
    pub raw_name: String,
    /// Number of transactions the query ran over (x-axis)
    pub sample_size: f64,
    /// Items processed per second (y-axis)
    #[serde(rename = "items_per_second")]
    pub throughput: f64,
    /// Time taken by one iteration, in `time_unit`
    #[serde(rename = "real_time")]
    pub elapsed: f64,
    pub time_unit: String,
}

/// Parsed results document: the run context plus every run record
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResultsFile {
    #[serde(default)]
    pub context: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    pub benchmarks: Vec<RunRecord>,
}

impl ResultsFile {
    /// Load a results file from disk.
    ///
    /// Fails with [`Error::InputNotFound`] when `path` is not a regular file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let results: ResultsFile = serde_json::from_str(&json)?;

        tracing::debug!(
            path = %path.display(),
            records = results.benchmarks.len(),
            "loaded benchmark results"
        );
        Ok(results)
    }

    /// Number of threads the benchmarks ran with, if the context records it
    pub fn num_cpus(&self) -> Option<u64> {
        self.context.get("num_cpus").and_then(|v| v.as_u64())
    }
}

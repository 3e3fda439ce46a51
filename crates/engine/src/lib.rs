// crates/engine/src/lib.rs
//! Per-key min/mean/max aggregation over `key;value` files.
//!
//! The input is read in line-aligned chunks, each chunk is aggregated by one
//! worker of a fixed pool, and a single merger folds the per-chunk tables
//! into the final result. Values are kept in exact tenths throughout.

pub mod config;
pub mod error;
pub mod format;
pub mod merge;
pub mod parser;
pub mod pipeline;
pub mod reader;
pub mod stats;
pub mod tokenizer;
pub mod worker;

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::merge::RunResult;
use std::fs::File;
use std::time::{Duration, Instant};

pub use crate::format::{Summary, render};
pub use crate::stats::{KeyStats, StatsTable};

/// Aggregate the file named by `config.path`.
///
/// # Errors
///
/// Returns `EngineError::Open` if the file cannot be opened, and any error of
/// [`pipeline::aggregate`] otherwise.
pub fn run(config: &Config) -> Result<RunResult> {
    let started = Instant::now();
    let file = File::open(&config.path).map_err(|source| EngineError::Open {
        path: config.path.clone(),
        source,
    })?;

    log::info!(
        "aggregating {} with {} workers and {} byte chunks",
        config.path.display(),
        config.workers,
        config.chunk_size
    );

    let result = pipeline::aggregate(file, config)?;
    log_report(&result, started.elapsed());
    Ok(result)
}

fn log_report(result: &RunResult, elapsed: Duration) {
    let metrics = &result.metrics;
    log::info!("keys: {}", result.table.len());
    log::info!(
        "chunks: {} ({} bytes, {} lines)",
        metrics.chunks,
        metrics.bytes,
        metrics.lines
    );
    log::info!("worker time: {:?}", metrics.busy);
    if let Some(mean) = metrics.mean_chunk_time() {
        log::info!("mean time per chunk: {mean:?}");
    }
    log::info!("elapsed: {:.2}s", elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigBuilder;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn run_reads_a_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Paris;12.3\nParis;15.0\nLondon;-2.5\n").unwrap();

        let config = ConfigBuilder::default()
            .path(file.path())
            .chunk_size(16usize)
            .workers(2usize)
            .build()
            .unwrap();
        let result = run(&config).unwrap();

        assert_eq!(
            render(&result.table),
            "{London=-2.5/-2.5/-2.5, Paris=12.3/13.7/15.0}"
        );
    }

    #[test]
    fn run_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigBuilder::default()
            .path(dir.path().join("missing.txt"))
            .build()
            .unwrap();

        let err = run(&config).unwrap_err();
        assert!(matches!(err, EngineError::Open { .. }));
        assert!(err.to_string().contains("missing.txt"));
    }
}

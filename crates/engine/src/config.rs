// crates/engine/src/config.rs
use crate::error::{EngineError, Result};
use derive_builder::Builder;
use std::path::PathBuf;

/// Input file used when no path is given.
pub const DEFAULT_INPUT: &str = "measurements.txt";

/// Size of the reusable read buffer, and therefore the upper bound of a chunk.
pub const DEFAULT_CHUNK_SIZE: usize = 50 * 1024 * 1024;

/// One worker per core, leaving one core for the reader and the merger.
#[must_use]
pub fn default_workers() -> usize {
    num_cpus::get().saturating_sub(1).max(1)
}

#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct Config {
    #[builder(default = "PathBuf::from(DEFAULT_INPUT)")]
    pub path: PathBuf,
    #[builder(default = "DEFAULT_CHUNK_SIZE")]
    pub chunk_size: usize,
    #[builder(default = "default_workers()")]
    pub workers: usize,
    /// Capacity of both hand-off queues. `0` makes them rendezvous channels.
    #[builder(default)]
    pub queue_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_INPUT),
            chunk_size: DEFAULT_CHUNK_SIZE,
            workers: default_workers(),
            queue_capacity: 0,
        }
    }
}

impl Config {
    /// Check the invariants the pipeline relies on.
    ///
    /// # Errors
    /// Returns `EngineError::Config` if the chunk size or worker count is zero.
    pub fn validate(&self) -> Result<()> {
        check(Some(self.chunk_size), Some(self.workers)).map_err(EngineError::Config)
    }
}

impl ConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        check(self.chunk_size, self.workers)
    }
}

fn check(chunk_size: Option<usize>, workers: Option<usize>) -> std::result::Result<(), String> {
    if chunk_size == Some(0) {
        return Err("chunk size must be at least 1 byte".to_string());
    }
    if workers == Some(0) {
        return Err("worker count must be at least 1".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_match_default() {
        let built = ConfigBuilder::default().build().unwrap();
        let default = Config::default();

        assert_eq!(built.path, default.path);
        assert_eq!(built.chunk_size, DEFAULT_CHUNK_SIZE);
        assert_eq!(built.workers, default.workers);
        assert_eq!(built.queue_capacity, 0);
        assert!(built.workers >= 1);
    }

    #[test]
    fn builder_rejects_zero_chunk_size() {
        let err = ConfigBuilder::default().chunk_size(0usize).build().unwrap_err();
        assert!(err.to_string().contains("chunk size"));
    }

    #[test]
    fn builder_rejects_zero_workers() {
        let err = ConfigBuilder::default().workers(0usize).build().unwrap_err();
        assert!(err.to_string().contains("worker count"));
    }

    #[test]
    fn validate_catches_hand_built_config() {
        let config = Config {
            workers: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::Config(_))));
    }
}

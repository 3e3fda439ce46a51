// crates/engine/src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to open input '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read input at byte {offset}: {source}")]
    Read {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to reposition input at byte {offset}: {source}")]
    Seek {
        offset: u64,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "Line starting at byte {offset} is longer than the read buffer ({buffer_size} bytes); raise --chunk-size"
    )]
    LineTooLong { offset: u64, buffer_size: usize },

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Pipeline thread '{0}' panicked")]
    ThreadPanicked(&'static str),
}

pub type Result<T> = std::result::Result<T, EngineError>;

// crates/cli/src/config.rs
use crate::args::Args;
use crate::error::{AppError, Result};
pub use city_stats_engine::config::{Config, ConfigBuilder};
use city_stats_engine::config::default_workers;
use log::LevelFilter;

impl TryFrom<&Args> for Config {
    type Error = AppError;

    fn try_from(args: &Args) -> Result<Self> {
        let chunk_size = usize::try_from(args.read.chunk_size.0).map_err(|_| {
            AppError::Config(format!(
                "chunk size {} does not fit in memory on this platform",
                args.read.chunk_size.0
            ))
        })?;

        ConfigBuilder::default()
            .path(args.path.clone())
            .chunk_size(chunk_size)
            .workers(args.read.workers.unwrap_or_else(default_workers))
            .queue_capacity(args.read.queue_capacity)
            .build()
            .map_err(|e| AppError::Config(e.to_string()))
    }
}

/// Log level selected by `-q` / `-v`; `RUST_LOG` still wins when set.
#[must_use]
pub fn log_level(args: &Args) -> LevelFilter {
    if args.output.quiet {
        return LevelFilter::Error;
    }
    match args.output.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

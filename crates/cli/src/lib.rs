// crates/cli/src/lib.rs
pub mod args;
pub mod config;
pub mod error;
pub mod options;
pub mod parsers;
pub mod presentation;

use crate::args::Args;
use crate::config::Config;
use crate::error::Result;

/// Aggregate the file named on the command line and print the result to stdout.
///
/// Nothing is printed unless the whole input was processed.
///
/// # Errors
/// Returns an error for an invalid configuration, an unreadable input, or a
/// failed write to stdout.
pub fn run(args: &Args) -> Result<()> {
    let config = Config::try_from(args)?;
    let result = city_stats_engine::run(&config)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    presentation::write_results(&mut out, &result.table, args.output.format)
}

/// Route `log` output to stderr at the level chosen on the command line.
pub fn init_logging(args: &Args) {
    let level = config::log_level(args).to_string().to_lowercase();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

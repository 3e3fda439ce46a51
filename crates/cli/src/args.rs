// crates/cli/src/args.rs
use crate::options::OutputFormat;
use crate::parsers::{self, SizeArg};
use city_stats_engine::config::DEFAULT_INPUT;
use clap::{Args as ClapArgs, Parser, ValueHint};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "city_stats",
    version,
    about = "Per-city min/mean/max over a `city;value` measurements file"
)]
pub struct Args {
    /// Measurements file, one `city;value` record per line
    #[arg(value_hint = ValueHint::FilePath, default_value = DEFAULT_INPUT)]
    pub path: PathBuf,

    #[command(flatten)]
    pub read: ReadOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

#[derive(ClapArgs, Debug)]
pub struct ReadOptions {
    /// Read buffer size; bounds chunk and line length (e.g. 512K, 50MiB)
    #[arg(long, default_value = "50MiB", help_heading = "Reading")]
    pub chunk_size: SizeArg,

    /// Number of aggregation workers [default: CPUs - 1]
    #[arg(
        short = 'j',
        long,
        value_parser = parsers::parse_positive_usize,
        help_heading = "Reading"
    )]
    pub workers: Option<usize>,

    /// Capacity of the hand-off queues (0 = rendezvous)
    #[arg(long, default_value_t = 0, help_heading = "Reading")]
    pub queue_capacity: usize,
}

#[derive(ClapArgs, Debug)]
pub struct OutputOptions {
    /// Output format
    #[arg(long, value_enum, default_value = "text", help_heading = "Output")]
    pub format: OutputFormat,

    /// Log progress to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, help_heading = "Output")]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose", help_heading = "Output")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_is_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["city_stats"]).unwrap();
        assert_eq!(args.path, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(args.read.chunk_size, SizeArg(50 * 1024 * 1024));
        assert_eq!(args.read.workers, None);
        assert_eq!(args.read.queue_capacity, 0);
        assert_eq!(args.output.format, OutputFormat::Text);
        assert_eq!(args.output.verbose, 0);
    }

    #[test]
    fn parses_all_options() {
        let args = Args::try_parse_from([
            "city_stats",
            "data.txt",
            "--chunk-size",
            "4M",
            "-j",
            "3",
            "--queue-capacity",
            "2",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(args.path, PathBuf::from("data.txt"));
        assert_eq!(args.read.chunk_size, SizeArg(4 * 1024 * 1024));
        assert_eq!(args.read.workers, Some(3));
        assert_eq!(args.read.queue_capacity, 2);
        assert_eq!(args.output.format, OutputFormat::Json);
        assert_eq!(args.output.verbose, 2);
    }

    #[test]
    fn rejects_zero_workers() {
        assert!(Args::try_parse_from(["city_stats", "-j", "0"]).is_err());
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Args::try_parse_from(["city_stats", "-q", "-v"]).is_err());
    }
}

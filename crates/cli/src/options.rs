// crates/cli/src/options.rs
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `{key=min/mean/max, ...}` on one line
    #[default]
    Text,
    /// JSON array of `{key, min, mean, max, count}` objects
    Json,
}

// crates/engine/src/format.rs
//! Rendering the global table.
//!
//! Keys are sorted by their bytes and each entry is written as
//! `key=min/mean/max` with exactly one fractional digit:
//!
//! ```text
//! {London=-2.5/-2.5/-2.5, Paris=12.3/13.7/15.0}
//! ```

use crate::stats::StatsTable;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;

/// A value in tenths, displayed with one fractional digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Tenths(pub i64);

impl Tenths {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 10.0
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}

impl Serialize for Tenths {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryRow<'a> {
    pub key: Cow<'a, str>,
    pub min: Tenths,
    pub mean: Tenths,
    pub max: Tenths,
    pub count: u64,
}

impl fmt::Display for SummaryRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}/{}/{}", self.key, self.min, self.mean, self.max)
    }
}

/// The sorted, display-ready view of a table.
///
/// Keys that are not valid UTF-8 are rendered lossily; sorting always uses
/// the raw bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Summary<'a> {
    rows: Vec<SummaryRow<'a>>,
}

impl<'a> Summary<'a> {
    #[must_use]
    pub fn from_table(table: &'a StatsTable) -> Self {
        let rows = table
            .sorted()
            .into_iter()
            .map(|(key, stats)| SummaryRow {
                key: String::from_utf8_lossy(key),
                min: Tenths(stats.min),
                mean: Tenths(stats.mean_tenths()),
                max: Tenths(stats.max),
                count: stats.count,
            })
            .collect();
        Self { rows }
    }
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{row}")?;
        }
        f.write_str("}")
    }
}

/// Render a table as `{key=min/mean/max, ...}`.
#[must_use]
pub fn render(table: &StatsTable) -> String {
    Summary::from_table(table).to_string()
}

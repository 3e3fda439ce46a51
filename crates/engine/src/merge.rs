// crates/engine/src/merge.rs
//! The single consumer of partial tables.
//!
//! The merger is the only code that ever touches the global table, so it
//! needs no lock. The fold is commutative and associative: the order in
//! which workers deliver their tables does not change the result.

use crate::stats::StatsTable;
use crate::worker::PartialTable;
use std::time::Duration;

/// Progress counters gathered while merging. Purely informational.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunMetrics {
    pub chunks: u64,
    pub bytes: u64,
    pub lines: u64,
    /// Time spent by workers tokenizing, summed over all chunks.
    pub busy: Duration,
}

impl RunMetrics {
    #[must_use]
    pub fn mean_chunk_time(&self) -> Option<Duration> {
        let chunks = u32::try_from(self.chunks).ok()?;
        self.busy.checked_div(chunks)
    }
}

/// Everything a run produces: the global table and the counters.
#[derive(Debug, Clone, Default)]
pub struct RunResult {
    pub table: StatsTable,
    pub metrics: RunMetrics,
}

#[derive(Debug, Default)]
pub struct Merger {
    table: StatsTable,
    metrics: RunMetrics,
}

impl Merger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, partial: PartialTable) {
        log::trace!(
            "merging chunk {} ({} keys) into {} keys",
            partial.chunk,
            partial.table.len(),
            self.table.len()
        );
        self.metrics.chunks += 1;
        self.metrics.bytes += partial.bytes as u64;
        self.metrics.lines += partial.lines as u64;
        self.metrics.busy += partial.elapsed;
        self.table.merge(partial.table);
    }

    /// Fold every partial table until the source is exhausted (for a
    /// channel: until every sender is gone).
    #[must_use]
    pub fn drain(mut self, partials: impl IntoIterator<Item = PartialTable>) -> RunResult {
        for partial in partials {
            self.fold(partial);
        }
        self.finish()
    }

    #[must_use]
    pub fn finish(self) -> RunResult {
        RunResult {
            table: self.table,
            metrics: self.metrics,
        }
    }
}

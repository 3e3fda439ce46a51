// crates/engine/src/worker.rs
use crate::reader::Chunk;
use crate::stats::StatsTable;
use crate::tokenizer::tokenize;
use std::time::{Duration, Instant};

/// The aggregate of one chunk, plus what it took to compute it.
#[derive(Debug, Clone)]
pub struct PartialTable {
    pub chunk: u64,
    pub bytes: usize,
    pub lines: usize,
    pub elapsed: Duration,
    pub table: StatsTable,
}

/// Tokenize and aggregate a chunk. The chunk is consumed; nothing else can
/// observe it once a worker owns it.
#[must_use]
pub fn process_chunk(chunk: Chunk) -> PartialTable {
    let started = Instant::now();
    let table = tokenize(&chunk.data);
    let elapsed = started.elapsed();

    log::debug!(
        "processed chunk {} ({} bytes, {} keys) in {elapsed:?}",
        chunk.index,
        chunk.data.len(),
        table.len()
    );

    PartialTable {
        chunk: chunk.index,
        bytes: chunk.data.len(),
        lines: chunk.line_count(),
        elapsed,
        table,
    }
}

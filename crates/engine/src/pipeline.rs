// crates/engine/src/pipeline.rs
//! Reader, worker pool and merger wired together.
//!
//! ```text
//! ChunkReader --chunks--> N workers (rayon pool) --partial tables--> Merger
//! ```
//!
//! Both queues are bounded (rendezvous by default), so the reader can only
//! run ahead of the workers by the queue capacity and memory stays within
//! O(workers x chunk size). Shutdown happens by dropping senders: the reader
//! drops the chunk sender at end of input, the pool drops the last table
//! sender once the chunk queue is drained, and the merger returns when its
//! queue is closed.

use crate::config::Config;
use crate::error::{EngineError, Result};
use crate::merge::{Merger, RunResult};
use crate::reader::{Chunk, ChunkReader};
use crate::worker::{PartialTable, process_chunk};
use crossbeam_channel::{Sender, bounded};
use rayon::prelude::*;
use std::io::{Read, Seek};
use std::thread;

/// Aggregate everything `source` contains.
///
/// # Errors
///
/// Returns the reader's error if the input cannot be read to the end, an
/// `EngineError::Config` for an invalid configuration, and
/// `EngineError::ThreadPool` if the worker pool cannot be built. Nothing is
/// returned for a partially read input.
pub fn aggregate<R>(source: R, config: &Config) -> Result<RunResult>
where
    R: Read + Seek + Send,
{
    config.validate()?;

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers)
        .thread_name(|i| format!("city-stats-worker-{i}"))
        .build()?;

    let (chunk_tx, chunk_rx) = bounded::<Chunk>(config.queue_capacity);
    let (table_tx, table_rx) = bounded::<PartialTable>(config.queue_capacity);
    let reader = ChunkReader::new(source, config.chunk_size);

    thread::scope(|scope| {
        let read = scope.spawn(move || feed(reader, &chunk_tx));
        let merge = scope.spawn(move || Merger::new().drain(table_rx));

        pool.install(|| {
            chunk_rx
                .into_iter()
                .par_bridge()
                .for_each_with(table_tx, |tables, chunk| {
                    // Only fails if the merger is gone; its join reports why.
                    let _ = tables.send(process_chunk(chunk));
                });
        });

        let result = merge
            .join()
            .map_err(|_| EngineError::ThreadPanicked("merger"))?;
        let bytes = read
            .join()
            .map_err(|_| EngineError::ThreadPanicked("reader"))??;

        log::debug!("reader finished after {bytes} bytes");
        Ok(result)
    })
}

/// Push every chunk of the input into the queue, then hang up.
fn feed<R: Read + Seek>(mut reader: ChunkReader<R>, chunks: &Sender<Chunk>) -> Result<u64> {
    while let Some(chunk) = reader.next_chunk()? {
        if chunks.send(chunk).is_err() {
            break;
        }
    }
    Ok(reader.offset())
}

// crates/engine/src/reader.rs
//! Line-aligned chunking of the input.
//!
//! The reader fills a reusable buffer, hands out a copy of everything up to
//! the last `\n`, and seeks back over the unfinished tail so it is read
//! again as the start of the next block. No record ever spans two chunks.

use crate::error::{EngineError, Result};
use memchr::memrchr;
use std::io::{ErrorKind, Read, Seek, SeekFrom};

/// An owned block of complete lines.
///
/// Every chunk ends right after a `\n`, except the last one of an input
/// whose final line is unterminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Position of the chunk in the input, starting at 0.
    pub index: u64,
    /// Byte offset of the first byte of the chunk in the input.
    pub offset: u64,
    pub data: Vec<u8>,
}

impl Chunk {
    /// Number of lines, counting an unterminated last line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        let terminated = bytecount::count(&self.data, b'\n');
        match self.data.last() {
            Some(b'\n') | None => terminated,
            Some(_) => terminated + 1,
        }
    }
}

pub struct ChunkReader<R> {
    source: R,
    buf: Vec<u8>,
    offset: u64,
    next_index: u64,
    finished: bool,
}

impl<R: Read + Seek> ChunkReader<R> {
    /// `buffer_size` bounds the size of a chunk and therefore of a line.
    pub fn new(source: R, buffer_size: usize) -> Self {
        Self {
            source,
            buf: vec![0; buffer_size.max(1)],
            offset: 0,
            next_index: 0,
            finished: false,
        }
    }

    /// Bytes handed out so far.
    #[must_use]
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the next line-aligned chunk.
    ///
    /// Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// - `EngineError::Read` / `EngineError::Seek` on any I/O failure other
    ///   than end of input.
    /// - `EngineError::LineTooLong` when a full buffer holds no `\n`.
    ///
    /// After an error the reader is finished and yields `Ok(None)`.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>> {
        if self.finished {
            return Ok(None);
        }
        let chunk = self.read_block();
        if !matches!(chunk, Ok(Some(_))) {
            self.finished = true;
        }
        chunk
    }

    fn read_block(&mut self) -> Result<Option<Chunk>> {
        let filled = self.fill()?;
        if filled == 0 {
            return Ok(None);
        }

        // `fill` only stops short of a full buffer at end of input.
        let at_end = filled < self.buf.len();
        let block = &self.buf[..filled];
        let consumed = if at_end {
            filled
        } else {
            memrchr(b'\n', block)
                .map(|pos| pos + 1)
                .ok_or(EngineError::LineTooLong {
                    offset: self.offset,
                    buffer_size: self.buf.len(),
                })?
        };

        // The buffer is overwritten by the next read; the chunk gets its own copy.
        let data = block[..consumed].to_vec();

        let tail = filled - consumed;
        if tail > 0 {
            self.rewind(tail)?;
        }

        let chunk = Chunk {
            index: self.next_index,
            offset: self.offset,
            data,
        };
        self.next_index += 1;
        self.offset += consumed as u64;
        if at_end {
            self.finished = true;
        }

        log::debug!(
            "read chunk {} at byte {} ({} bytes)",
            chunk.index,
            chunk.offset,
            chunk.data.len()
        );
        Ok(Some(chunk))
    }

    fn fill(&mut self) -> Result<usize> {
        let mut filled = 0;
        while filled < self.buf.len() {
            match self.source.read(&mut self.buf[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(source) => {
                    return Err(EngineError::Read {
                        offset: self.offset + filled as u64,
                        source,
                    });
                }
            }
        }
        Ok(filled)
    }

    #[allow(clippy::cast_possible_wrap)]
    fn rewind(&mut self, tail: usize) -> Result<()> {
        log::trace!("seeking back {tail} bytes");
        // `tail` is smaller than the buffer, which an allocation keeps below isize::MAX.
        self.source
            .seek(SeekFrom::Current(-(tail as i64)))
            .map(|_| ())
            .map_err(|source| EngineError::Seek {
                offset: self.offset,
                source,
            })
    }
}

impl<R: Read + Seek> Iterator for ChunkReader<R> {
    type Item = Result<Chunk>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_chunk().transpose()
    }
}

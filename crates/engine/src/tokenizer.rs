// crates/engine/src/tokenizer.rs
//! Splitting chunks into `(key, tenths)` records.
//!
//! Malformed lines are dropped without a trace: no separator, more than one
//! separator, or a value the fixed-point parser rejects.

use crate::parser::parse_tenths;
use crate::stats::StatsTable;
use memchr::memchr;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Initial table size; the usual inputs have a few hundred to ten thousand keys.
const TABLE_CAPACITY: usize = 1024;

/// Strip a leading byte-order mark and leading control or whitespace bytes,
/// then trim trailing whitespace.
#[must_use]
pub fn clean_key(raw: &[u8]) -> &[u8] {
    let raw = raw.strip_prefix(UTF8_BOM).unwrap_or(raw);
    let start = raw
        .iter()
        .position(|&b| !(b.is_ascii_control() || b.is_ascii_whitespace()))
        .unwrap_or(raw.len());
    raw[start..].trim_ascii_end()
}

/// Parse a single line (without its `\n`) into a cleaned key and a value.
#[inline]
#[must_use]
pub fn parse_line(line: &[u8]) -> Option<(&[u8], i64)> {
    let sep = memchr(b';', line)?;
    let (key, value) = (&line[..sep], &line[sep + 1..]);
    // CRLF input: the `\r` belongs to the line ending, not the value.
    let value = value.strip_suffix(b"\r").unwrap_or(value);
    if memchr(b';', value).is_some() {
        return None;
    }
    Some((clean_key(key), parse_tenths(value)?))
}

/// Iterator over the well-formed records of a chunk.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    rest: &'a [u8],
}

impl<'a> Iterator for Records<'a> {
    type Item = (&'a [u8], i64);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let line = if let Some(end) = memchr(b'\n', self.rest) {
                let line = &self.rest[..end];
                self.rest = &self.rest[end + 1..];
                line
            } else {
                std::mem::take(&mut self.rest)
            };

            if line.is_empty() {
                continue;
            }
            if let Some(record) = parse_line(line) {
                return Some(record);
            }
        }
        None
    }
}

#[must_use]
pub fn records(chunk: &[u8]) -> Records<'_> {
    Records { rest: chunk }
}

/// Aggregate one chunk into a fresh partial table.
#[must_use]
pub fn tokenize(chunk: &[u8]) -> StatsTable {
    let mut table = StatsTable::with_capacity(TABLE_CAPACITY);
    for (key, value) in records(chunk) {
        table.record(key, value);
    }
    table
}

// crates/engine/src/stats.rs
//! Per-key statistics and the tables that hold them.
//!
//! All values are tenths of the original decimal quantity. A table is used
//! twice in the pipeline: as the partial result of one chunk, and as the
//! global result owned by the merger.

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;

/// Minimum, maximum, exact sum and count of the values seen for one key.
///
/// An instance always describes at least one value; there is no empty state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyStats {
    pub min: i64,
    pub max: i64,
    pub sum: i64,
    pub count: u64,
}

impl KeyStats {
    #[inline]
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self {
            min: value,
            max: value,
            sum: value,
            count: 1,
        }
    }

    #[inline]
    pub fn record(&mut self, value: i64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.sum += value;
        self.count += 1;
    }

    /// Fold another set of statistics for the same key into this one.
    #[inline]
    pub fn merge(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    /// Mean in tenths, rounded half-up (towards positive infinity).
    ///
    /// Computed as `floor((2 * sum + count) / (2 * count))` so no precision is
    /// lost to floating point.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn mean_tenths(&self) -> i64 {
        let count = i128::from(self.count.max(1));
        let doubled = 2 * i128::from(self.sum) + count;
        // The mean lies between min and max, so it fits in an i64.
        doubled.div_euclid(2 * count) as i64
    }
}

/// Mapping from cleaned key bytes to their statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsTable {
    entries: HashMap<Box<[u8]>, KeyStats>,
}

impl StatsTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
        }
    }

    /// Account one value for `key`, creating the entry on first sight.
    #[inline]
    pub fn record(&mut self, key: &[u8], value: i64) {
        if let Some(stats) = self.entries.get_mut(key) {
            stats.record(value);
        } else {
            self.entries.insert(key.into(), KeyStats::new(value));
        }
    }

    /// Fold one entry of another table into this one.
    pub fn merge_entry(&mut self, key: Box<[u8]>, stats: KeyStats) {
        match self.entries.entry(key) {
            Entry::Occupied(mut existing) => existing.get_mut().merge(&stats),
            Entry::Vacant(slot) => {
                slot.insert(stats);
            }
        }
    }

    /// Fold a whole table into this one, consuming it.
    pub fn merge(&mut self, other: Self) {
        if self.entries.is_empty() {
            *self = other;
            return;
        }
        for (key, stats) in other.entries {
            self.merge_entry(key, stats);
        }
    }

    #[must_use]
    pub fn get(&self, key: &[u8]) -> Option<&KeyStats> {
        self.entries.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &KeyStats)> {
        self.entries.iter().map(|(key, stats)| (&**key, stats))
    }

    /// Entries ordered by key bytes, ascending.
    #[must_use]
    pub fn sorted(&self) -> Vec<(&[u8], &KeyStats)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl<'a> FromIterator<(&'a [u8], i64)> for StatsTable {
    fn from_iter<I: IntoIterator<Item = (&'a [u8], i64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (key, value) in iter {
            table.record(key, value);
        }
        table
    }
}

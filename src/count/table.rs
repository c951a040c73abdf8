//! Character frequency storage
//!
//! Characters are single bytes, so both tables are fixed arrays of 256 slots
//! indexed by byte value. [`FrequencyTable`] is the shared table every worker
//! merges into; [`CharTally`] is the plain per-file counter a worker fills
//! while streaming.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

const SLOTS: usize = 256;

/// Final per-character counts, ordered by character
pub type CharCounts = BTreeMap<char, u64>;

/// Space, tab, newline and carriage return are never counted
#[inline]
pub fn is_excluded(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Map a character to its slot, or `None` if it is not a single-byte character
#[inline]
fn slot_of(ch: char) -> Option<usize> {
    u8::try_from(ch).ok().map(usize::from)
}

/// Shared character -> count table safe for concurrent increments
///
/// Every character owns its own atomic slot, so increments of distinct
/// characters never contend and no lock spans multiple updates.
#[derive(Debug)]
pub struct FrequencyTable {
    slots: Box<[AtomicU64; SLOTS]>,
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            slots: Box::new(std::array::from_fn(|_| AtomicU64::new(0))),
        }
    }

    /// Add one occurrence of `ch`
    pub fn increment(&self, ch: char) {
        self.add(ch, 1);
    }

    /// Add `count` occurrences of `ch`
    ///
    /// Excluded and multi-byte characters are ignored.
    pub fn add(&self, ch: char, count: u64) {
        if let Some(slot) = slot_of(ch)
            && !is_excluded(slot as u8)
        {
            self.slots[slot].fetch_add(count, Ordering::Relaxed);
        }
    }

    /// Fold a worker's per-file tally into the table
    pub fn merge(&self, tally: &CharTally) {
        for (slot, &count) in tally.slots.iter().enumerate() {
            if count > 0 {
                self.slots[slot].fetch_add(count, Ordering::Relaxed);
            }
        }
    }

    /// Current count for `ch`
    pub fn get(&self, ch: char) -> u64 {
        slot_of(ch).map_or(0, |slot| self.slots[slot].load(Ordering::Relaxed))
    }

    /// Nonzero entries as an ordered map
    ///
    /// Only meaningful once every worker has been joined; joining provides the
    /// ordering the relaxed loads rely on.
    pub fn snapshot(&self) -> CharCounts {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, count)| {
                let count = count.load(Ordering::Relaxed);
                (count > 0).then(|| (char::from(slot as u8), count))
            })
            .collect()
    }

    /// Clear every entry; requires exclusive access so no worker can be active
    pub fn reset(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot.get_mut() = 0;
        }
    }
}

/// Unsynchronized counts for a single file
#[derive(Debug, Clone)]
pub struct CharTally {
    slots: [u64; SLOTS],
    bytes: u64,
}

impl Default for CharTally {
    fn default() -> Self {
        Self {
            slots: [0; SLOTS],
            bytes: 0,
        }
    }
}

impl CharTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every non-excluded byte in `chunk`
    pub fn record(&mut self, chunk: &[u8]) {
        self.bytes += chunk.len() as u64;
        for &byte in chunk {
            if !is_excluded(byte) {
                self.slots[usize::from(byte)] += 1;
            }
        }
    }

    /// Add another tally into this one
    pub fn absorb(&mut self, other: &CharTally) {
        for (mine, theirs) in self.slots.iter_mut().zip(other.slots.iter()) {
            *mine += theirs;
        }
        self.bytes += other.bytes;
    }

    pub fn get(&self, ch: char) -> u64 {
        slot_of(ch).map_or(0, |slot| self.slots[slot])
    }

    /// Bytes seen, including excluded characters
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    pub fn to_counts(&self) -> CharCounts {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(slot, &count)| (char::from(slot as u8), count))
            .collect()
    }
}

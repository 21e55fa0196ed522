//! Fixed-Capacity Circular Buffer for Observation Histories
//!
//! ## Overview
//!
//! The forecaster keeps two sliding windows per location: a long window of raw
//! high-frequency PM2.5 samples and a short window of completed hourly means.
//! Both are bounded: once full, the oldest entry is discarded on every push.
//! The capacity is a compile-time constant, so a location's history never grows
//! past its budget no matter how long the monitor runs.
//!
//! ## Memory Layout
//!
//! ```text
//! CircularBuffer<f64, 5>:
//! ┌─────┬─────┬─────┬─────┬─────┐
//! │  0  │  1  │  2  │  3  │  4  │  ← Array indices
//! └─────┴─────┴─────┴─────┴─────┘
//!    ↑                       ↑
//!    └── write_pos = 0      └── After 5 writes, wraps here
//! ```
//!
//! Logical order (oldest first) is recovered from `write_pos` once the buffer
//! has wrapped.
//!
//! ## Usage Example
//!
//! ```rust
//! use ecolens_core::buffer::CircularBuffer;
//!
//! let mut recent: CircularBuffer<f64, 4> = CircularBuffer::new();
//! for v in [10.0, 12.0, 14.0, 16.0, 18.0] {
//!     recent.push(v);
//! }
//!
//! assert_eq!(recent.len(), 4);
//! assert_eq!(recent.last(), Some(&18.0));
//! assert_eq!(recent.to_vec(), vec![12.0, 14.0, 16.0, 18.0]);
//! ```

/// Fixed-size circular buffer that overwrites its oldest entry when full
///
/// ## Internal Invariants
///
/// - `write_pos < N`
/// - `len <= N`
/// - Iteration yields entries in insertion order
#[derive(Debug, Clone)]
pub struct CircularBuffer<T: Copy, const N: usize> {
    /// Storage; `None` marks slots never written
    data: [Option<T>; N],

    /// Index where the next write will occur
    write_pos: usize,

    /// Current number of valid entries
    len: usize,
}

impl<T: Copy, const N: usize> CircularBuffer<T, N> {
    /// Creates a new empty buffer
    pub const fn new() -> Self {
        Self {
            data: [None; N],
            write_pos: 0,
            len: 0,
        }
    }

    /// Appends an entry, overwriting the oldest one when full
    pub fn push(&mut self, value: T) {
        self.data[self.write_pos] = Some(value);
        self.write_pos = (self.write_pos + 1) % N;

        if self.len < N {
            self.len += 1;
        }
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == N
    }

    /// Maximum number of entries
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Most recent entry
    pub fn last(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }

        let idx = if self.write_pos == 0 { N - 1 } else { self.write_pos - 1 };
        self.data[idx].as_ref()
    }

    /// Iterate from oldest to newest
    pub fn iter(&self) -> CircularBufferIter<'_, T, N> {
        CircularBufferIter {
            buffer: self,
            index: 0,
        }
    }

    /// The newest `count` entries, oldest first
    pub fn tail(&self, count: usize) -> impl Iterator<Item = &T> {
        self.iter().skip(self.len.saturating_sub(count))
    }

    /// Copy the contents out in insertion order
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().copied().collect()
    }

    /// Clear all entries
    pub fn clear(&mut self) {
        self.data = [None; N];
        self.write_pos = 0;
        self.len = 0;
    }

    /// Entry by logical index (0 = oldest)
    ///
    /// ```text
    /// Physical array:  [D, E, A, B, C]  (write_pos = 2)
    /// Logical view:    [A, B, C, D, E]
    /// logical[i] = physical[(write_pos + i) % N]
    /// ```
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }

        let actual_index = if self.len < N {
            index
        } else {
            (self.write_pos + index) % N
        };

        self.data[actual_index].as_ref()
    }
}

/// Iterator over circular buffer contents
pub struct CircularBufferIter<'a, T: Copy, const N: usize> {
    buffer: &'a CircularBuffer<T, N>,
    index: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for CircularBufferIter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.buffer.get(self.index)?;
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.buffer.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<T: Copy, const N: usize> Default for CircularBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

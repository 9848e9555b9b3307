//! cdflog records elapsed times (for example the time between a block being created and each
//! transaction it confirms) into fixed-capacity logarithmic histograms, and renders each
//! histogram as a cumulative-distribution (CDF) report.
//!
//! # Buckets
//!
//! A `Histogram` covers many orders of magnitude with a fixed number of buckets by quantizing
//! on a logarithmic scale with 1000 buckets per decade. An elapsed time `t` (in seconds, though
//! nothing here depends on the unit) goes to bucket
//!
//! ```text
//! index(t) = 0                               if t <= 0
//! index(t) = ceil(1000 * (log10(t) + 1))     if t > 0
//! ```
//!
//! so bucket `i` holds the half-open range `(boundary(i - 1), boundary(i)]` with
//! `boundary(i) = 10^(i / 1000 - 1)`. The index is always rounded up: an observation is
//! reported at the right edge of its bucket, never below itself. Bucket 0 collects everything at
//! or below `0.1`, including zero and negative elapsed times.
//!
//! Exact powers of ten land on multiples of 1000:
//!
//! ```
//! use cdflog::{boundary_for, index_for};
//!
//! assert_eq!(index_for(0.0), 0);
//! assert_eq!(index_for(10.0), 2000);
//! assert_eq!(index_for(10_000.0), 5000);
//! assert_eq!(format!("{:.6}", boundary_for(4000)), "1000.000000");
//! ```
//!
//! # Capacity
//!
//! The counter array never grows. An observation that maps to a bucket at or beyond the
//! histogram's capacity is rejected with `RecordError::BucketOverflow`, and nothing is recorded.
//! Clamping such a value into the last bucket would quietly skew the report, so the caller has
//! to decide what to do instead. The default capacity of 7000 buckets covers elapsed times up to
//! a million seconds.
//!
//! ```
//! use cdflog::{Histogram, RecordError};
//!
//! let mut hist = Histogram::<u64>::new();
//! hist.increment(12.5).expect("12.5 seconds should fit");
//!
//! // for ergonomics, observations can also be recorded with +=
//! // this call will panic if the value does not fit!
//! hist += 3.0;
//!
//! match hist.increment(1e20) {
//!     Err(RecordError::BucketOverflow { .. }) => {}
//!     other => panic!("expected an overflow, got {:?}", other),
//! }
//! assert_eq!(hist.total(), 2);
//! ```
//!
//! # Reports
//!
//! `Histogram::render` produces one line per bucket between the lowest and the highest occupied
//! bucket, empty buckets included:
//!
//! ```text
//! <index> | <boundary> | <fraction of observations in this bucket> | <cumulative fraction>
//! ```
//!
//! All three numbers use exactly six decimals, fields are separated by `" | "`, and every line
//! ends with `\n`. The same rows are available as values through `Histogram::iter_cdf`.
//!
//! ```
//! use cdflog::Histogram;
//!
//! let mut hist = Histogram::<u64>::new();
//! for elapsed in &[1000.0, 999.0, 998.0, 997.0, 996.0] {
//!     hist.increment(*elapsed).unwrap();
//! }
//!
//! assert_eq!(
//!     hist.render(),
//!     "3999 | 997.700064 | 0.400000 | 0.400000\n\
//!      4000 | 1000.000000 | 0.600000 | 1.000000\n"
//! );
//! ```
//!
//! # Loggers
//!
//! A `Logger` owns an ordered set of histograms, addressed by position, together with the name
//! prefix and file extension an outside writer uses to store the reports. See the `logger`
//! module.
//!
//! Neither `Histogram` nor `Logger` does any internal synchronization. To record from several
//! threads, either keep one logger per thread or use the `sync` module.

#![deny(missing_docs, trivial_casts, unused_import_braces, unused_extern_crates)]

use std::ops::AddAssign;

pub mod config;
pub mod core;
/// Error types used throughout this library.
pub mod errors;
pub mod iterators;
pub mod logger;

#[cfg(feature = "serialization")]
pub mod serialization;
#[cfg(feature = "sync")]
pub mod sync;

pub use crate::config::LoggerConfig;
pub use crate::core::counter::Counter;
pub use crate::errors::*;
pub use crate::iterators::{CdfRow, FIELD_SEPARATOR};
pub use crate::logger::{Logger, Output};

/// Number of buckets per factor of ten of elapsed time.
pub const BUCKETS_PER_DECADE: u32 = 1000;

/// Capacity used by `Histogram::new`. Bucket 7000 would start at `10^6`, so every elapsed time up
/// to a million seconds fits.
pub const DEFAULT_CAPACITY: usize = 7000;

/// The bucket an elapsed time maps to.
///
/// Non-positive elapsed times, and positive ones at or below `boundary_for(0)`, map to bucket 0.
/// Values without a meaningful bucket (`NaN`, infinity) map to `usize::MAX`, which no histogram
/// can hold.
pub fn index_for(elapsed: f64) -> usize {
    if elapsed <= 0.0 {
        return 0;
    }

    let raw = (f64::from(BUCKETS_PER_DECADE) * (elapsed.log10() + 1.0)).ceil();
    if raw.is_nan() {
        usize::MAX
    } else if raw <= 0.0 {
        0
    } else {
        // float to int casts saturate, so +inf ends up at usize::MAX
        raw as usize
    }
}

/// The right edge of bucket `index`, i.e. the largest elapsed time that maps to it.
///
/// This is only used to label report lines; it does not correspond to any particular recorded
/// observation.
pub fn boundary_for(index: usize) -> f64 {
    10_f64.powf(index as f64 / f64::from(BUCKETS_PER_DECADE) - 1.0)
}

/// A fixed-capacity histogram of elapsed times on a logarithmic scale.
///
/// `C` is the counter type of each bucket. A narrower type saves memory, but once a bucket's
/// counter is at its maximum any further observation for that bucket is rejected with
/// `RecordError::CounterFull`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram<C: Counter = u64> {
    counts: Vec<C>,

    // both 0 until the first observation, then the widest range seen so far
    lowest: usize,
    highest: usize,

    total: u64,
}

impl<C: Counter> Default for Histogram<C> {
    fn default() -> Self {
        Histogram::new()
    }
}

// construction

impl<C: Counter> Histogram<C> {
    /// Construct an empty histogram with `DEFAULT_CAPACITY` buckets.
    pub fn new() -> Histogram<C> {
        Histogram {
            counts: vec![C::zero(); DEFAULT_CAPACITY],
            lowest: 0,
            highest: 0,
            total: 0,
        }
    }

    /// Construct an empty histogram with `capacity` buckets, covering elapsed times up to
    /// `boundary_for(capacity - 1)`.
    pub fn with_capacity(capacity: usize) -> Result<Histogram<C>, CreationError> {
        if capacity == 0 {
            return Err(CreationError::ZeroCapacity);
        }

        Ok(Histogram {
            counts: vec![C::zero(); capacity],
            lowest: 0,
            highest: 0,
            total: 0,
        })
    }

    /// Construct an empty histogram with the same capacity as `source`.
    pub fn new_from<F: Counter>(source: &Histogram<F>) -> Histogram<C> {
        Histogram {
            counts: vec![C::zero(); source.capacity()],
            lowest: 0,
            highest: 0,
            total: 0,
        }
    }
}

// accessors

impl<C: Counter> Histogram<C> {
    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.counts.len()
    }

    /// Number of observations recorded so far.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns true if no observation has been recorded.
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Count of bucket `index`, or `None` if the index is beyond the capacity.
    pub fn count_at_index(&self, index: usize) -> Option<C> {
        self.counts.get(index).cloned()
    }

    /// Lowest bucket that has ever been incremented. 0 while the histogram is empty.
    pub fn lowest_occupied(&self) -> usize {
        self.lowest
    }

    /// Highest bucket that has ever been incremented. 0 while the histogram is empty.
    pub fn highest_occupied(&self) -> usize {
        self.highest
    }

}

// recording

impl<C: Counter> Histogram<C> {
    /// Record one observation of `elapsed`.
    ///
    /// Fails with `RecordError::BucketOverflow` if the observation maps beyond the last bucket,
    /// or with `RecordError::CounterFull` if its bucket cannot count any higher. Either way the
    /// histogram is left untouched.
    pub fn increment(&mut self, elapsed: f64) -> Result<(), RecordError> {
        self.increment_index(index_for(elapsed))
    }

    /// Record one observation directly into bucket `index`, skipping the time to index mapping.
    pub fn increment_index(&mut self, index: usize) -> Result<(), RecordError> {
        let capacity = self.capacity();
        if index >= capacity {
            tracing::warn!(index, capacity, "Observation does not fit in histogram.");
            return Err(RecordError::BucketOverflow { index, capacity });
        }

        let first = self.is_empty();
        let slot = &mut self.counts[index];
        *slot = match slot.checked_add(&C::one()) {
            Some(next) => next,
            None => {
                tracing::warn!(index, "Histogram bucket counter is full.");
                return Err(RecordError::CounterFull { index });
            }
        };
        self.total += 1;

        if first {
            self.lowest = index;
            self.highest = index;
        } else {
            self.lowest = self.lowest.min(index);
            self.highest = self.highest.max(index);
        }
        Ok(())
    }
}

// reporting

impl<C: Counter> Histogram<C> {
    /// Iterate over the rows of this histogram's CDF report, from the lowest to the highest
    /// occupied bucket. Yields nothing for an empty histogram.
    pub fn iter_cdf(&self) -> iterators::Iter<'_, C> {
        iterators::Iter::new(self)
    }

    /// Render the CDF report. Every line is
    /// `<index> | <boundary> | <fraction> | <cumulative>\n` with six decimals per number.
    ///
    /// An empty histogram renders to an empty string.
    pub fn render(&self) -> String {
        self.iter_cdf().map(|row| format!("{}\n", row)).collect()
    }
}

// make it more ergonomic to record observations
impl<C: Counter> AddAssign<f64> for Histogram<C> {
    fn add_assign(&mut self, elapsed: f64) {
        if let Err(e) = self.increment(elapsed) {
            panic!("{}", e);
        }
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

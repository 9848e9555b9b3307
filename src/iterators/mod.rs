//! Row-by-row access to a histogram's cumulative distribution.

use crate::core::counter::Counter;
use crate::{boundary_for, Histogram};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the fields of a report line.
pub const FIELD_SEPARATOR: &str = " | ";

/// One line of a CDF report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CdfRow {
    /// Bucket index.
    pub index: usize,
    /// Right edge of the bucket, see `boundary_for`.
    pub boundary: f64,
    /// Fraction of all observations that fell into this bucket.
    pub fraction: f64,
    /// Fraction of all observations that fell into this bucket or a lower one.
    pub cumulative: f64,
}

impl fmt::Display for CdfRow {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{sep}{:.6}{sep}{:.6}{sep}{:.6}",
            self.index,
            self.boundary,
            self.fraction,
            self.cumulative,
            sep = FIELD_SEPARATOR
        )
    }
}

/// An iterator over every bucket from the lowest to the highest occupied one, including empty
/// buckets in between.
#[derive(Debug, Clone)]
pub struct Iter<'a, C: 'a + Counter> {
    hist: &'a Histogram<C>,
    next_index: usize,
    // running sum of counts up to and including the last yielded bucket
    count_to_index: u64,
    ended: bool,
}

impl<'a, C: 'a + Counter> Iter<'a, C> {
    /// Construct a new CDF iterator. See `Histogram::iter_cdf` for details.
    pub fn new(hist: &'a Histogram<C>) -> Iter<'a, C> {
        Iter {
            hist,
            next_index: hist.lowest_occupied(),
            count_to_index: 0,
            ended: hist.is_empty(),
        }
    }
}

impl<'a, C: 'a + Counter> Iterator for Iter<'a, C> {
    type Item = CdfRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.ended {
            return None;
        }

        let index = self.next_index;
        let count = self.hist.counts[index].as_u64();
        self.count_to_index += count;

        if index == self.hist.highest_occupied() {
            self.ended = true;
        } else {
            self.next_index += 1;
        }

        let total = self.hist.total() as f64;
        Some(CdfRow {
            index,
            boundary: boundary_for(index),
            fraction: count as f64 / total,
            cumulative: self.count_to_index as f64 / total,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.ended {
            0
        } else {
            self.hist.highest_occupied() - self.next_index + 1
        };
        (remaining, Some(remaining))
    }
}

impl<'a, C: 'a + Counter> ExactSizeIterator for Iter<'a, C> {}

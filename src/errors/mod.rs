use thiserror::Error;

/// Errors that can occur when creating a histogram.
#[derive(Error, Debug, Eq, PartialEq, Clone, Copy)]
pub enum CreationError {
    /// A histogram needs at least one bucket. Bucket 0 holds every elapsed time at or below
    /// `boundary_for(0)`, so a capacity of 1 is already usable, if not very informative.
    #[error("histogram capacity must be at least one bucket")]
    ZeroCapacity,
}

/// Errors that can occur while recording an observation.
///
/// The variants describe different kinds of mistakes and are never folded into one another: an
/// overflow means the histogram was sized too small for the data, a full counter means the
/// counter type was chosen too narrow, and an out-of-range position means the caller asked for a
/// histogram that does not exist.
#[derive(Error, Debug, Eq, PartialEq, Clone, Copy)]
pub enum RecordError {
    /// The observation maps to a bucket at or beyond the histogram's capacity. Nothing was
    /// recorded. Configure a larger capacity.
    #[error("not enough buckets to record the observation")]
    BucketOverflow {
        /// The bucket the observation maps to. `usize::MAX` for values that have no bucket at
        /// all, like `NaN` or infinity.
        index: usize,
        /// The capacity of the histogram that rejected it.
        capacity: usize,
    },
    /// The counter of the bucket the observation maps to is already at the maximum its type can
    /// hold. Nothing was recorded. Use a wider counter type.
    #[error("bucket {index} cannot count any more observations")]
    CounterFull {
        /// The bucket whose counter is full.
        index: usize,
    },
    /// The selected histogram position is not a valid slot of the logger.
    #[error("histogram position {position} is out of range for a logger holding {len} histograms")]
    IndexOutOfRange {
        /// The requested position.
        position: usize,
        /// The number of histograms in the logger.
        len: usize,
    },
}

/// Errors that can occur while reading a rendered report back.
#[cfg(feature = "serialization")]
#[derive(Error, Debug, Eq, PartialEq, Clone, Copy)]
pub enum ReportParseError {
    /// The line at the given zero-based line number is not of the form
    /// `<index> | <boundary> | <fraction> | <cumulative>`.
    #[error("malformed report line {line}")]
    Malformed {
        /// Zero-based line number.
        line: usize,
    },
    /// The report does not end with a newline.
    #[error("report is missing its final line terminator")]
    UnterminatedLine,
}

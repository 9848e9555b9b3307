//! An ordered collection of histograms that share one naming scheme.
//!
//! A load-generation run typically wants several CDFs side by side, for example one per
//! transaction class. A `Logger` holds them in a fixed order; a histogram's position is its
//! identity for both recording and reporting. Histograms can be appended but never removed, and
//! they never share counts with each other.
//!
//! The logger does no I/O. Whoever stores the reports asks for `file_prefix`, `file_extension`
//! and `render_all` (or, generically, the `Output` trait) and writes the strings wherever they
//! like.
//!
//! ```
//! use cdflog::{Histogram, Logger, RecordError};
//!
//! let mut logger = Logger::new("confirmations", vec![Histogram::<u64>::new(), Histogram::new()]);
//!
//! // block created at t=1000, transactions submitted at t=0 and t=990
//! logger.record_between(0, 1000.0, 0.0).unwrap();
//! logger.record_between(1, 1000.0, 990.0).unwrap();
//!
//! assert_eq!(
//!     logger.record_at(2, 1.0),
//!     Err(RecordError::IndexOutOfRange { position: 2, len: 2 })
//! );
//!
//! let reports = logger.render_all();
//! assert_eq!(reports[0], "4000 | 1000.000000 | 1.000000 | 1.000000\n");
//! assert_eq!(reports[1], "2000 | 10.000000 | 1.000000 | 1.000000\n");
//! ```

use crate::config::LoggerConfig;
use crate::core::counter::Counter;
use crate::errors::{CreationError, RecordError};
use crate::Histogram;

/// File extension tag for rendered CDF reports.
pub const FILE_EXTENSION: &str = "cl-dat";

/// Something that produces textual reports for an external writer.
///
/// The writer names each report after `file_prefix` and `file_extension`; the reports are
/// returned in a stable order so it can number them.
pub trait Output {
    /// Prefix for the files the reports end up in.
    fn file_prefix(&self) -> &str;

    /// Extension for the files the reports end up in.
    fn file_extension(&self) -> &str;

    /// The reports, in order.
    fn outputs(&self) -> Vec<String>;
}

/// An ordered, append-only set of histograms addressed by position.
#[derive(Debug, Clone, PartialEq)]
pub struct Logger<C: Counter = u64> {
    histograms: Vec<Histogram<C>>,
    prefix: String,
}

impl<C: Counter> Logger<C> {
    /// Construct a logger from pre-built histograms. Their order is the order of positions and
    /// of reports.
    pub fn new<S: Into<String>>(prefix: S, histograms: Vec<Histogram<C>>) -> Logger<C> {
        let prefix = prefix.into();
        tracing::debug!(
            prefix = %prefix,
            histograms = histograms.len(),
            "Created cumulative logger."
        );
        Logger { histograms, prefix }
    }

    /// Construct a logger with `count` empty histograms of `capacity` buckets each.
    pub fn with_histograms<S: Into<String>>(
        prefix: S,
        count: usize,
        capacity: usize,
    ) -> Result<Logger<C>, CreationError> {
        let histograms = (0..count)
            .map(|_| Histogram::with_capacity(capacity))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Logger::new(prefix, histograms))
    }

    /// Construct a logger as described by `config`.
    pub fn from_config(config: &LoggerConfig) -> Result<Logger<C>, CreationError> {
        Logger::with_histograms(config.prefix.clone(), config.histograms, config.capacity)
    }

    /// Append a histogram and return its position.
    pub fn push(&mut self, histogram: Histogram<C>) -> usize {
        self.histograms.push(histogram);
        self.histograms.len() - 1
    }

    /// Number of histograms.
    pub fn len(&self) -> usize {
        self.histograms.len()
    }

    /// Returns true if the logger holds no histograms.
    pub fn is_empty(&self) -> bool {
        self.histograms.is_empty()
    }

    /// The histogram at `position`, if there is one.
    pub fn histogram(&self, position: usize) -> Option<&Histogram<C>> {
        self.histograms.get(position)
    }

    /// All histograms, in order.
    pub fn histograms(&self) -> &[Histogram<C>] {
        &self.histograms
    }

    /// Prefix for the files the reports end up in.
    pub fn file_prefix(&self) -> &str {
        &self.prefix
    }

    /// Extension for the files the reports end up in. Always `FILE_EXTENSION`.
    pub fn file_extension(&self) -> &str {
        FILE_EXTENSION
    }

    /// Record `elapsed` in the histogram at `position`.
    ///
    /// An invalid position fails with `RecordError::IndexOutOfRange`. A
    /// `RecordError::BucketOverflow` from the histogram is passed through as is.
    pub fn record_at(&mut self, position: usize, elapsed: f64) -> Result<(), RecordError> {
        let len = self.histograms.len();
        match self.histograms.get_mut(position) {
            Some(histogram) => histogram.increment(elapsed),
            None => Err(RecordError::IndexOutOfRange { position, len }),
        }
    }

    /// Record the time from `subject` to `reference` (i.e. `reference - subject`) in the
    /// histogram at `position`. A subject later than the reference counts as zero elapsed time.
    pub fn record_between(
        &mut self,
        position: usize,
        reference: f64,
        subject: f64,
    ) -> Result<(), RecordError> {
        self.record_at(position, reference - subject)
    }

    /// Render every histogram's report, in order.
    pub fn render_all(&self) -> Vec<String> {
        self.histograms
            .iter()
            .enumerate()
            .map(|(position, histogram)| {
                tracing::trace!(
                    prefix = %self.prefix,
                    position,
                    total = histogram.total(),
                    "Rendering cumulative report."
                );
                histogram.render()
            })
            .collect()
    }
}

impl<C: Counter> Output for Logger<C> {
    fn file_prefix(&self) -> &str {
        Logger::file_prefix(self)
    }

    fn file_extension(&self) -> &str {
        Logger::file_extension(self)
    }

    fn outputs(&self) -> Vec<String> {
        self.render_all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_prefix() {
        let logger = Logger::<u64>::new("prefix", vec![]);
        assert_eq!("prefix", logger.file_prefix());
    }

    #[test]
    fn file_extension() {
        let logger = Logger::<u64>::new("", vec![]);
        assert_eq!("cl-dat", logger.file_extension());
        assert_eq!("cl-dat", Output::file_extension(&logger));
    }

    #[test]
    fn push_returns_position() {
        let mut logger = Logger::<u64>::new("", vec![Histogram::new()]);
        assert_eq!(1, logger.push(Histogram::with_capacity(10).unwrap()));
        assert_eq!(2, logger.len());
        assert_eq!(Some(10), logger.histogram(1).map(|h| h.capacity()));
    }

    #[test]
    fn with_histograms_rejects_zero_capacity() {
        assert_eq!(
            Err(CreationError::ZeroCapacity),
            Logger::<u64>::with_histograms("", 2, 0)
        );
    }

    #[test]
    fn with_histograms_zero_count() {
        let logger = Logger::<u64>::with_histograms("p", 0, 0).unwrap();
        assert!(logger.is_empty());
        assert!(logger.render_all().is_empty());
    }

    #[test]
    fn record_at_empty_logger() {
        let mut logger = Logger::<u64>::new("", vec![]);
        assert_eq!(
            Err(RecordError::IndexOutOfRange {
                position: 0,
                len: 0
            }),
            logger.record_at(0, 1.0)
        );
    }

    #[test]
    fn record_at_passes_overflow_through() {
        let mut logger = Logger::<u64>::new("", vec![Histogram::new()]);
        assert_eq!(
            Err(RecordError::BucketOverflow {
                index: 21000,
                capacity: 7000
            }),
            logger.record_at(0, 1e20)
        );
        assert!(logger.histogram(0).unwrap().is_empty());
    }

    #[test]
    fn outputs_match_render_all() {
        let mut logger = Logger::<u64>::new("", vec![Histogram::new()]);
        logger.record_at(0, 5.0).unwrap();
        assert_eq!(logger.render_all(), logger.outputs());
    }
}

//! Synchronized access to a `Logger` from multiple threads.
//!
//! `Logger` and `Histogram` are plain mutable state. A `SyncLogger` keeps the logger on its
//! owning thread and hands out `Recorder`s, cheap cloneable handles that can be moved to other
//! threads. A `Recorder` checks each observation against the logger's shape right away, so
//! callers see `IndexOutOfRange` and `BucketOverflow` at the point of recording, and then sends
//! it over a lock-free channel. The owner applies everything sent so far with
//! `SyncLogger::refresh`.
//!
//! ```
//! use cdflog::sync::SyncLogger;
//! use cdflog::{Histogram, Logger};
//! use std::thread;
//!
//! let mut logger: SyncLogger<u64> = Logger::new("run", vec![Histogram::new()]).into();
//!
//! let workers: Vec<_> = (0..4)
//!     .map(|_| {
//!         let recorder = logger.recorder();
//!         thread::spawn(move || recorder.record_at(0, 10.0).unwrap())
//!     })
//!     .collect();
//! for w in workers {
//!     w.join().unwrap();
//! }
//!
//! assert_eq!(logger.refresh(), Ok(4));
//! assert_eq!(logger.histogram(0).unwrap().total(), 4);
//! ```

use crate::core::counter::Counter;
use crate::errors::RecordError;
use crate::{index_for, Logger};
use std::ops::Deref;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
struct Observation {
    position: usize,
    elapsed: f64,
}

/// A write-only handle to a [`SyncLogger`].
///
/// Recording never blocks. Observations recorded after the [`SyncLogger`] has been dropped are
/// discarded.
#[derive(Debug, Clone)]
pub struct Recorder {
    sender: crossbeam_channel::Sender<Observation>,
    // capacity of each histogram, by position
    capacities: Arc<[usize]>,
}

impl Recorder {
    /// Record `elapsed` in the histogram at `position`.
    ///
    /// Fails with the same `IndexOutOfRange` and `BucketOverflow` errors as `Logger::record_at`.
    /// A full counter is only detected by `SyncLogger::refresh`.
    pub fn record_at(&self, position: usize, elapsed: f64) -> Result<(), RecordError> {
        let len = self.capacities.len();
        let capacity = *self
            .capacities
            .get(position)
            .ok_or(RecordError::IndexOutOfRange { position, len })?;

        let index = index_for(elapsed);
        if index >= capacity {
            tracing::warn!(position, index, capacity, "Observation does not fit in histogram.");
            return Err(RecordError::BucketOverflow { index, capacity });
        }

        // if this is err, the reader went away
        let _ = self.sender.send(Observation { position, elapsed });
        Ok(())
    }

    /// Record `reference - subject` in the histogram at `position`. See
    /// `Logger::record_between`.
    pub fn record_between(
        &self,
        position: usize,
        reference: f64,
        subject: f64,
    ) -> Result<(), RecordError> {
        self.record_at(position, reference - subject)
    }
}

/// A `Logger` that can be recorded into from many threads through [`Recorder`]s.
///
/// Read access goes through `Deref`; the logger only reflects observations applied by the most
/// recent [`SyncLogger::refresh`].
#[derive(Debug)]
pub struct SyncLogger<C: Counter = u64> {
    logger: Logger<C>,
    sender: crossbeam_channel::Sender<Observation>,
    receiver: crossbeam_channel::Receiver<Observation>,
    capacities: Arc<[usize]>,
}

impl<C: Counter> SyncLogger<C> {
    /// Wrap `logger`. Its set of histograms is fixed from here on.
    pub fn new(logger: Logger<C>) -> SyncLogger<C> {
        let (sender, receiver) = crossbeam_channel::unbounded();
        let capacities: Arc<[usize]> = logger
            .histograms()
            .iter()
            .map(|h| h.capacity())
            .collect::<Vec<_>>()
            .into();
        SyncLogger {
            logger,
            sender,
            receiver,
            capacities,
        }
    }

    /// Obtain another handle for recording.
    pub fn recorder(&self) -> Recorder {
        Recorder {
            sender: self.sender.clone(),
            capacities: Arc::clone(&self.capacities),
        }
    }

    /// Record directly on the owning thread.
    pub fn record_at(&mut self, position: usize, elapsed: f64) -> Result<(), RecordError> {
        self.logger.record_at(position, elapsed)
    }

    /// Apply every observation recorders have sent so far, returning how many there were.
    ///
    /// Recorders cannot see counter values, so a `RecordError::CounterFull` only shows up here.
    /// Applying stops at that observation; it is not recorded, and later ones stay pending.
    pub fn refresh(&mut self) -> Result<usize, RecordError> {
        let mut applied = 0;
        for observation in self.receiver.try_iter() {
            self.logger
                .record_at(observation.position, observation.elapsed)?;
            applied += 1;
        }

        tracing::trace!(applied, "Refreshed synchronized logger.");
        Ok(applied)
    }

    /// Apply pending observations and give back the plain logger.
    pub fn into_inner(mut self) -> Result<Logger<C>, RecordError> {
        self.refresh()?;
        Ok(self.logger)
    }
}

impl<C: Counter> From<Logger<C>> for SyncLogger<C> {
    fn from(logger: Logger<C>) -> Self {
        SyncLogger::new(logger)
    }
}

impl<C: Counter> Deref for SyncLogger<C> {
    type Target = Logger<C>;
    fn deref(&self) -> &Self::Target {
        &self.logger
    }
}

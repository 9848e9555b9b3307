#![cfg(feature = "sync")]

use cdflog::sync::SyncLogger;
use cdflog::{Histogram, Logger, RecordError};
use std::thread;

fn two_histograms() -> SyncLogger<u64> {
    Logger::new(
        "sync",
        vec![Histogram::new(), Histogram::with_capacity(3000).unwrap()],
    )
    .into()
}

#[test]
fn record_through() {
    let mut l = two_histograms();
    l.record_at(0, 10.0).unwrap();
    assert_eq!(Some(1), l.histogram(0).unwrap().count_at_index(2000));
}

#[test]
fn recorder_not_visible_before_refresh() {
    let mut l = two_histograms();
    let r = l.recorder();
    r.record_at(0, 10.0).unwrap();

    assert!(l.histogram(0).unwrap().is_empty());
    assert_eq!(Ok(1), l.refresh());
    assert_eq!(1, l.histogram(0).unwrap().total());
    assert_eq!(Ok(0), l.refresh());
}

#[test]
fn recorder_checks_position() {
    let l = two_histograms();
    let r = l.recorder();
    assert_eq!(
        Err(RecordError::IndexOutOfRange {
            position: 2,
            len: 2
        }),
        r.record_at(2, 1.0)
    );
}

#[test]
fn recorder_checks_capacity_per_histogram() {
    let mut l = two_histograms();
    let r = l.recorder();

    assert!(r.record_at(0, 100.0).is_ok());
    assert_eq!(
        Err(RecordError::BucketOverflow {
            index: 3000,
            capacity: 3000
        }),
        r.record_at(1, 100.0)
    );
    assert_eq!(Ok(1), l.refresh());
}

#[test]
fn recorders_on_many_threads() {
    let mut l = two_histograms();

    let workers: Vec<_> = (0..8_u8)
        .map(|t| {
            let r = l.recorder();
            thread::spawn(move || {
                // 49.5 to 99 seconds, which fits both histograms
                for i in 0..100_u8 {
                    r.record_between(usize::from(t % 2), 100.0, 1.0 + f64::from(i) * 0.5)
                        .unwrap();
                }
            })
        })
        .collect();
    for w in workers {
        w.join().unwrap();
    }

    assert_eq!(Ok(800), l.refresh());
    assert_eq!(400, l.histogram(0).unwrap().total());
    assert_eq!(400, l.histogram(1).unwrap().total());
    assert_eq!(l.histogram(0).unwrap().render(), l.histogram(1).unwrap().render());
}

#[test]
fn refresh_reports_full_counter() {
    let mut l: SyncLogger<u8> = Logger::new("", vec![Histogram::new()]).into();
    let r = l.recorder();
    for _ in 0..256 {
        r.record_at(0, 10.0).unwrap();
    }

    assert_eq!(Err(RecordError::CounterFull { index: 2000 }), l.refresh());
    assert_eq!(255, l.histogram(0).unwrap().total());
}

#[test]
fn recorder_outlives_logger() {
    let l = two_histograms();
    let r = l.recorder();
    drop(l);
    assert!(r.record_at(0, 1.0).is_ok());
}

#[test]
fn into_inner_applies_pending() {
    let l = two_histograms();
    let r = l.recorder();
    r.record_at(1, 2.0).unwrap();
    r.record_at(1, 2.0).unwrap();

    let logger = l.into_inner().unwrap();
    assert_eq!(
        vec![
            String::new(),
            "1302 | 2.004472 | 1.000000 | 1.000000\n".to_string()
        ],
        logger.render_all()
    );
}

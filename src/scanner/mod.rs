pub mod aggregator;
pub mod batch;
pub mod error;
pub mod progress;
pub mod scheduler;

pub use aggregator::{AggregateState, Failure};
pub use batch::Batch;
pub use error::ScanError;
pub use progress::{CancelFlag, NullObserver, ProgressEvent, ProgressObserver, QueueObserver};

use crate::asset::endpoint::Endpoint;
use crate::asset::probe::Prober;

/// Result of a completed full-range scan.
#[derive(Debug)]
pub struct ScanReport {
    /// Valid identifiers, ascending and unique.
    pub found: Vec<u32>,
    /// Identifiers whose retry budget ran out, in arrival order.
    pub failures: Vec<Failure>,
    pub completed: usize,
}

impl ScanReport {
    /// A completed run with zero valid identifiers. Not an error; the
    /// caller decides whether to treat it as one.
    pub fn is_empty(&self) -> bool {
        self.found.is_empty()
    }
}

/// Drives the full identifier range batch by batch. Batches run strictly
/// sequentially; within a batch one probe per id runs concurrently, so the
/// batch size is the sole throttle on the remote endpoint.
pub struct Scanner<E> {
    prober: Prober<E>,
    lower: u32,
    upper: u32,
    batch_size: usize,
    cancel: CancelFlag,
}

impl<E: Endpoint> Scanner<E> {
    pub fn new(prober: Prober<E>, lower: u32, upper: u32, batch_size: usize) -> Self {
        Self {
            prober,
            lower,
            upper,
            batch_size,
            cancel: CancelFlag::new(),
        }
    }

    /// Handle the observer side uses to abort the run.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    pub fn total(&self) -> usize {
        self.upper.saturating_sub(self.lower) as usize
    }

    /// Probes every identifier in range, emitting one progress event per
    /// batch. The aggregate is folded only after a batch fully completes,
    /// so the completed count and fraction advance atomically per batch.
    pub fn run<O: ProgressObserver>(&self, observer: &O) -> Result<ScanReport, ScanError> {
        if self.batch_size == 0 {
            return Err(ScanError::InvalidBatchSize);
        }

        let total = self.total();
        let batches = batch::partition(self.lower, self.upper, self.batch_size);
        let mut state = AggregateState::new();

        log::info!(
            "scanning {} ids in {} batches of at most {}",
            total,
            batches.len(),
            self.batch_size
        );

        for batch in &batches {
            if self.cancel.is_cancelled() {
                log::warn!("scan aborted after {} of {} ids", state.completed(), total);
                return Err(ScanError::Aborted);
            }

            let outcomes = scheduler::run_batch(&self.prober, batch);
            state.fold(&outcomes);

            observer.on_progress(ProgressEvent {
                fraction: state.completed() as f64 / total as f64,
                outcomes,
            });
        }

        let completed = state.completed();
        let (found, failures) = state.finalize();
        log::info!(
            "scan complete: {} found, {} failed, {} probed",
            found.len(),
            failures.len(),
            completed
        );

        Ok(ScanReport {
            found,
            failures,
            completed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::error::AssetError;
    use crate::asset::probe::ProbeStatus;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Endpoint returning a fixed status per id (500 when unlisted) and
    /// counting attempts per id.
    struct FixtureEndpoint {
        statuses: HashMap<u32, u16>,
        default_status: u16,
        attempts: Mutex<HashMap<u32, u32>>,
    }

    impl FixtureEndpoint {
        fn new(statuses: HashMap<u32, u16>, default_status: u16) -> Self {
            Self {
                statuses,
                default_status,
                attempts: Mutex::new(HashMap::new()),
            }
        }

        fn attempts_for(&self, id: u32) -> u32 {
            self.attempts.lock().unwrap().get(&id).copied().unwrap_or(0)
        }
    }

    impl Endpoint for FixtureEndpoint {
        fn status(&self, id: u32) -> Result<u16, String> {
            *self.attempts.lock().unwrap().entry(id).or_insert(0) += 1;
            Ok(self
                .statuses
                .get(&id)
                .copied()
                .unwrap_or(self.default_status))
        }

        fn body(&self, _id: u32) -> Result<Vec<u8>, AssetError> {
            unreachable!("probe never reads the body")
        }
    }

    /// Observer recording every event, optionally cancelling after the
    /// first one.
    struct RecordingObserver {
        events: Mutex<Vec<ProgressEvent>>,
        cancel_after_first: Option<CancelFlag>,
    }

    impl RecordingObserver {
        fn new() -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                cancel_after_first: None,
            }
        }

        fn cancelling(flag: CancelFlag) -> Self {
            Self {
                events: Mutex::new(Vec::new()),
                cancel_after_first: Some(flag),
            }
        }

        fn events(&self) -> Vec<ProgressEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl ProgressObserver for RecordingObserver {
        fn on_progress(&self, event: ProgressEvent) {
            let mut events = self.events.lock().unwrap();
            events.push(event);
            if events.len() == 1 {
                if let Some(flag) = &self.cancel_after_first {
                    flag.cancel();
                }
            }
        }
    }

    fn all_found_endpoint() -> FixtureEndpoint {
        FixtureEndpoint::new(HashMap::new(), 200)
    }

    #[test]
    fn every_id_in_range_is_probed_exactly_once() {
        let endpoint = all_found_endpoint();
        let scanner = Scanner::new(Prober::new(&endpoint, 3), 1000, 1037, 10);
        let observer = RecordingObserver::new();

        let report = scanner.run(&observer).unwrap();

        assert_eq!(report.completed, 37);
        assert_eq!(report.found, (1000..1037).collect::<Vec<u32>>());
        for id in 1000..1037 {
            assert_eq!(endpoint.attempts_for(id), 1);
        }
    }

    #[test]
    fn fractions_are_non_decreasing_and_end_at_one() {
        let endpoint = all_found_endpoint();
        let scanner = Scanner::new(Prober::new(&endpoint, 0), 0, 95, 20);
        let observer = RecordingObserver::new();

        scanner.run(&observer).unwrap();

        let events = observer.events();
        assert_eq!(events.len(), 5);
        for pair in events.windows(2) {
            assert!(pair[0].fraction <= pair[1].fraction);
        }
        let finals: Vec<&ProgressEvent> = events
            .iter()
            .filter(|event| event.fraction >= 1.0)
            .collect();
        assert_eq!(finals.len(), 1);
        assert_eq!(events.last().map(|event| event.fraction), Some(1.0));
    }

    #[test]
    fn events_carry_the_batch_outcomes_in_batch_order() {
        let endpoint = all_found_endpoint();
        let scanner = Scanner::new(Prober::new(&endpoint, 0), 100, 130, 10);
        let observer = RecordingObserver::new();

        scanner.run(&observer).unwrap();

        let events = observer.events();
        assert_eq!(events.len(), 3);
        for (index, event) in events.iter().enumerate() {
            assert_eq!(event.outcomes.len(), 10);
            let start = 100 + (index as u32) * 10;
            for outcome in &event.outcomes {
                assert!(outcome.id >= start && outcome.id < start + 10);
            }
        }
    }

    #[test]
    fn mixed_range_matches_expected_classification() {
        // Range [1000, 1010): 1003 and 1007 exist, 1004 is absent, the
        // remaining seven keep answering 500 with one retry allowed.
        let statuses = HashMap::from([(1003, 200), (1007, 200), (1004, 404)]);
        let endpoint = FixtureEndpoint::new(statuses, 500);
        let scanner = Scanner::new(Prober::new(&endpoint, 1), 1000, 1010, 5);
        let observer = RecordingObserver::new();

        let report = scanner.run(&observer).unwrap();

        assert_eq!(report.found, vec![1003, 1007]);
        assert_eq!(report.failures.len(), 7);
        assert_eq!(report.completed, 10);

        // 404 is terminal: one attempt, no failure entry.
        assert_eq!(endpoint.attempts_for(1004), 1);
        assert!(report.failures.iter().all(|failure| failure.id != 1004));

        // Each failing id burned its full budget: max_retries + 1 attempts.
        for failure in &report.failures {
            assert_eq!(endpoint.attempts_for(failure.id), 2);
        }
    }

    #[test]
    fn cancellation_between_batches_aborts_without_a_report() {
        let endpoint = all_found_endpoint();
        let scanner = Scanner::new(Prober::new(&endpoint, 0), 0, 100, 10);
        let observer = RecordingObserver::cancelling(scanner.cancel_flag());

        let result = scanner.run(&observer);

        assert_eq!(result.unwrap_err(), ScanError::Aborted);
        // The in-flight batch completed, nothing further was scheduled.
        assert_eq!(observer.events().len(), 1);
        assert_eq!(endpoint.attempts_for(10), 0);
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let endpoint = all_found_endpoint();
        let scanner = Scanner::new(Prober::new(&endpoint, 0), 0, 10, 0);

        assert_eq!(
            scanner.run(&NullObserver).unwrap_err(),
            ScanError::InvalidBatchSize
        );
    }

    #[test]
    fn all_not_found_completes_with_an_empty_report() {
        let endpoint = FixtureEndpoint::new(HashMap::new(), 404);
        let scanner = Scanner::new(Prober::new(&endpoint, 3), 1000, 1010, 5);

        let report = scanner.run(&NullObserver).unwrap();

        assert!(report.is_empty());
        assert!(report.failures.is_empty());
        assert_eq!(report.completed, 10);
    }

    #[test]
    fn failed_outcomes_are_failures_not_finds() {
        let endpoint = FixtureEndpoint::new(HashMap::from([(5, 200)]), 503);
        let scanner = Scanner::new(Prober::new(&endpoint, 0), 0, 10, 10);
        let observer = RecordingObserver::new();

        let report = scanner.run(&observer).unwrap();

        assert_eq!(report.found, vec![5]);
        assert_eq!(report.failures.len(), 9);

        let events = observer.events();
        let failed = events[0]
            .outcomes
            .iter()
            .filter(|outcome| matches!(outcome.status, ProbeStatus::Failed(_)))
            .count();
        assert_eq!(failed, 9);
    }
}

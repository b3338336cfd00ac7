use std::collections::HashSet;
use std::fmt;

use crate::asset::probe::{FailureCause, ProbeOutcome, ProbeStatus};

/// Reported failure of one identifier after its retry budget ran out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub id: u32,
    pub cause: FailureCause,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] fetch failed: {}", self.id, self.cause)
    }
}

/// Running totals, folded in by the orchestrator after each batch barrier.
/// Not-found outcomes count toward completion but are expected, so they
/// never reach the failure report.
#[derive(Debug, Default)]
pub struct AggregateState {
    found: HashSet<u32>,
    failures: Vec<Failure>,
    completed: usize,
}

impl AggregateState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fold(&mut self, outcomes: &[ProbeOutcome]) {
        for outcome in outcomes {
            match &outcome.status {
                ProbeStatus::Found => {
                    self.found.insert(outcome.id);
                }
                ProbeStatus::NotFound => {}
                ProbeStatus::Failed(cause) => {
                    self.failures.push(Failure {
                        id: outcome.id,
                        cause: cause.clone(),
                    });
                }
            }
        }

        self.completed += outcomes.len();
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn found_count(&self) -> usize {
        self.found.len()
    }

    /// Consumes the state into the ascending id list and the failure
    /// report. Ids are unique by construction, each probed exactly once.
    pub fn finalize(self) -> (Vec<u32>, Vec<Failure>) {
        let mut ids: Vec<u32> = self.found.into_iter().collect();
        ids.sort_unstable();

        (ids, self.failures)
    }
}

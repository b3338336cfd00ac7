use std::sync::mpsc;
use std::thread;

use crate::asset::endpoint::Endpoint;
use crate::asset::probe::{ProbeOutcome, Prober};
use crate::scanner::batch::Batch;

/// Runs one batch with one worker per identifier. The thread scope is the
/// barrier: no worker outlives the batch. Outcomes arrive in completion
/// order, one per id.
pub fn run_batch<E: Endpoint>(prober: &Prober<E>, batch: &Batch) -> Vec<ProbeOutcome> {
    let (sender, receiver) = mpsc::channel();

    thread::scope(|scope| {
        for id in batch.ids() {
            let sender = sender.clone();
            scope.spawn(move || {
                let _ = sender.send(prober.probe(id));
            });
        }
    });
    drop(sender);

    receiver.into_iter().collect()
}

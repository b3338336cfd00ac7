use std::sync::mpsc::Receiver;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::asset::probe::ProbeStatus;
use crate::scanner::ProgressEvent;

/// Per-run counters shown next to the progress bar. Not-found ids are
/// skips, exhausted retries are errors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounters {
    pub found: usize,
    pub skipped: usize,
    pub errored: usize,
}

impl ScanCounters {
    pub fn absorb(&mut self, event: &ProgressEvent) {
        for outcome in &event.outcomes {
            match outcome.status {
                ProbeStatus::Found => self.found += 1,
                ProbeStatus::NotFound => self.skipped += 1,
                ProbeStatus::Failed(_) => self.errored += 1,
            }
        }
    }
}

/// Terminal rendering of a scan in flight: an indicatif bar driven by the
/// progress events drained off the queue observer.
pub struct ScanView {
    bar: ProgressBar,
    counters: ScanCounters,
    total: u64,
}

impl ScanView {
    pub fn new(total: u64, quiet: bool) -> Self {
        let bar = if quiet {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total)
        };
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
            .unwrap()
            .progress_chars("█▓▒░ ");
        bar.set_style(style);
        bar.set_message("searching images...");

        Self {
            bar,
            counters: ScanCounters::default(),
            total,
        }
    }

    pub fn apply(&mut self, event: &ProgressEvent) {
        self.counters.absorb(event);
        self.bar
            .set_position((event.fraction * self.total as f64).round() as u64);
        self.bar.set_message(format!(
            "{} {} {}",
            format!("found: {}", self.counters.found).green(),
            format!("skipped: {}", self.counters.skipped).yellow(),
            format!("errors: {}", self.counters.errored).red(),
        ));
    }

    pub fn counters(&self) -> ScanCounters {
        self.counters
    }

    pub fn clear(&self) {
        self.bar.finish_and_clear();
    }
}

/// Drains progress events until the scan side hangs up, then clears the
/// bar. Returns the final counters.
pub fn render_scan(receiver: Receiver<ProgressEvent>, total: u64, quiet: bool) -> ScanCounters {
    let mut view = ScanView::new(total, quiet);

    for event in receiver {
        view.apply(&event);
    }

    view.clear();
    view.counters()
}

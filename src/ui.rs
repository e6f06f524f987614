//! Terminal tempo monitor.
//!
//! A 1 Hz reporting loop polls the shared [`TempoHandle`] and renders
//! BPM, sync, and run state on an indicatif spinner. It reads only the
//! three atomic output fields, so it can never stall the pulse handler.

use crate::tempo::TempoHandle;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub fn create_tempo_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{prefix:.bold.dim} {spinner} {wide_msg}")
            .unwrap(),
    );
    pb.set_prefix("Tempo");
    pb
}

/// Formats the monitor line the way the clock display prints it.
pub fn format_tempo(bpm: f64, synced: bool, running: bool) -> String {
    let state = if running { "running" } else { "stopped" };
    if synced {
        format!("{:.2} bpm [{}]", bpm, state)
    } else {
        format!("{:.2} bpm (no sync) [{}]", bpm, state)
    }
}

/// Polls the handle once per second forever.
pub fn run_tempo_monitor(handle: Arc<TempoHandle>) {
    let spinner = create_tempo_spinner();
    loop {
        thread::sleep(Duration::from_secs(1));
        spinner.set_message(format_tempo(handle.bpm(), handle.synced(), handle.running()));
        spinner.tick();
    }
}

//! Tempo estimation from MIDI clock pulse timing.
//!
//! The estimator smooths the inter-arrival times of the last quarter
//! note's worth of pulses into a BPM figure. It deliberately keeps
//! tracking while the transport is stopped, so the estimate is warm the
//! moment playback resumes.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Instant;

use log::trace;

/// Tempo assumed before any pulses have been measured.
pub const DEFAULT_BPM: f64 = 120.0;

/// One quarter note's worth of inter-pulse intervals (24 PPQ).
const SAMPLE_WINDOW: usize = 24;

/// Derives a smoothed BPM estimate from clock pulse arrival times.
///
/// Owned exclusively by the event sink; the polling side reads through a
/// [`TempoHandle`] instead.
#[derive(Debug)]
pub struct TempoEstimator {
    samples: VecDeque<f64>,
    last_pulse: Option<Instant>,
    bpm: f64,
    synced: bool,
}

impl TempoEstimator {
    pub fn new() -> Self {
        Self::with_bpm(DEFAULT_BPM)
    }

    /// Starts from a caller-supplied tempo, reported until enough pulses
    /// have arrived to measure the real one.
    pub fn with_bpm(bpm: f64) -> Self {
        TempoEstimator {
            samples: VecDeque::with_capacity(SAMPLE_WINDOW),
            last_pulse: None,
            bpm,
            synced: false,
        }
    }

    /// Records one clock pulse and returns the current BPM estimate.
    ///
    /// The very first pulse has no predecessor and contributes no sample;
    /// with fewer than two samples the estimate keeps its prior value and
    /// `synced` stays false.
    pub fn on_clock_pulse(&mut self, at: Instant) -> f64 {
        if let Some(last) = self.last_pulse {
            if self.samples.len() == SAMPLE_WINDOW {
                self.samples.pop_front();
            }
            self.samples.push_back(at.duration_since(last).as_secs_f64());
        }
        self.last_pulse = Some(at);

        if self.samples.len() >= 2 {
            let mean = self.samples.iter().sum::<f64>() / self.samples.len() as f64;
            // 24 pulses per quarter note: bpm = 60 / (mean * 24) = 2.5 / mean.
            self.bpm = 2.5 / mean;
            self.synced = true;
            trace!("tempo estimate updated to {:.2} bpm", self.bpm);
        }
        self.bpm
    }

    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// False until at least two inter-pulse intervals have been measured.
    pub fn synced(&self) -> bool {
        self.synced
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }
}

impl Default for TempoEstimator {
    fn default() -> Self {
        Self::new()
    }
}

/// Lock-free snapshot of the estimator's output fields.
///
/// Written from the event-handling path, polled by the reporting loop.
/// Only these three fields are shared; the sample window itself stays
/// owned by the sink so readers can never stall a pulse handler.
#[derive(Debug)]
pub struct TempoHandle {
    bpm_bits: AtomicU64,
    synced: AtomicBool,
    running: AtomicBool,
}

impl TempoHandle {
    pub fn new() -> Self {
        TempoHandle {
            bpm_bits: AtomicU64::new(DEFAULT_BPM.to_bits()),
            synced: AtomicBool::new(false),
            // Permissive default: the transport is assumed running until
            // a Stop message says otherwise.
            running: AtomicBool::new(true),
        }
    }

    pub fn set_bpm(&self, bpm: f64) {
        self.bpm_bits.store(bpm.to_bits(), Ordering::SeqCst);
    }

    pub fn bpm(&self) -> f64 {
        f64::from_bits(self.bpm_bits.load(Ordering::SeqCst))
    }

    pub fn set_synced(&self, synced: bool) {
        self.synced.store(synced, Ordering::SeqCst);
    }

    pub fn synced(&self) -> bool {
        self.synced.load(Ordering::SeqCst)
    }

    pub fn set_running(&self, running: bool) {
        self.running.store(running, Ordering::SeqCst);
    }

    pub fn running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

impl Default for TempoHandle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn first_pulse_adds_no_sample() {
        let mut estimator = TempoEstimator::new();
        let bpm = estimator.on_clock_pulse(Instant::now());
        assert_eq!(bpm, DEFAULT_BPM);
        assert_eq!(estimator.sample_count(), 0);
        assert!(!estimator.synced());
    }

    #[test]
    fn handle_round_trips_bpm_bits() {
        let handle = TempoHandle::new();
        assert_eq!(handle.bpm(), DEFAULT_BPM);
        assert!(!handle.synced());
        assert!(handle.running());

        handle.set_bpm(133.25);
        handle.set_synced(true);
        handle.set_running(false);
        assert_eq!(handle.bpm(), 133.25);
        assert!(handle.synced());
        assert!(!handle.running());
    }

    #[test]
    fn custom_initial_bpm_holds_until_synced() {
        let mut estimator = TempoEstimator::with_bpm(90.0);
        let base = Instant::now();
        assert_eq!(estimator.on_clock_pulse(base), 90.0);
        assert_eq!(
            estimator.on_clock_pulse(base + Duration::from_millis(20)),
            90.0
        );
        assert!(!estimator.synced());
    }
}

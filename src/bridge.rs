//! Tempo propagation into a downstream scheduling engine.
//!
//! The display/sync variant of the clock sink: no position tracking, it
//! only relays the smoothed tempo and run/suspend signals to whatever
//! timing engine sits downstream.

use crate::clock::{ClockEvent, ClockEventKind, ClockSink};
use crate::tempo::{TempoEstimator, TempoHandle};
use log::info;
use std::sync::Arc;

/// The downstream scheduler/clock abstraction the bridge drives.
pub trait TempoReceiver: Send {
    /// New smoothed tempo estimate, sent on every pulse once synced.
    fn set_tempo(&mut self, bpm: f64);
    /// Transport started or continued; leave suspension.
    fn resume(&mut self);
    /// Transport stopped; hold until resumed.
    fn hold(&mut self);
}

/// Forwards estimated tempo and transport signals downstream.
pub struct ClockSyncBridge<R: TempoReceiver> {
    tempo: TempoEstimator,
    downstream: R,
}

impl<R: TempoReceiver> ClockSyncBridge<R> {
    pub fn new(initial_bpm: f64, downstream: R) -> Self {
        ClockSyncBridge {
            tempo: TempoEstimator::with_bpm(initial_bpm),
            downstream,
        }
    }

    pub fn bpm(&self) -> f64 {
        self.tempo.bpm()
    }

    pub fn synced(&self) -> bool {
        self.tempo.synced()
    }

    pub fn downstream(&self) -> &R {
        &self.downstream
    }
}

impl<R: TempoReceiver> ClockSink for ClockSyncBridge<R> {
    fn handle_event(&mut self, event: ClockEvent) {
        match event.kind {
            ClockEventKind::Clock => {
                let bpm = self.tempo.on_clock_pulse(event.at);
                if self.tempo.synced() {
                    self.downstream.set_tempo(bpm);
                }
            }
            ClockEventKind::Start | ClockEventKind::Continue => {
                info!("clock sync resumed");
                self.downstream.resume();
            }
            ClockEventKind::Stop => {
                info!("clock sync held");
                self.downstream.hold();
            }
        }
    }
}

/// The reporting handle doubles as a downstream receiver in display
/// mode: tempo and run state land in the atomics the monitor polls.
impl TempoReceiver for Arc<TempoHandle> {
    fn set_tempo(&mut self, bpm: f64) {
        self.set_bpm(bpm);
        self.set_synced(true);
    }

    fn resume(&mut self) {
        self.set_running(true);
    }

    fn hold(&mut self) {
        self.set_running(false);
    }
}

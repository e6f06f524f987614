//! Step sequencer driven by an external MIDI clock.
//!
//! A fixed 6x8 grid of steps cycles once per eight quarter notes. Each
//! clock pulse advances the transport position by exactly 1/24; when the
//! position lands on a whole quarter note, the active column fires the
//! percussion notes of every enabled lane.

use crate::clock::{ClockEvent, ClockEventKind, ClockSink};
use crate::fraction::Fraction;
use crate::midi::MidiMessage;
use crate::tempo::{TempoEstimator, TempoHandle};
use crate::transport::TransportState;
use crossbeam::channel::Sender;
use log::{debug, warn};
use std::sync::Arc;

/// Steps per quarter-note cycle.
pub const WIDTH: usize = 8;
/// Instrument lanes.
pub const HEIGHT: usize = 6;

/// Fixed velocity for triggered steps.
pub const STEP_VELOCITY: u8 = 112;
/// Channel index 9, i.e. MIDI channel 10 (General MIDI percussion).
pub const PERCUSSION_CHANNEL: u8 = 9;

/// Row = lane, column = step within the 8-step cycle.
pub type BeatMatrix = [[bool; WIDTH]; HEIGHT];

/// One MIDI note number per lane.
pub type NoteMap = [u8; HEIGHT];

/// General MIDI percussion: kick, snare, clap, closed hat, open hat, ride.
pub const DEFAULT_NOTE_MAP: NoteMap = [36, 40, 39, 42, 46, 51];

/// Kick and ride on every step, middle lanes silent.
pub fn default_beat_matrix() -> BeatMatrix {
    let mut matrix = [[false; WIDTH]; HEIGHT];
    matrix[0] = [true; WIDTH];
    matrix[HEIGHT - 1] = [true; WIDTH];
    matrix
}

/// The sequencer variant of the clock sink.
///
/// Owns the transport position and a tempo estimator; emits NoteOn
/// messages synchronously from the pulse handler. No NoteOff is ever
/// sent: the pattern targets one-shot percussion patches.
pub struct BeatSequencer {
    matrix: BeatMatrix,
    note_map: NoteMap,
    transport: TransportState,
    tempo: TempoEstimator,
    note_tx: Sender<MidiMessage>,
    handle: Arc<TempoHandle>,
}

impl BeatSequencer {
    pub fn new(initial_bpm: f64, note_tx: Sender<MidiMessage>, handle: Arc<TempoHandle>) -> Self {
        Self::with_pattern(
            default_beat_matrix(),
            DEFAULT_NOTE_MAP,
            initial_bpm,
            note_tx,
            handle,
        )
    }

    pub fn with_pattern(
        matrix: BeatMatrix,
        note_map: NoteMap,
        initial_bpm: f64,
        note_tx: Sender<MidiMessage>,
        handle: Arc<TempoHandle>,
    ) -> Self {
        handle.set_bpm(initial_bpm);
        BeatSequencer {
            matrix,
            note_map,
            transport: TransportState::new(),
            tempo: TempoEstimator::with_bpm(initial_bpm),
            note_tx,
            handle,
        }
    }

    /// Quarter notes elapsed since the last Start.
    pub fn position(&self) -> Fraction {
        self.transport.position()
    }

    pub fn running(&self) -> bool {
        self.transport.running()
    }

    pub fn bpm(&self) -> f64 {
        self.tempo.bpm()
    }

    pub fn synced(&self) -> bool {
        self.tempo.synced()
    }

    /// Inter-pulse intervals currently held by the tempo estimator.
    pub fn tempo_sample_count(&self) -> usize {
        self.tempo.sample_count()
    }

    /// 1-indexed measure number for a quarter-note denominated time
    /// signature (4/4 is `Fraction::new(4, 4)`).
    pub fn measure(&self, time_sig: Fraction) -> u64 {
        self.transport.measure(time_sig)
    }

    /// 1-indexed beat within the current measure.
    pub fn beat(&self, time_sig: Fraction) -> u64 {
        self.transport.beat(time_sig)
    }

    fn on_pulse(&mut self, event: ClockEvent) {
        // Tempo tracking is independent of the transport run state.
        self.tempo.on_clock_pulse(event.at);
        self.handle.set_bpm(self.tempo.bpm());
        self.handle.set_synced(self.tempo.synced());

        let Some(position) = self.transport.advance_pulse() else {
            return;
        };
        if position.is_whole() {
            let step = (position.floor() % WIDTH as u64) as usize;
            self.trigger_step(step);
        }
    }

    fn trigger_step(&mut self, step: usize) {
        debug!("quarter note boundary, step {}", step);
        for lane in 0..HEIGHT {
            if !self.matrix[lane][step] {
                continue;
            }
            let msg = MidiMessage::NoteOn {
                channel: PERCUSSION_CHANNEL,
                note: self.note_map[lane],
                velocity: STEP_VELOCITY,
            };
            if self.note_tx.send(msg).is_err() {
                warn!("note channel disconnected, dropping trigger");
                return;
            }
        }
    }
}

impl ClockSink for BeatSequencer {
    fn handle_event(&mut self, event: ClockEvent) {
        match event.kind {
            ClockEventKind::Clock => self.on_pulse(event),
            kind => {
                self.transport.on_transport_event(kind);
                self.handle.set_running(self.transport.running());
            }
        }
    }
}

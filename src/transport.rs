//! Transport run state and exact musical position.

use crate::clock::{ClockEventKind, PULSES_PER_QUARTER_NOTE};
use crate::fraction::Fraction;
use log::info;

/// Tracks whether the clock master is running and how many quarter notes
/// have elapsed since the last Start.
///
/// Position is an exact fraction so that the quarter-note boundary test
/// stays precise no matter how many pulses accumulate.
#[derive(Debug)]
pub struct TransportState {
    running: bool,
    position: Fraction,
}

impl TransportState {
    pub fn new() -> Self {
        TransportState {
            // Permissive default: pulses advance the position until a
            // Stop message arrives, even before any Start.
            running: true,
            position: Fraction::ZERO,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    /// Quarter notes elapsed since the last Start.
    pub fn position(&self) -> Fraction {
        self.position
    }

    /// Applies a Start/Continue/Stop message.
    ///
    /// Start resets the position; Continue and Stop leave it untouched.
    /// Clock pulses are not handled here.
    pub fn on_transport_event(&mut self, kind: ClockEventKind) {
        match kind {
            ClockEventKind::Start => {
                self.running = true;
                self.position = Fraction::ZERO;
                info!("transport started, position reset");
            }
            ClockEventKind::Continue => {
                self.running = true;
                info!("transport resumed at position {}", self.position);
            }
            ClockEventKind::Stop => {
                self.running = false;
                info!("transport stopped at position {}", self.position);
            }
            ClockEventKind::Clock => {}
        }
    }

    /// Advances the position by one pulse (1/24 quarter note) and returns
    /// the new position, or `None` when stopped.
    pub fn advance_pulse(&mut self) -> Option<Fraction> {
        if !self.running {
            return None;
        }
        self.position += Fraction::new(1, u64::from(PULSES_PER_QUARTER_NOTE));
        Some(self.position)
    }

    /// 1-indexed measure number for the given time signature.
    ///
    /// The time signature is quarter-note denominated: 4/4 is
    /// `Fraction::new(4, 4)`, so a measure spans `time_sig * 4` quarter
    /// notes.
    pub fn measure(&self, time_sig: Fraction) -> u64 {
        let quarter_notes_in_measure = time_sig * Fraction::from(4);
        (self.position / quarter_notes_in_measure).floor() + 1
    }

    /// 1-indexed beat within the current measure.
    pub fn beat(&self, time_sig: Fraction) -> u64 {
        let quarter_notes_in_measure = time_sig * Fraction::from(4);
        (self.position % quarter_notes_in_measure).floor() + 1
    }
}

impl Default for TransportState {
    fn default() -> Self {
        Self::new()
    }
}

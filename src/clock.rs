//! Clock event types shared by every event sink.
//!
//! A MIDI clock master sends 24 timing pulses per quarter note, plus
//! Start/Continue/Stop transport messages. The external transport decodes
//! the wire bytes; the core only ever sees these typed events.

use crate::midi::MidiMessage;
use std::time::Instant;

/// MIDI standard PPQ (Pulses Per Quarter Note).
pub const PULSES_PER_QUARTER_NOTE: u32 = 24;

/// The event types the clock core reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEventKind {
    /// Timing pulse, 24 per quarter note.
    Clock,
    /// Begin playback from position zero.
    Start,
    /// Resume playback from the current position.
    Continue,
    /// Halt playback, keeping the current position.
    Stop,
}

/// A typed transport/clock event with its arrival instant.
///
/// The timestamp is taken from the monotonic clock inside the transport's
/// receive callback, so inter-pulse intervals are not skewed by queueing.
#[derive(Debug, Clone, Copy)]
pub struct ClockEvent {
    pub kind: ClockEventKind,
    pub at: Instant,
}

impl ClockEvent {
    pub fn new(kind: ClockEventKind, at: Instant) -> Self {
        ClockEvent { kind, at }
    }

    /// Maps a decoded MIDI message to a clock event.
    ///
    /// Returns `None` for messages the clock core does not care about;
    /// unknown messages are dropped rather than treated as errors.
    pub fn from_midi(msg: &MidiMessage, at: Instant) -> Option<ClockEvent> {
        let kind = match msg {
            MidiMessage::Clock => ClockEventKind::Clock,
            MidiMessage::Start => ClockEventKind::Start,
            MidiMessage::Continue => ClockEventKind::Continue,
            MidiMessage::Stop => ClockEventKind::Stop,
            _ => return None,
        };
        Some(ClockEvent { kind, at })
    }
}

/// A component that consumes clock events one at a time.
///
/// The transport invokes the sink on its own delivery thread; handlers
/// must finish in bounded time and never block or sleep.
pub trait ClockSink {
    fn handle_event(&mut self, event: ClockEvent);
}

//! Pump decoded MIDI messages into a clock sink.

use crate::clock::{ClockEvent, ClockSink};
use crate::midi::MidiEngine;
use log::{error, info};

/// Delivers events from `engine` to `sink` until the engine reports a
/// receive failure (typically device disconnect).
///
/// Events are dispatched one at a time in arrival order; messages the
/// clock core does not model are dropped here. There is no watchdog for
/// missing pulses: a silent clock master simply leaves the tempo
/// estimate stale.
pub fn run_event_loop<E, S>(engine: E, sink: &mut S)
where
    E: MidiEngine,
    S: ClockSink,
{
    info!("clock event loop started");
    loop {
        match engine.recv() {
            Ok((msg, at)) => {
                if let Some(event) = ClockEvent::from_midi(&msg, at) {
                    sink.handle_event(event);
                }
            }
            Err(e) => {
                error!("MIDI receive failed: {}", e);
                break;
            }
        }
    }
    info!("clock event loop stopped");
}

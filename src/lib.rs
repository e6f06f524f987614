//! padbeatsrs: MIDI clock sync, tempo estimation, and step sequencing.
//!
//! An external MIDI clock master drives everything. The core derives a
//! smoothed BPM estimate from pulse timing ([`tempo`]), tracks transport
//! run state and an exact fractional position ([`transport`],
//! [`fraction`]), and either fires a fixed percussion pattern at
//! quarter-note boundaries ([`sequencer`]) or relays the tempo to a
//! downstream timing engine ([`bridge`]).

pub mod bridge;
pub mod cli;
pub mod clock;
pub mod event_loop;
pub mod fraction;
pub mod logging;
pub mod midi;
pub mod scheduler;
pub mod sequencer;
pub mod tempo;
pub mod transport;
pub mod ui;

pub use scheduler::{Scheduler, ThreadScheduler};

pub fn create_scheduler() -> ThreadScheduler {
    ThreadScheduler::new()
}

/// Names of the MIDI input ports currently available.
pub fn handle_device_list() -> Vec<String> {
    midi::MidirEngine::list_input_ports()
}

//! MIDI transport glue.
//!
//! This module owns everything that touches wire bytes or device ports,
//! so the clock core only ever deals in typed events:
//! - [`MidiMessage`] decoding/encoding and [`MidiError`] handling
//! - [`MidiEngine`] trait for timestamped message delivery
//! - [`MidirEngine`] for real device input via midir
//! - [`MockMidiEngine`] for scripted tests
//! - [`MidiOutputManager`] and the output thread for note transmission

mod engine;
pub mod midir_engine;
pub mod mock_engine;
mod output;

pub use engine::{MidiEngine, MidiError, MidiMessage, Result};
pub use midir_engine::MidirEngine;
pub use mock_engine::MockMidiEngine;
pub use output::{run_midi_output_thread, MidiOutputManager};

/// Set default engine type
pub type DefaultMidiEngine = MidirEngine;

use crate::midi::{MidiEngine, MidiError, MidiMessage, Result};
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Instant;

/// Scripted MIDI input for tests.
///
/// Delivers a fixed sequence of timestamped messages, then reports a
/// receive error the way a disconnected device would.
pub struct MockMidiEngine {
    script: Mutex<VecDeque<(MidiMessage, Instant)>>,
}

impl MockMidiEngine {
    pub fn new(script: Vec<(MidiMessage, Instant)>) -> Self {
        MockMidiEngine {
            script: Mutex::new(script.into()),
        }
    }
}

impl MidiEngine for MockMidiEngine {
    fn recv(&self) -> Result<(MidiMessage, Instant)> {
        self.script
            .lock()
            .map_err(|_| MidiError::RecvError("mock script poisoned".to_string()))?
            .pop_front()
            .ok_or_else(|| MidiError::RecvError("mock script exhausted".to_string()))
    }

    fn list_devices(&self) -> Vec<String> {
        vec!["Mock Device 1".to_string(), "Mock Device 2".to_string()]
    }
}

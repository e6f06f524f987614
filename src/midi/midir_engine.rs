use crate::midi::{MidiEngine, MidiError, MidiMessage, Result};
use crossbeam::channel::{unbounded, Receiver, Sender};
use log::{debug, info};
use midir::{Ignore, MidiInput, MidiInputConnection};
use std::time::Instant;

/// MIDI input via midir.
///
/// The driver callback decodes each message, stamps it with the
/// monotonic clock, and pushes it onto an unbounded crossbeam channel;
/// the send never blocks, so a slow consumer cannot delay the driver.
pub struct MidirEngine {
    #[allow(dead_code)]
    input: MidiInputConnection<()>,
    rx: Receiver<(MidiMessage, Instant)>,
}

impl MidirEngine {
    /// Connects to the first input port whose name contains `device_name`.
    pub fn new(device_name: &str) -> Result<Self> {
        let mut midi_in = MidiInput::new("padbeatsrs-in")?;
        // Clock bytes are ignored by default; we need all of them.
        midi_in.ignore(Ignore::None);

        let in_ports = midi_in.ports();
        let in_port = in_ports
            .iter()
            .find(|p| {
                midi_in
                    .port_name(p)
                    .unwrap_or_default()
                    .contains(device_name)
            })
            .ok_or_else(|| MidiError::DeviceNotFound(device_name.to_string()))?;

        info!(
            "connecting to MIDI input port: {}",
            midi_in.port_name(in_port)?
        );

        let (tx, rx): (Sender<(MidiMessage, Instant)>, _) = unbounded();
        let input = midi_in.connect(
            in_port,
            "padbeatsrs-input",
            move |_stamp, bytes, _| {
                let at = Instant::now();
                if let Some(msg) = MidiMessage::parse(bytes) {
                    let _ = tx.send((msg, at));
                } else {
                    debug!("ignoring unrecognized MIDI bytes: {:02X?}", bytes);
                }
            },
            (),
        )?;

        Ok(MidirEngine { input, rx })
    }

    /// Names of all input ports currently visible to midir.
    pub fn list_input_ports() -> Vec<String> {
        let mut devices = Vec::new();
        if let Ok(midi_in) = MidiInput::new("padbeatsrs-list") {
            for port in midi_in.ports() {
                if let Ok(name) = midi_in.port_name(&port) {
                    devices.push(name);
                }
            }
        }
        devices
    }
}

impl MidiEngine for MidirEngine {
    fn recv(&self) -> Result<(MidiMessage, Instant)> {
        Ok(self.rx.recv()?)
    }

    fn list_devices(&self) -> Vec<String> {
        Self::list_input_ports()
    }
}

use crate::midi::{MidiError, MidiMessage, Result};
use crossbeam::channel::Receiver;
use log::{debug, error, info};
use midir::{MidiOutput, MidiOutputConnection};
use std::thread;

/// Owns the outbound MIDI connection.
///
/// The sequencer never touches the port directly; it drops messages on a
/// channel and this manager transmits them from its own thread.
pub struct MidiOutputManager {
    connection: Option<MidiOutputConnection>,
}

impl MidiOutputManager {
    pub fn new() -> Self {
        MidiOutputManager { connection: None }
    }

    pub fn connect_to_first_available(&mut self) -> Result<()> {
        let midi_out = MidiOutput::new("padbeatsrs-out")?;

        let out_ports = midi_out.ports();
        let port = out_ports
            .first()
            .ok_or_else(|| MidiError::DeviceNotFound("no output ports".to_string()))?;
        let port_name = midi_out.port_name(port)?;

        info!("connecting to MIDI output port: {}", port_name);
        self.connection = Some(midi_out.connect(port, "padbeatsrs-output")?);
        Ok(())
    }

    pub fn connect_to_device(&mut self, device_name: &str) -> Result<()> {
        let midi_out = MidiOutput::new("padbeatsrs-out")?;

        let out_ports = midi_out.ports();
        let port = out_ports
            .iter()
            .find(|p| {
                midi_out
                    .port_name(p)
                    .unwrap_or_default()
                    .contains(device_name)
            })
            .ok_or_else(|| MidiError::DeviceNotFound(device_name.to_string()))?;
        let port_name = midi_out.port_name(port)?;

        info!("connecting to MIDI output port: {}", port_name);
        self.connection = Some(midi_out.connect(port, "padbeatsrs-output")?);
        Ok(())
    }

    pub fn send(&mut self, message: &MidiMessage) -> Result<()> {
        let conn = self
            .connection
            .as_mut()
            .ok_or_else(|| MidiError::SendError("MIDI output not connected".to_string()))?;

        debug!("sending MIDI message: {:?}", message);
        conn.send(&message.to_bytes())?;
        Ok(())
    }

    /// Names of all output ports currently visible to midir.
    pub fn list_output_ports() -> Vec<String> {
        let mut devices = Vec::new();
        if let Ok(midi_out) = MidiOutput::new("padbeatsrs-list-out") {
            for port in midi_out.ports() {
                if let Ok(name) = midi_out.port_name(&port) {
                    devices.push(name);
                }
            }
        }
        devices
    }
}

impl Default for MidiOutputManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the output thread: connect, then transmit everything arriving
/// on `rx` until the sending side hangs up.
pub fn run_midi_output_thread(rx: Receiver<MidiMessage>, device_name: Option<String>) {
    thread::spawn(move || {
        let mut output = MidiOutputManager::new();
        let connected = match device_name {
            Some(name) => output.connect_to_device(&name),
            None => output.connect_to_first_available(),
        };
        if let Err(e) = connected {
            error!("MIDI output unavailable: {}", e);
            return;
        }

        info!("MIDI output thread started");
        while let Ok(message) = rx.recv() {
            if let Err(e) = output.send(&message) {
                error!("failed to send MIDI message: {}", e);
            }
        }
        info!("MIDI output thread stopping");
    });
}

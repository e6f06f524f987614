use crossbeam::channel::unbounded;
use padbeatsrs::event_loop::run_event_loop;
use padbeatsrs::fraction::Fraction;
use padbeatsrs::midi::{MidiMessage, MockMidiEngine};
use padbeatsrs::sequencer::BeatSequencer;
use padbeatsrs::tempo::TempoHandle;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Start, one quarter note of pulses at 120 bpm, an unrelated note
/// message mixed in, then Stop.
fn scripted_session() -> Vec<(MidiMessage, Instant)> {
    let base = Instant::now();
    let mut at = base;
    let mut script = vec![(MidiMessage::Start, at)];

    for i in 0..24 {
        at = base + Duration::from_secs_f64((i + 1) as f64 / 48.0);
        script.push((MidiMessage::Clock, at));
        if i == 10 {
            // Unknown-to-the-core traffic must be ignored, not fatal.
            script.push((
                MidiMessage::NoteOn {
                    channel: 0,
                    note: 60,
                    velocity: 100,
                },
                at,
            ));
        }
    }
    script.push((MidiMessage::Stop, at));
    script
}

#[test]
fn pumps_a_scripted_session_into_the_sequencer() {
    let engine = MockMidiEngine::new(scripted_session());
    let (note_tx, note_rx) = unbounded();
    let handle = Arc::new(TempoHandle::new());
    let mut sequencer = BeatSequencer::new(120.0, note_tx, handle.clone());

    // The loop returns once the mock script is exhausted.
    run_event_loop(engine, &mut sequencer);

    assert_eq!(sequencer.position(), Fraction::from(1));
    assert!(!sequencer.running());
    assert!(sequencer.synced());
    assert!((sequencer.bpm() - 120.0).abs() < 1e-3);

    // Exactly one quarter-note boundary: kick and ride.
    let notes: Vec<_> = note_rx.try_iter().collect();
    assert_eq!(notes.len(), 2);
    assert!(matches!(
        notes[0],
        MidiMessage::NoteOn {
            channel: 9,
            note: 36,
            velocity: 112,
        }
    ));
    assert!(matches!(
        notes[1],
        MidiMessage::NoteOn {
            channel: 9,
            note: 51,
            velocity: 112,
        }
    ));
}

#[test]
fn transport_only_script_leaves_position_untouched() {
    let at = Instant::now();
    let engine = MockMidiEngine::new(vec![
        (MidiMessage::Start, at),
        (MidiMessage::Stop, at),
        (MidiMessage::Continue, at),
    ]);
    let (note_tx, note_rx) = unbounded();
    let handle = Arc::new(TempoHandle::new());
    let mut sequencer = BeatSequencer::new(120.0, note_tx, handle);

    run_event_loop(engine, &mut sequencer);

    assert_eq!(sequencer.position(), Fraction::ZERO);
    assert!(sequencer.running());
    assert!(note_rx.try_iter().next().is_none());
}

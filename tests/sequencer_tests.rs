use crossbeam::channel::{unbounded, Receiver};
use padbeatsrs::clock::{ClockEvent, ClockEventKind, ClockSink};
use padbeatsrs::fraction::Fraction;
use padbeatsrs::midi::MidiMessage;
use padbeatsrs::sequencer::{BeatSequencer, BeatMatrix, HEIGHT, WIDTH};
use padbeatsrs::tempo::TempoHandle;
use std::sync::Arc;
use std::time::{Duration, Instant};

struct Harness {
    sequencer: BeatSequencer,
    notes: Receiver<MidiMessage>,
    handle: Arc<TempoHandle>,
    now: Instant,
}

impl Harness {
    fn new() -> Self {
        let (tx, rx) = unbounded();
        let handle = Arc::new(TempoHandle::new());
        Harness {
            sequencer: BeatSequencer::new(120.0, tx, handle.clone()),
            notes: rx,
            handle,
            now: Instant::now(),
        }
    }

    fn with_pattern(matrix: BeatMatrix, note_map: [u8; HEIGHT]) -> Self {
        let (tx, rx) = unbounded();
        let handle = Arc::new(TempoHandle::new());
        Harness {
            sequencer: BeatSequencer::with_pattern(matrix, note_map, 120.0, tx, handle.clone()),
            notes: rx,
            handle,
            now: Instant::now(),
        }
    }

    fn pulse(&mut self) {
        // 120 bpm pulse spacing; the exact value only matters to the
        // tempo estimator, not to position tracking.
        self.now += Duration::from_secs_f64(1.0 / 48.0);
        self.sequencer
            .handle_event(ClockEvent::new(ClockEventKind::Clock, self.now));
    }

    fn pulses(&mut self, count: usize) {
        for _ in 0..count {
            self.pulse();
        }
    }

    fn send(&mut self, kind: ClockEventKind) {
        self.sequencer.handle_event(ClockEvent::new(kind, self.now));
    }

    fn drain_notes(&self) -> Vec<MidiMessage> {
        self.notes.try_iter().collect()
    }
}

#[test]
fn default_pattern_full_measure_fires_kick_and_ride() {
    let mut h = Harness::new();
    h.send(ClockEventKind::Start);

    // Eight quarter notes, drained one boundary at a time.
    for quarter in 1..=8u64 {
        h.pulses(24);
        assert_eq!(h.sequencer.position(), Fraction::from(quarter));

        let notes = h.drain_notes();
        assert_eq!(notes.len(), 2, "quarter note {} trigger count", quarter);
        for msg in &notes {
            match msg {
                MidiMessage::NoteOn {
                    channel,
                    note,
                    velocity,
                } => {
                    assert_eq!(*channel, 9);
                    assert_eq!(*velocity, 112);
                    assert!(*note == 36 || *note == 51, "unexpected note {}", note);
                }
                other => panic!("unexpected message: {:?}", other),
            }
        }
        // Both lanes, kick before ride within a step.
        assert!(matches!(notes[0], MidiMessage::NoteOn { note: 36, .. }));
        assert!(matches!(notes[1], MidiMessage::NoteOn { note: 51, .. }));
    }
}

#[test]
fn no_notes_between_quarter_note_boundaries() {
    let mut h = Harness::new();
    h.send(ClockEventKind::Start);
    h.pulses(23);
    assert!(h.drain_notes().is_empty());
    h.pulse();
    assert_eq!(h.drain_notes().len(), 2);
}

#[test]
fn step_cycles_through_all_eight_columns() {
    // One lane with a single active step makes the column order visible:
    // the k-th quarter note after Start lands on step k % 8.
    let mut matrix = [[false; WIDTH]; HEIGHT];
    matrix[2][3] = true;
    let mut h = Harness::with_pattern(matrix, [36, 40, 39, 42, 46, 51]);
    h.send(ClockEventKind::Start);

    let mut fired_at = Vec::new();
    for quarter in 1..=16u64 {
        h.pulses(24);
        if !h.drain_notes().is_empty() {
            fired_at.push(quarter);
        }
    }
    assert_eq!(fired_at, vec![3, 11]);
}

#[test]
fn stopped_pulses_keep_tempo_tracking_but_freeze_position() {
    let mut h = Harness::new();
    h.send(ClockEventKind::Start);
    h.pulses(10);
    assert_eq!(h.sequencer.position(), Fraction::new(10, 24));
    let samples_running = h.sequencer.tempo_sample_count();

    h.send(ClockEventKind::Stop);
    assert!(!h.sequencer.running());
    h.pulses(5);

    // Position frozen, no notes, but the timing window kept filling.
    assert_eq!(h.sequencer.position(), Fraction::new(10, 24));
    assert!(h.drain_notes().is_empty());
    assert_eq!(h.sequencer.tempo_sample_count(), samples_running + 5);

    h.send(ClockEventKind::Continue);
    h.pulses(10);
    assert_eq!(h.sequencer.position(), Fraction::new(20, 24));
}

#[test]
fn start_after_stop_resets_position() {
    let mut h = Harness::new();
    h.send(ClockEventKind::Start);
    h.pulses(10);
    h.send(ClockEventKind::Stop);
    h.send(ClockEventKind::Start);
    h.pulses(10);
    assert_eq!(h.sequencer.position(), Fraction::new(10, 24));
}

#[test]
fn runs_by_default_before_any_start() {
    // Permissive default: a clock master that never sends Start still
    // advances the sequencer.
    let mut h = Harness::new();
    assert!(h.sequencer.running());
    h.pulses(24);
    assert_eq!(h.sequencer.position(), Fraction::from(1));
    assert_eq!(h.drain_notes().len(), 2);
}

#[test]
fn measure_and_beat_are_one_indexed() {
    let mut h = Harness::new();
    let four_four = Fraction::new(4, 4);
    h.send(ClockEventKind::Start);

    assert_eq!(h.sequencer.measure(four_four), 1);
    assert_eq!(h.sequencer.beat(four_four), 1);

    h.pulses(7 * 24);
    assert_eq!(h.sequencer.position(), Fraction::from(7));
    assert_eq!(h.sequencer.measure(four_four), 2);
    assert_eq!(h.sequencer.beat(four_four), 4);
}

#[test]
fn long_run_has_no_positional_drift() {
    let mut h = Harness::new();
    h.send(ClockEventKind::Start);

    h.pulses(10_000);
    assert_eq!(h.sequencer.position(), Fraction::new(10_000, 24));

    // 416 boundaries, two notes each.
    assert_eq!(h.drain_notes().len(), 416 * 2);
}

#[test]
fn publishes_tempo_and_run_state_to_handle() {
    let mut h = Harness::new();
    h.pulses(5);
    assert!(h.handle.synced());
    assert!((h.handle.bpm() - 120.0).abs() < 1e-3);

    h.send(ClockEventKind::Stop);
    assert!(!h.handle.running());
    h.send(ClockEventKind::Continue);
    assert!(h.handle.running());
}

use clap::Parser;
use crossbeam::channel::unbounded;
use dialoguer::Select;
use padbeatsrs::{
    bridge::ClockSyncBridge,
    cli::{validate_device, Args},
    create_scheduler,
    event_loop::run_event_loop,
    handle_device_list,
    midi::{run_midi_output_thread, DefaultMidiEngine},
    sequencer::BeatSequencer,
    tempo::TempoHandle,
    ui::run_tempo_monitor,
    Scheduler,
};
use std::sync::Arc;
use std::{thread, time::Duration};

fn main() {
    initialize_logging();
    let args = Args::parse();
    let devices = handle_device_list();

    if args.device_list {
        list_available_devices(&devices);
        return;
    }

    let device_name = match resolve_input_device(&args, &devices) {
        Some(name) => name,
        None => {
            eprintln!("No MIDI input device available");
            std::process::exit(1);
        }
    };

    let engine = match DefaultMidiEngine::new(&device_name) {
        Ok(engine) => {
            log::info!("connected to MIDI device: {}", device_name);
            println!("Connected to MIDI device: {}", device_name);
            engine
        }
        Err(e) => {
            let error_msg = format!("Error connecting to MIDI device: {}", e);
            log::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
    };

    let scheduler = create_scheduler();
    let handle = Arc::new(TempoHandle::new());
    handle.set_bpm(args.bpm);

    if args.sequence {
        let (note_tx, note_rx) = unbounded();
        run_midi_output_thread(note_rx, args.midi_output.clone());

        let mut sequencer = BeatSequencer::new(args.bpm, note_tx, handle.clone());
        scheduler.spawn(move || run_event_loop(engine, &mut sequencer));
    } else {
        let mut bridge = ClockSyncBridge::new(args.bpm, handle.clone());
        scheduler.spawn(move || run_event_loop(engine, &mut bridge));
    }

    let monitor_handle = handle.clone();
    scheduler.spawn(move || run_tempo_monitor(monitor_handle));

    run_application_loop();
}

fn initialize_logging() {
    padbeatsrs::logging::init_logger().expect("Logger initialization failed");
    log::info!("Application starting");
}

fn list_available_devices(devices: &[String]) {
    println!("Available MIDI devices:");
    for device in devices {
        println!("  - {}", device);
    }
}

/// Uses `--bind-to-device` when given, otherwise asks interactively.
fn resolve_input_device(args: &Args, devices: &[String]) -> Option<String> {
    if let Some(device_name) = &args.bind_to_device {
        if let Err(error_msg) = validate_device(device_name, devices) {
            log::error!("{}", error_msg);
            eprintln!("{}", error_msg);
            std::process::exit(1);
        }
        return Some(device_name.clone());
    }

    if devices.is_empty() {
        return None;
    }
    let selection = Select::new()
        .with_prompt("Select MIDI input")
        .items(devices)
        .default(0)
        .interact()
        .ok()?;
    devices.get(selection).cloned()
}

fn run_application_loop() {
    log::info!("Application running. Press Ctrl+C to exit...");
    println!("\nPress Ctrl+C to exit...");
    loop {
        thread::sleep(Duration::from_secs(1));
    }
}

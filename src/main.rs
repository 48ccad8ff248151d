/* 3rd party libraries */
use clap::{Arg, Command};
use crossbeam_channel as cbc;
use log::{info, warn};
use std::fs::File;
use std::io::{BufRead, BufWriter};
use std::path::Path;
use std::thread::{sleep, Builder};
use std::time::Duration;

/* Custom libraries */
use smartstop::config::{self, Config};
use smartstop::input::{parse_command, Button, ButtonPanel, InputEvent};
use smartstop::report::{self, CycleRecord, JsonLinesWriter, RunSummary};
use smartstop::unwrap_or_exit;
use smartstop::{Action, Simulation, TrafficMode};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

/* Main */
fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let matches = Command::new("smartstop")
        .about("Single-car elevator dispatch simulator")
        .arg(
            Arg::new("config")
                .long("config")
                .takes_value(true)
                .default_value(DEFAULT_CONFIG_PATH)
                .help("Path to the TOML configuration"),
        )
        .arg(
            Arg::new("cycles")
                .long("cycles")
                .takes_value(true)
                .help("Stop after this many cycles and print a summary"),
        )
        .arg(Arg::new("seed").long("seed").takes_value(true).help("Seed for the random source"))
        .arg(
            Arg::new("traffic")
                .long("traffic")
                .takes_value(true)
                .possible_values(["low", "medium", "high"])
                .help("Traffic intensity"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .takes_value(true)
                .help("Write one JSON record per cycle to this file"),
        )
        .arg(Arg::new("fast").long("fast").help("Skip the pacing delays"))
        .get_matches();

    // Load the configuration
    let config_path = matches.value_of("config").unwrap_or(DEFAULT_CONFIG_PATH);
    let mut config = load_or_default(config_path);

    if let Some(seed) = matches.value_of("seed") {
        config.simulation.seed = Some(unwrap_or_exit!(seed.parse::<u64>(), "Invalid --seed"));
    }
    if let Some(traffic) = matches.value_of("traffic") {
        config.traffic.mode = unwrap_or_exit!(traffic.parse::<TrafficMode>(), "Invalid --traffic");
    }
    let max_cycles = match matches.value_of("cycles") {
        Some(cycles) => Some(unwrap_or_exit!(cycles.parse::<u64>(), "Invalid --cycles")),
        None => None,
    };
    let fast = matches.is_present("fast");

    let mut report_writer = match matches.value_of("report") {
        Some(path) => Some(JsonLinesWriter::new(BufWriter::new(File::create(path)?))),
        None => None,
    };

    // Start the console input thread, standing in for the physical buttons
    let (input_tx, input_rx) = cbc::unbounded::<InputEvent>();
    let input_thread = Builder::new().name("console_input".into());
    input_thread.spawn(move || read_console(input_tx))?;

    let mode = config.traffic.mode;
    let pacing = config.pacing.clone();
    let emergency_wait_threshold = config.dispatch.emergency_wait_threshold;
    let mut simulation = unwrap_or_exit!(Simulation::new(config), "Failed to start simulation");
    let mut panel = ButtonPanel::new();
    let mut summary = RunSummary::new();

    println!("SmartStop elevator simulator");
    println!("Commands: a (button A, onboard call) | b (button B, hall call) | i <floor> | e <floor> | q");

    'cycles: loop {
        // Sample inputs once per cycle
        let (mut a_pressed, mut b_pressed) = (false, false);
        for event in input_rx.try_iter() {
            match event {
                InputEvent::Press(Button::A) => a_pressed = true,
                InputEvent::Press(Button::B) => b_pressed = true,
                InputEvent::Manual(origin, floor) => {
                    if let Err(e) = simulation.raise_manual_call(origin, floor) {
                        warn!("Rejected manual call: {}", e);
                    }
                }
                InputEvent::Quit => break 'cycles,
            }
        }
        for button in panel.sample(a_pressed, b_pressed) {
            if let Some(floor) = simulation.press_button(button) {
                info!("[BUTTON {:?}] Request for floor {}", button, floor);
            }
        }
        // A console keystroke is a full press, released within the cycle
        panel.release();

        let cycle_report = simulation.tick(mode);

        println!("{}", report::render_header(cycle_report.cycle, simulation.elevator()));
        print!("{}", report::render_calls(simulation.calls(), emergency_wait_threshold));
        print!("{}", report::render_decision(&cycle_report));
        print!("{}", report::render_stats(simulation.stats()));

        let record = CycleRecord::from(&cycle_report);
        summary.record(&record);
        if let Some(writer) = report_writer.as_mut() {
            writer.write(&record)?;
        }

        if !fast {
            let mut pause = pacing.travel_time_ms * cycle_report.floors_travelled as u64 + pacing.cycle_pause_ms;
            if let Action::Stop { .. } = cycle_report.action {
                pause += pacing.door_time_ms;
            }
            sleep(Duration::from_millis(pause));
        }

        if max_cycles.map_or(false, |max| cycle_report.cycle >= max) {
            break;
        }
    }

    if let Some(writer) = report_writer.as_mut() {
        writer.flush()?;
    }
    println!("{}", summary);
    if let Some(rate) = simulation.stats().skip_rate() {
        println!("Skip rate:           {:.1} %", rate);
    }

    Ok(())
}

// A missing default file falls back to built-in defaults, an explicit path must exist
fn load_or_default(path: &str) -> Config {
    if path == DEFAULT_CONFIG_PATH && !Path::new(path).exists() {
        warn!("No {} found, using default settings", path);
        return Config::default();
    }
    unwrap_or_exit!(config::load_config(Path::new(path)), "Failed to load configuration")
}

fn read_console(input_tx: cbc::Sender<InputEvent>) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Error reading console input: {}", e);
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Some(event) => {
                let quit = event == InputEvent::Quit;
                if input_tx.send(event).is_err() || quit {
                    return;
                }
            }
            None => warn!("Unknown command '{}'", line.trim()),
        }
    }
}

//! Headless driver for the Allee colony simulator.
//!
//! Reads one command per line from stdin, applies it to a
//! [`ColonySession`], and prints the news feed and status line to stdout.
//! Logs go to stderr.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `allee-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the session and subscribe the log observer
//! 4. Run the command loop until `quit` or end of input

mod command;
mod error;
mod log_observer;

use std::fs::File;
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;

use allee_core::config::LoggingConfig;
use allee_core::observer::news_line;
use allee_core::{ColonySession, SimulatorConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::command::{Command, HELP, Parameter};
use crate::error::SimError;
use crate::log_observer::LogObserver;

/// Configuration file looked up in the working directory.
const CONFIG_FILE: &str = "allee-config.yaml";

/// Whether the loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Application entry point.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, stdin/stdout fail, or
/// an export cannot be written.
fn main() -> Result<(), SimError> {
    // 1. Load configuration.
    let config_path = Path::new(CONFIG_FILE);
    let found = config_path.exists();
    let config = if found {
        SimulatorConfig::from_file(config_path)?
    } else {
        SimulatorConfig::default()
    };

    // 2. Initialize structured logging.
    init_tracing(&config.logging);
    if found {
        info!(path = CONFIG_FILE, seed = ?config.events.seed, "Configuration loaded");
    } else {
        info!("Config file not found, using defaults");
    }

    // 3. Build the session.
    let mut session = ColonySession::from_config(&config);
    session.subscribe(Box::new(LogObserver));
    session.publish();

    // 4. Command loop.
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "{}", session.colony().status())?;
    prompt(&mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        match command::parse(&line) {
            Ok(Some(cmd)) => {
                if run(&mut session, cmd, &mut out)? == Flow::Quit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(out, "error: {e}")?,
        }
        prompt(&mut out)?;
    }

    info!(
        day = session.colony().current_day(),
        population = session.colony().population(),
        "allee-sim finished"
    );
    Ok(())
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr);
    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn prompt(out: &mut impl Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

/// Apply one command and print its outcome.
fn run(session: &mut ColonySession, cmd: Command, out: &mut impl Write) -> Result<Flow, SimError> {
    match cmd {
        Command::Advance(days) => {
            for _ in 0..days {
                let report = session.advance_day();
                writeln!(out, "{}", news_line(report.day, &report.event.message))?;
                if report.extinct {
                    writeln!(out, "The colony has gone extinct.")?;
                }
            }
        }
        Command::Act(action) => {
            session.apply_action(action);
            writeln!(out, "{action}")?;
        }
        Command::Reset => {
            session.reset();
            writeln!(out, "Colony reset.")?;
        }
        Command::Spend(points) => match session.spend_technology_points(points) {
            Ok(day) => writeln!(out, "Spent {points} point(s); now day {day}.")?,
            Err(e) => {
                warn!(error = %e, "Spend rejected");
                writeln!(out, "error: {e}")?;
            }
        },
        Command::Tech(technology) => match session.apply_technology(technology) {
            Ok(()) => writeln!(out, "Applied {technology}")?,
            Err(e) => {
                warn!(error = %e, technology = technology.name(), "Technology rejected");
                writeln!(out, "error: {e}")?;
            }
        },
        Command::Set(parameter, value) => match parameter {
            Parameter::Population => session.set_population(value),
            Parameter::GrowthRate => session.set_growth_rate(value),
            Parameter::AlleeThreshold => session.set_allee_threshold(value),
        },
        Command::Status => {}
        Command::Export(path) => {
            let snapshot = session.snapshot();
            let file = BufWriter::new(File::create(&path)?);
            serde_json::to_writer_pretty(file, &snapshot)?;
            info!(path = %path, "Snapshot exported");
            writeln!(out, "Exported to {path}")?;
        }
        Command::Help => {
            writeln!(out, "{HELP}")?;
            return Ok(Flow::Continue);
        }
        Command::Quit => return Ok(Flow::Quit),
    }
    writeln!(out, "{}", session.colony().status())?;
    Ok(Flow::Continue)
}

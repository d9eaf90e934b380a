//! Line-command parsing.

use allee_core::{Action, Technology};

use crate::error::CommandError;

/// Most days a single `day` command may advance.
pub const MAX_DAYS_PER_COMMAND: u64 = 10_000;

/// A colony parameter the player may set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parameter {
    /// Population `x`.
    Population,
    /// Growth rate `r`.
    GrowthRate,
    /// Allee threshold `A`.
    AlleeThreshold,
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Advance this many days.
    Advance(u64),
    /// Apply a chamber or egg action.
    Act(Action),
    /// Restore the initial colony.
    Reset,
    /// Spend technology points.
    Spend(u64),
    /// Buy a technology upgrade.
    Tech(Technology),
    /// Set a parameter.
    Set(Parameter, f64),
    /// Print the status line.
    Status,
    /// Write the current snapshot as JSON.
    Export(String),
    /// Print the command list.
    Help,
    /// Leave the loop.
    Quit,
}

/// Command summary printed by `help`.
pub const HELP: &str = "\
commands:
  day [n]                 advance n days (default 1, at most 10000)
  more | less             lay more / fewer eggs
  build | destroy         build / destroy chambers
  reset                   restore the initial colony
  spend <n>               spend n technology points
  tech cull|frenzy|nanny  buy a technology upgrade
  set x|r|a <value>       set population, growth rate or Allee threshold
  status                  print the status line
  export <path>           write the current views as JSON
  help                    show this list
  quit                    exit";

/// Parse one line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "day" | "d" => Command::Advance(match words.next() {
            Some(raw) => parse_day_count(raw)?,
            None => 1,
        }),
        "more" => Command::Act(Action::LayMoreEggs),
        "less" => Command::Act(Action::LayLessEggs),
        "build" => Command::Act(Action::BuildChambers),
        "destroy" => Command::Act(Action::DestroyChambers),
        "reset" => Command::Reset,
        "spend" => Command::Spend(parse_count(required(words.next(), "spend", "a point count")?)?),
        "tech" => Command::Tech(parse_technology(required(
            words.next(),
            "tech",
            "cull, frenzy or nanny",
        )?)?),
        "set" => {
            let parameter =
                parse_parameter(required(words.next(), "set", "a parameter (x, r, a)")?)?;
            let value = parse_value(required(words.next(), "set", "a value")?)?;
            Command::Set(parameter, value)
        }
        "status" | "s" => Command::Status,
        "export" => Command::Export(required(words.next(), "export", "a file path")?.to_owned()),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            return Err(CommandError::UnknownCommand {
                word: other.to_owned(),
            });
        }
    };
    Ok(Some(command))
}

const fn required<'a>(
    word: Option<&'a str>,
    command: &'static str,
    expected: &'static str,
) -> Result<&'a str, CommandError> {
    match word {
        Some(word) => Ok(word),
        None => Err(CommandError::MissingArgument { command, expected }),
    }
}

fn parse_count(raw: &str) -> Result<u64, CommandError> {
    raw.parse().map_err(|_| CommandError::InvalidNumber {
        value: raw.to_owned(),
        expected: "whole number",
    })
}

fn parse_day_count(raw: &str) -> Result<u64, CommandError> {
    match raw.parse::<u64>() {
        Ok(days) if days <= MAX_DAYS_PER_COMMAND => Ok(days),
        _ => Err(CommandError::InvalidNumber {
            value: raw.to_owned(),
            expected: "day count up to 10000",
        }),
    }
}

fn parse_value(raw: &str) -> Result<f64, CommandError> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(CommandError::InvalidNumber {
            value: raw.to_owned(),
            expected: "finite number",
        }),
    }
}

fn parse_technology(raw: &str) -> Result<Technology, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "cull" => Ok(Technology::Cull),
        "frenzy" | "breeding" => Ok(Technology::BreedingFrenzy),
        "nanny" | "nannies" => Ok(Technology::NannyAnts),
        _ => Err(CommandError::UnknownTechnology {
            name: raw.to_owned(),
        }),
    }
}

fn parse_parameter(raw: &str) -> Result<Parameter, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "x" | "population" => Ok(Parameter::Population),
        "r" | "growth" => Ok(Parameter::GrowthRate),
        "a" | "threshold" => Ok(Parameter::AlleeThreshold),
        _ => Err(CommandError::UnknownParameter {
            name: raw.to_owned(),
        }),
    }
}

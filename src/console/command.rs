//! Console command parsing.

use std::str::FromStr;

use crate::error::{LoadbalError, Result};

/// Shown by `help`.
pub const HELP_TEXT: &str = "\
Commands:
  start          start (or resume) the simulation
  stop           pause the simulation
  reset          clear servers, queue, log and history
  add [weight]   enqueue one task (random weight if omitted)
  batch [n]      enqueue n random tasks (configured batch size if omitted)
  next | n       advance one step (replays history when rewound)
  prev | p       rewind one step
  show           print servers, queue and statistics
  json           print the full view as JSON
  log [n]        print the n most recent log entries (default 10)
  help           this text
  quit           leave the console";

/// A parsed console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Start,
    Stop,
    Reset,
    Add(Option<u32>),
    Batch(Option<usize>),
    Next,
    Prev,
    Show,
    Json,
    Log(Option<usize>),
    Help,
    Quit,
}

impl FromStr for ConsoleCommand {
    type Err = LoadbalError;

    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split_whitespace();
        let name = parts.next().unwrap_or_default().to_lowercase();
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(LoadbalError::UnknownCommand(s.trim().to_string()));
        }

        let command = match (name.as_str(), arg) {
            ("start", None) => ConsoleCommand::Start,
            ("stop", None) => ConsoleCommand::Stop,
            ("reset", None) => ConsoleCommand::Reset,
            ("add", arg) => ConsoleCommand::Add(parse_arg(s, arg)?),
            ("batch", arg) => ConsoleCommand::Batch(parse_arg(s, arg)?),
            ("next" | "n", None) => ConsoleCommand::Next,
            ("prev" | "p", None) => ConsoleCommand::Prev,
            ("show", None) => ConsoleCommand::Show,
            ("json", None) => ConsoleCommand::Json,
            ("log", arg) => ConsoleCommand::Log(parse_arg(s, arg)?),
            ("help" | "?", None) => ConsoleCommand::Help,
            ("quit" | "exit" | "q", None) => ConsoleCommand::Quit,
            _ => return Err(LoadbalError::UnknownCommand(s.trim().to_string())),
        };
        Ok(command)
    }
}

fn parse_arg<T: FromStr>(line: &str, arg: Option<&str>) -> Result<Option<T>> {
    arg.map(|a| a.parse::<T>().map_err(|_| LoadbalError::UnknownCommand(line.trim().to_string())))
        .transpose()
}

/// Parse one script or console line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }
    line.parse().map(Some)
}

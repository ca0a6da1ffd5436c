//! Console session: executes commands against a controller.

use crate::config::{DEFAULT_BATCH_SIZE, GlobalConfig};
use crate::error::Result;
use crate::simulation::{Advance, Effect, SimulationController};

use super::command::{ConsoleCommand, HELP_TEXT};
use super::render::{render_log, render_state};

const DEFAULT_LOG_LINES: usize = 10;

/// Result of executing one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// The simulation changed
    Applied(String),
    /// Valid command that did nothing in the current state
    NoEffect(String),
    /// Read-only output
    Output(String),
    /// Leave the session
    Quit,
}

/// A controller plus console settings
pub struct Console {
    controller: SimulationController,
    batch_size: usize,
}

impl Console {
    pub fn new(controller: SimulationController) -> Self {
        Self {
            controller,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Build the controller and batch size from configuration.
    pub fn from_config(config: &GlobalConfig) -> Result<Self> {
        let controller = SimulationController::from_config(config)?;
        Ok(Self::new(controller).with_batch_size(config.tasks.batch_size))
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn controller(&self) -> &SimulationController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut SimulationController {
        &mut self.controller
    }

    /// Run one command.
    pub fn execute(&mut self, command: ConsoleCommand) -> Result<Reply> {
        let c = &mut self.controller;
        let reply = match command {
            ConsoleCommand::Start => effect(c.start(), "Simulation started", "Simulation already running"),
            ConsoleCommand::Stop => effect(c.stop(), "Simulation paused", "Simulation already paused"),
            ConsoleCommand::Reset => {
                c.reset();
                Reply::Applied("Simulation reset".to_string())
            }
            ConsoleCommand::Add(weight) => {
                let added = match weight {
                    Some(w) => c.enqueue_task(w)?.into_iter().collect(),
                    None => c.enqueue_random(1)?,
                };
                enqueued(added, c.is_running())
            }
            ConsoleCommand::Batch(count) => {
                let added = c.enqueue_random(count.unwrap_or(self.batch_size))?;
                enqueued(added, c.is_running())
            }
            ConsoleCommand::Next => match c.advance() {
                Advance::Stepped { step, kind } => Reply::Applied(format!("Step {}: {:?}", step, kind)),
                Advance::Replayed { step } => Reply::Applied(format!("Replayed step {}", step)),
                Advance::NoEffect => Reply::NoEffect("Simulation is paused; start it first".to_string()),
            },
            ConsoleCommand::Prev => match c.rewind() {
                Effect::Applied => Reply::Applied(format!("Rewound to step {}", c.current_step().unwrap_or(0))),
                Effect::NoEffect => Reply::NoEffect("Already at the earliest step".to_string()),
            },
            ConsoleCommand::Show => Reply::Output(render_state(c)),
            ConsoleCommand::Json => Reply::Output(serde_json::to_string_pretty(&c.view())?),
            ConsoleCommand::Log(n) => Reply::Output(render_log(c.log(), n.unwrap_or(DEFAULT_LOG_LINES))),
            ConsoleCommand::Help => Reply::Output(HELP_TEXT.to_string()),
            ConsoleCommand::Quit => Reply::Quit,
        };
        Ok(reply)
    }
}

fn effect(effect: Effect, applied: &str, no_effect: &str) -> Reply {
    match effect {
        Effect::Applied => Reply::Applied(applied.to_string()),
        Effect::NoEffect => Reply::NoEffect(no_effect.to_string()),
    }
}

fn enqueued(tasks: Vec<crate::domain::Task>, running: bool) -> Reply {
    if tasks.is_empty() {
        let reason = if running {
            "No tasks requested"
        } else {
            "Simulation is paused; tasks can only be added while running"
        };
        return Reply::NoEffect(reason.to_string());
    }
    let labels: Vec<String> = tasks.iter().map(|t| format!("{}({})", t.label(), t.weight())).collect();
    Reply::Applied(format!("Enqueued {}", labels.join(" ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::console::parse_line;
    use crate::domain::Server;
    use crate::error::LoadbalError;
    use crate::simulation::ScriptedWeights;

    fn console() -> Console {
        let servers = (1..=3).map(|id| Server::new(id, 100)).collect();
        let controller = SimulationController::new(servers)
            .unwrap()
            .with_clock(Box::new(FixedClock::epoch()))
            .with_weights(Box::new(ScriptedWeights::new(vec![20, 30]).unwrap()));
        Console::new(controller).with_batch_size(3)
    }

    #[test]
    fn test_add_requires_start() {
        let mut console = console();
        assert!(matches!(console.execute(ConsoleCommand::Add(Some(10))).unwrap(), Reply::NoEffect(_)));
        console.execute(ConsoleCommand::Start).unwrap();
        assert_eq!(
            console.execute(ConsoleCommand::Add(Some(10))).unwrap(),
            Reply::Applied("Enqueued T1(10)".to_string())
        );
    }

    #[test]
    fn test_add_zero_weight_errors() {
        let mut console = console();
        console.execute(ConsoleCommand::Start).unwrap();
        assert!(matches!(
            console.execute(ConsoleCommand::Add(Some(0))),
            Err(LoadbalError::InvalidTask { weight: 0 })
        ));
    }

    #[test]
    fn test_batch_uses_configured_size() {
        let mut console = console();
        console.execute(ConsoleCommand::Start).unwrap();
        let reply = console.execute(ConsoleCommand::Batch(None)).unwrap();
        assert_eq!(reply, Reply::Applied("Enqueued T1(20) T2(30) T3(20)".to_string()));
        assert_eq!(console.controller().queue().len(), 3);
    }

    #[test]
    fn test_empty_batch_while_running() {
        let mut console = console();
        console.execute(ConsoleCommand::Start).unwrap();
        assert_eq!(
            console.execute(ConsoleCommand::Batch(Some(0))).unwrap(),
            Reply::NoEffect("No tasks requested".to_string())
        );
    }

    #[test]
    fn test_batch_while_paused() {
        let mut console = console();
        assert_eq!(
            console.execute(ConsoleCommand::Batch(Some(2))).unwrap(),
            Reply::NoEffect("Simulation is paused; tasks can only be added while running".to_string())
        );
    }

    #[test]
    fn test_huge_batch_is_an_error() {
        let mut console = console();
        console.execute(ConsoleCommand::Start).unwrap();
        let command = parse_line("batch 18446744073709551615").unwrap().unwrap();
        assert_eq!(command, ConsoleCommand::Batch(Some(usize::MAX)));
        assert!(matches!(
            console.execute(command),
            Err(LoadbalError::InvalidBatch { count: usize::MAX, .. })
        ));
        assert!(console.controller().queue().is_empty());
    }

    #[test]
    fn test_next_and_prev_replies() {
        let mut console = console();
        assert!(matches!(console.execute(ConsoleCommand::Next).unwrap(), Reply::NoEffect(_)));
        console.execute(ConsoleCommand::Start).unwrap();
        console.execute(ConsoleCommand::Add(Some(10))).unwrap();

        assert_eq!(
            console.execute(ConsoleCommand::Next).unwrap(),
            Reply::Applied("Step 1: Assigned".to_string())
        );
        assert_eq!(
            console.execute(ConsoleCommand::Prev).unwrap(),
            Reply::Applied("Rewound to step 0".to_string())
        );
        assert!(matches!(console.execute(ConsoleCommand::Prev).unwrap(), Reply::NoEffect(_)));
        assert_eq!(
            console.execute(ConsoleCommand::Next).unwrap(),
            Reply::Applied("Replayed step 1".to_string())
        );
    }

    #[test]
    fn test_json_output_parses() {
        let mut console = console();
        console.execute(ConsoleCommand::Start).unwrap();
        let Reply::Output(json) = console.execute(ConsoleCommand::Json).unwrap() else {
            panic!("expected output");
        };
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["running"], true);
        assert_eq!(value["history_len"], 1);
    }

    #[test]
    fn test_quit() {
        let mut console = console();
        assert_eq!(console.execute(ConsoleCommand::Quit).unwrap(), Reply::Quit);
    }
}

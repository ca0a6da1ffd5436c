//! Line-oriented console over a `SimulationController`.
//!
//! Used by the binary for interactive sessions and scripts. Each input line
//! parses into a `ConsoleCommand`; executing it yields a `Reply` the caller
//! prints.

mod command;
mod render;
mod session;

pub use command::{ConsoleCommand, HELP_TEXT, parse_line};
pub use render::{render_log, render_state};
pub use session::{Console, Reply};

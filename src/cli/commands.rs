//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - run: interactive console or script
//! - demo: enqueue random tasks and step through them
//! - config: print the resolved configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// loadbal - step-by-step load balancing simulator with history
#[derive(Parser, Debug)]
#[command(name = "loadbal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open the console (reads commands from stdin, or from a script)
    Run {
        /// File with one console command per line
        #[arg(short, long)]
        script: Option<PathBuf>,
    },

    /// Start, enqueue random tasks and advance a number of steps
    Demo {
        /// Number of random tasks to enqueue
        #[arg(short, long, default_value_t = 5)]
        tasks: usize,

        /// Maximum number of steps to take
        #[arg(short, long, default_value_t = 20)]
        steps: usize,

        /// Seed for reproducible task weights
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the resolved configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_verify() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::parse_from(["loadbal"]);
        assert!(cli.command.is_none());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_run_with_script() {
        let cli = Cli::parse_from(["loadbal", "run", "--script", "steps.txt"]);
        match cli.command {
            Some(Commands::Run { script }) => assert_eq!(script, Some(PathBuf::from("steps.txt"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_demo_defaults() {
        let cli = Cli::parse_from(["loadbal", "demo"]);
        match cli.command {
            Some(Commands::Demo { tasks, steps, seed }) => {
                assert_eq!(tasks, 5);
                assert_eq!(steps, 20);
                assert!(seed.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["loadbal", "demo", "--seed", "7", "-v", "-c", "sim.yml"]);
        assert!(cli.is_verbose());
        assert_eq!(cli.config, Some(PathBuf::from("sim.yml")));
    }
}

//! CLI module for loadbal - command-line interface and subcommands.
//!
//! Provides the main entry point with subcommands for the interactive
//! console, scripted runs, a quick demo and config inspection.

pub mod commands;

pub use commands::Cli;

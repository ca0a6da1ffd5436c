//! Configuration system for loadbal.
//!
//! A single YAML file describes the server pool and the task generator.
//! Search order:
//! 1. Explicit `--config` path
//! 2. .loadbal.yml in the current directory (project config)
//! 3. ~/.config/loadbal/loadbal.yml (user config)
//! 4. Default values

use eyre::Result;
use std::path::PathBuf;

pub use self::global::{GlobalConfig, ServersConfig, TasksConfig};

mod global;

/// Project-local config file name.
pub const PROJECT_CONFIG_FILE: &str = ".loadbal.yml";

/// Default number of servers in the pool.
pub const DEFAULT_SERVER_COUNT: u32 = 3;

/// Default capacity of each server, in load units.
pub const DEFAULT_CAPACITY: u32 = 100;

/// Default number of tasks added by one batch command.
pub const DEFAULT_BATCH_SIZE: usize = 5;

/// Load configuration from the standard search paths.
pub fn load_config(explicit_path: Option<&PathBuf>) -> Result<GlobalConfig> {
    GlobalConfig::load(explicit_path)
}

//! Global configuration.
//!
//! Loaded from ~/.config/loadbal/loadbal.yml or .loadbal.yml

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::{DEFAULT_BATCH_SIZE, DEFAULT_CAPACITY, DEFAULT_SERVER_COUNT, PROJECT_CONFIG_FILE};
use crate::domain::Server;
use crate::error::LoadbalError;
use crate::simulation::{DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT, MAX_BATCH_SIZE};

/// Global configuration for loadbal.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Server pool shape.
    pub servers: ServersConfig,

    /// Task generator settings.
    pub tasks: TasksConfig,
}

impl GlobalConfig {
    /// Load configuration with fallback chain.
    ///
    /// Search order:
    /// 1. Explicit path if provided
    /// 2. .loadbal.yml in current directory
    /// 3. ~/.config/loadbal/loadbal.yml
    /// 4. Defaults
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // Explicit path takes precedence
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project config
        let project_config = PathBuf::from(PROJECT_CONFIG_FILE);
        if project_config.exists() {
            match Self::load_from_file(&project_config) {
                Ok(config) => {
                    log::info!("Loaded config from {}", PROJECT_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    log::warn!("Failed to load {}: {}", PROJECT_CONFIG_FILE, e);
                }
            }
        }

        // Try user config
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("loadbal").join("loadbal.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", user_config.display());
                        return Ok(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to load {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // Use defaults
        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read and validate a single config file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        config.validate().context("Config file failed validation")?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> crate::error::Result<()> {
        let invalid = |msg: &str| Err(LoadbalError::InvalidConfig(msg.to_string()));

        if self.servers.capacities.is_empty() {
            if self.servers.count == 0 {
                return invalid("servers.count must be > 0");
            }
            if self.servers.capacity == 0 {
                return invalid("servers.capacity must be > 0");
            }
        } else if self.servers.capacities.contains(&0) {
            return invalid("servers.capacities entries must be > 0");
        }
        if self.tasks.min_weight == 0 {
            return invalid("tasks.min-weight must be > 0");
        }
        if self.tasks.min_weight > self.tasks.max_weight {
            return invalid("tasks.min-weight must be <= tasks.max-weight");
        }
        if self.tasks.batch_size == 0 {
            return invalid("tasks.batch-size must be > 0");
        }
        if self.tasks.batch_size > MAX_BATCH_SIZE {
            return invalid(&format!("tasks.batch-size must be <= {}", MAX_BATCH_SIZE));
        }
        Ok(())
    }

    /// Initial server pool, ids starting at 1.
    ///
    /// Explicit `capacities` win over `count` x `capacity`.
    pub fn server_pool(&self) -> Vec<Server> {
        let capacities: Vec<u32> = if self.servers.capacities.is_empty() {
            vec![self.servers.capacity; self.servers.count as usize]
        } else {
            self.servers.capacities.clone()
        };

        capacities
            .into_iter()
            .enumerate()
            .map(|(i, capacity)| Server::new(i as u32 + 1, capacity))
            .collect()
    }

    /// Render as YAML.
    pub fn to_yaml(&self) -> crate::error::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Server pool settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ServersConfig {
    /// Number of identical servers.
    pub count: u32,

    /// Capacity of each server.
    pub capacity: u32,

    /// Per-server capacities; overrides count and capacity when non-empty.
    pub capacities: Vec<u32>,
}

impl Default for ServersConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_SERVER_COUNT,
            capacity: DEFAULT_CAPACITY,
            capacities: Vec::new(),
        }
    }
}

/// Task generator settings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TasksConfig {
    /// Smallest generated weight (inclusive).
    pub min_weight: u32,

    /// Largest generated weight (inclusive).
    pub max_weight: u32,

    /// Tasks added by one `batch` command.
    pub batch_size: usize,
}

impl Default for TasksConfig {
    fn default() -> Self {
        Self {
            min_weight: DEFAULT_MIN_WEIGHT,
            max_weight: DEFAULT_MAX_WEIGHT,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

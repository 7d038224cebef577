//! Configuration loading and typed config structures for Worldview.
//!
//! The canonical configuration lives in `worldview-config.yaml` at the
//! project root. This module defines strongly-typed structs that mirror the
//! YAML structure and a loader that reads the file. Every field has a
//! default, so a missing section (or an empty file) yields a working
//! configuration.

use std::path::Path;

use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorldviewConfig {
    /// Query service listener.
    #[serde(default)]
    pub server: ServerConfig,

    /// Cell synchronization limits.
    #[serde(default)]
    pub sync: SyncConfig,

    /// Demo simulation step loop.
    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Demo world generation.
    #[serde(default)]
    pub world: WorldConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl WorldviewConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listener:
    /// - `WORLDVIEW_HOST` overrides `server.host`
    /// - `WORLDVIEW_PORT` overrides `server.port`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.apply_env_overrides();
        Ok(config)
    }
}

/// Query service listener configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Bind address.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("WORLDVIEW_HOST") {
            self.host = val;
        }
        if let Some(port) = std::env::var("WORLDVIEW_PORT")
            .ok()
            .and_then(|val| val.parse().ok())
        {
            self.port = port;
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Cell synchronization limits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SyncConfig {
    /// Largest spiral (points per level) a block request may ask for.
    #[serde(default = "default_max_window_points")]
    pub max_window_points: u64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            max_window_points: default_max_window_points(),
        }
    }
}

/// Demo simulation step loop configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SimulationConfig {
    /// Whether the step loop runs at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Real-time milliseconds between steps.
    #[serde(default = "default_step_interval_ms")]
    pub step_interval_ms: u64,

    /// Stop after this many steps (0 = unlimited).
    #[serde(default)]
    pub max_steps: u64,

    /// Stop after this many wall-clock seconds (0 = unlimited).
    #[serde(default)]
    pub max_real_time_seconds: u64,

    /// Tile mutations applied per step.
    #[serde(default = "default_mutations_per_step")]
    pub mutations_per_step: u32,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            step_interval_ms: default_step_interval_ms(),
            max_steps: 0,
            max_real_time_seconds: 0,
            mutations_per_step: default_mutations_per_step(),
        }
    }
}

/// Demo world generation parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// World name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for terrain and the step loop.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Local map width in cells.
    #[serde(default = "default_map_cells")]
    pub size_x: i32,

    /// Local map height in cells.
    #[serde(default = "default_map_cells")]
    pub size_y: i32,

    /// Local map levels.
    #[serde(default = "default_map_levels")]
    pub size_z: i32,

    /// World width in macro-regions.
    #[serde(default = "default_world_regions")]
    pub world_width: usize,

    /// World height in macro-regions.
    #[serde(default = "default_world_regions")]
    pub world_height: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            size_x: default_map_cells(),
            size_y: default_map_cells(),
            size_z: default_map_levels(),
            world_width: default_world_regions(),
            world_height: default_world_regions(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

const fn default_port() -> u16 {
    3060
}

const fn default_max_window_points() -> u64 {
    65_536
}

const fn default_true() -> bool {
    true
}

const fn default_step_interval_ms() -> u64 {
    500
}

const fn default_mutations_per_step() -> u32 {
    8
}

fn default_world_name() -> String {
    "Demo".to_owned()
}

const fn default_seed() -> u64 {
    7
}

const fn default_map_cells() -> i32 {
    4
}

const fn default_map_levels() -> i32 {
    8
}

const fn default_world_regions() -> usize {
    17
}

fn default_log_level() -> String {
    "info".to_owned()
}

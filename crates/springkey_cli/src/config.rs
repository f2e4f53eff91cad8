//! Runtime configuration for `springkey`.
//!
//! Values are resolved in three layers: built-in defaults, then an optional
//! TOML file, then command-line flags.
//!
//! ```toml
//! fps = 60
//! max_steps = 10000
//! prefixes = ["-webkit-", ""]
//! name_prefix = "spring-"
//!
//! [spring]
//! from = 40.0
//! velocity = 0.0
//! mass = 1.0
//! stiffness = 170.0
//! damping = 1.0
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use springkey::{DEFAULT_FPS, DEFAULT_MAX_STEPS, Dialects, SpringParams, validate_name};

use crate::cli::SpringArgs;

/// Spring initial conditions and constants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpringConfig {
    /// Initial displacement.
    pub from: f64,
    /// Initial velocity.
    pub velocity: f64,
    /// Particle mass.
    pub mass: f64,
    /// Spring stiffness.
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        let params = SpringParams::default();
        Self {
            from: 1.0,
            velocity: 0.0,
            mass: 1.0,
            stiffness: params.stiffness(),
            damping: params.damping(),
        }
    }
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Spring state and constants.
    pub spring: SpringConfig,
    /// Frame rate for durations and live pacing.
    pub fps: u32,
    /// Integration step cap.
    pub max_steps: usize,
    /// Vendor prefixes in cascade order.
    pub prefixes: Vec<String>,
    /// Prefix for generated animation names.
    pub name_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            spring: SpringConfig::default(),
            fps: DEFAULT_FPS,
            max_steps: DEFAULT_MAX_STEPS,
            prefixes: vec![String::new()],
            name_prefix: "spring-".to_string(),
        }
    }
}

impl Config {
    /// Parses a TOML document.
    pub fn from_toml(source: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml(&source, path)
    }

    /// Loads `path` if given, otherwise returns defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        path.map_or_else(|| Ok(Self::default()), Self::load)
    }

    /// Overlays flags that were set on the command line.
    pub fn apply_args(&mut self, args: &SpringArgs) -> Result<(), ConfigError> {
        let spring = &mut self.spring;
        if let Some(v) = args.from {
            spring.from = v;
        }
        if let Some(v) = args.velocity {
            spring.velocity = v;
        }
        if let Some(v) = args.mass {
            spring.mass = v;
        }
        if let Some(v) = args.stiffness {
            spring.stiffness = v;
        }
        if let Some(v) = args.damping {
            spring.damping = v;
        }
        if let Some(v) = args.fps {
            self.fps = v;
        }
        if let Some(v) = args.max_steps {
            self.max_steps = v;
        }
        self.validate()
    }

    /// The configured dialects.
    pub fn dialects(&self) -> Dialects {
        Dialects::new(self.prefixes.iter().cloned())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::Invalid("fps must be greater than zero".into()));
        }
        if self.max_steps == 0 {
            return Err(ConfigError::Invalid(
                "max_steps must be greater than zero".into(),
            ));
        }
        if self.prefixes.is_empty() {
            return Err(ConfigError::Invalid(
                "prefixes must list at least one entry".into(),
            ));
        }
        if validate_name(&self.name_prefix).is_err() {
            return Err(ConfigError::Invalid(format!(
                "name_prefix {:?} must start a valid CSS identifier",
                self.name_prefix
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file {path}: {message}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O message.
        message: String,
    },

    /// The file is not valid TOML for this schema.
    #[error("invalid config file {path}: {message}")]
    Parse {
        /// File that failed.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A value is out of range.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

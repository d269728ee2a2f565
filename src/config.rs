// ================================
// src/config.rs - parameters and TOML loading
// ================================
use crate::error::ConfigError;
use log::info;
use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};

pub const CONFIG_PATH_ENV: &str = "CONFIG_PATH";
pub const DEFAULT_CONFIG_PATH: &str = "./reflex_param.toml";

/// Tunables of the reflex controller. Fixed once the controller is built.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReflexConfig {
    /// Meters. A sample closer than this stops forward motion.
    pub danger_threshold: f64,
    /// Meters. A sample closer than this starts a turn.
    pub turn_away_threshold: f64,
    /// Magnitude of the rotation command.
    pub angular_velocity: f64,
    /// Forward speed per meter of clearance.
    pub linear_velocity: f64,
    pub max_speed: f64,
    pub min_speed: f64,
}

impl Default for ReflexConfig {
    fn default() -> Self {
        Self {
            danger_threshold: 0.3,
            turn_away_threshold: 0.6,
            angular_velocity: 0.2,
            linear_velocity: 0.6,
            max_speed: 1.0,
            min_speed: 0.05,
        }
    }
}

impl ReflexConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("danger_threshold", self.danger_threshold),
            ("turn_away_threshold", self.turn_away_threshold),
            ("angular_velocity", self.angular_velocity),
            ("linear_velocity", self.linear_velocity),
            ("max_speed", self.max_speed),
            ("min_speed", self.min_speed),
        ];

        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be finite, got {}", value),
                });
            }
            if value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must not be negative, got {}", value),
                });
            }
        }

        if self.min_speed > self.max_speed {
            return Err(ConfigError::Invalid {
                field: "min_speed",
                reason: format!("{} exceeds max_speed {}", self.min_speed, self.max_speed),
            });
        }

        Ok(())
    }
}

/// Node name and topic wiring
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct NodeParams {
    pub node_name: String,
    pub scan_topic: String,
    pub cmd_vel_topic: String,
}

impl Default for NodeParams {
    fn default() -> Self {
        Self {
            node_name: "simple_exploration".to_string(),
            scan_topic: "scan".to_string(),
            cmd_vel_topic: "cmd_vel".to_string(),
        }
    }
}

/// Everything the binary reads at startup, one TOML table per part.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Params {
    pub node: NodeParams,
    pub reflex: ReflexConfig,
}

impl Params {
    /// Load parameters from `$CONFIG_PATH`, falling back to `./reflex_param.toml`.
    ///
    /// An explicit `CONFIG_PATH` must point at a readable file. When it is unset and
    /// the default file does not exist, built-in defaults are used.
    pub fn load() -> Result<Self, ConfigError> {
        match env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(path),
            Err(_) => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let params = Self::parse(&config_str, path)?;
        info!("Parameters loaded from {}", path.display());
        Ok(params)
    }

    pub fn from_toml_str(config_str: &str) -> Result<Self, ConfigError> {
        Self::parse(config_str, Path::new("<string>"))
    }

    fn parse(config_str: &str, path: &Path) -> Result<Self, ConfigError> {
        let params: Self = toml::from_str(config_str).map_err(|source| ConfigError::Parse {
            path: PathBuf::from(path),
            source,
        })?;
        params.reflex.validate()?;
        Ok(params)
    }
}

use std::env;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::generator::FleetSettings;

pub const DEFAULT_CONFIG_PATH: &str = "config/app.yaml";

/// Environment overrides for the datagen parameters, the way a deployment
/// passes them into the process.
pub const ENV_NUM_OF_VEHICLES: &str = "DATAGEN_NUM_OF_VEHICLES";
pub const ENV_NUM_OF_PARTS_PER_VEHICLE: &str = "DATAGEN_NUM_OF_PARTS_PER_VEHICLE";
pub const ENV_OUTPUT_PREFIX: &str = "DATAGEN_OUTPUT_PREFIX";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file at {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file at {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {name}: {value:?} is not a non-negative integer")]
    BadCount { name: String, value: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub working_dir: String,
    pub datagen: DatagenConfig,
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub ai: AiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatagenConfig {
    pub scooters: CountParam,
    pub parts_per_scooter: CountParam,
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_graph_port")]
    pub port: u16,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            port: default_graph_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub base_url: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            base_url: None,
        }
    }
}

/// Count parameter that tolerates numeric-looking strings, the form these
/// values take when they arrive through environment plumbing.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum CountParam {
    Number(u32),
    Text(String),
}

impl CountParam {
    pub fn resolve(&self, name: &str) -> Result<u32, ConfigError> {
        match self {
            CountParam::Number(n) => Ok(*n),
            CountParam::Text(raw) => parse_count(name, raw),
        }
    }
}

impl DatagenConfig {
    /// Resolved generation parameters, process environment winning over the
    /// config file. Fails fast on anything that does not coerce to an
    /// integer; no partial output is ever produced from bad parameters.
    pub fn fleet_settings(&self) -> Result<FleetSettings, ConfigError> {
        let scooters = match env_count(ENV_NUM_OF_VEHICLES)? {
            Some(n) => n,
            None => self.scooters.resolve("datagen.scooters")?,
        };
        let parts_per_scooter = match env_count(ENV_NUM_OF_PARTS_PER_VEHICLE)? {
            Some(n) => n,
            None => self.parts_per_scooter.resolve("datagen.parts_per_scooter")?,
        };
        Ok(FleetSettings {
            scooters,
            parts_per_scooter,
            seed: self.seed,
        })
    }

    pub fn output_prefix(&self) -> String {
        env::var(ENV_OUTPUT_PREFIX)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| self.output_prefix.clone())
    }
}

pub async fn load_config() -> Result<AppConfig, ConfigError> {
    let path = config_path();
    let contents = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
    let config: AppConfig = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    info!(path = %path.display(), "configuration loaded from disk");
    Ok(config)
}

pub fn config_path() -> PathBuf {
    env::var("APP_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn parse_count(name: &str, raw: &str) -> Result<u32, ConfigError> {
    raw.trim().parse::<u32>().map_err(|_| ConfigError::BadCount {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

fn env_count(name: &str) -> Result<Option<u32>, ConfigError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => parse_count(name, &raw).map(Some),
        _ => Ok(None),
    }
}

fn default_output_prefix() -> String {
    "neptune".to_string()
}

fn default_graph_port() -> u16 {
    8182
}

fn default_model() -> String {
    "gpt-5-mini".to_string()
}

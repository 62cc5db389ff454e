//! Configuration loading: YAML file, environment overrides, validation.

use crate::schema::Config;
use informal_common::{ChannelId, GuildId, InformalError};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "INFORMAL_CONFIG_PATH";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {reason}")]
    EnvParse {
        /// Offending variable.
        var: String,
        /// Why it could not be parsed.
        reason: String,
    },

    /// Configuration validation error
    #[error("{0}")]
    Validation(#[from] InformalError),
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration, looking in order at `explicit`, the
    /// `INFORMAL_CONFIG_PATH` variable, `config.yaml` and `config.yml`, and
    /// falling back to defaults. Environment overrides are applied last.
    pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_VAR).map(PathBuf::from))
            .or_else(|| {
                ["config.yaml", "config.yml"]
                    .into_iter()
                    .map(PathBuf::from)
                    .find(|candidate| candidate.exists())
            });

        let mut config = match path {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::read_file(&path)?
            }
            None => {
                info!("No configuration file found, using defaults");
                Config::default()
            }
        };

        Self::apply_env_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a specific file, with environment overrides.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        Self::load(Some(path.as_ref()))
    }

    /// Parses a YAML document without touching the environment.
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn read_file(path: &Path) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&content)
    }

    /// Applies overrides read through `lookup` (normally the process
    /// environment).
    pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            debug!("DISCORD_TOKEN override applied");
            config.discord.token = token;
        }

        if let Some(raw) = lookup("GUILD_ID") {
            config.discord.guild_id = Some(GuildId(parse_id("GUILD_ID", &raw)?));
        }

        if let Some(raw) = lookup("TEST_CHANNEL_ID") {
            config.discord.test_channel_id = Some(ChannelId(parse_id("TEST_CHANNEL_ID", &raw)?));
        }

        if let Some(raw) = lookup("REGISTRATION_CHANNELS") {
            config.discord.channels = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| parse_id("REGISTRATION_CHANNELS", s).map(ChannelId))
                .collect::<Result<_, _>>()?;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_id(var: &str, raw: &str) -> Result<u64, ConfigError> {
    raw.trim().parse().map_err(|e: std::num::ParseIntError| ConfigError::EnvParse {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

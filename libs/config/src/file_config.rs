//! Pool Configuration Module
//!
//! Provides configuration loading for a pool deployment. Supports loading
//! from TOML files with environment-specific overrides.

use anyhow::{ensure, Context, Result};
use config_crate::{Config, Environment, File, FileFormat};
use pool::PoolSettings;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DEFAULT_CONFIG_PATH: &str = "config/pool.toml";
const ENV_PREFIX: &str = "POOL";

/// Main configuration structure
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct PoolFileConfig {
    /// Share issuance and deposit policy
    pub pool: PoolSettings,

    /// Tracing subscriber settings
    pub logging: LoggingConfig,

    /// Actor mailbox settings
    pub executor: ExecutorSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `info` or `pool=debug,info`
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ExecutorSettings {
    /// Requests buffered before submitters wait
    pub mailbox_capacity: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            mailbox_capacity: 1024,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogFormat::Text => write!(f, "text"),
            LogFormat::Json => write!(f, "json"),
        }
    }
}

impl PoolFileConfig {
    /// Load configuration from files with environment overrides
    ///
    /// An explicit `base_path` must exist; without one the default
    /// `config/pool.toml` is read if present.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        Self::load_with_prefix(base_path, environment, ENV_PREFIX)
    }

    fn load_with_prefix(
        base_path: Option<&Path>,
        environment: Option<&str>,
        env_prefix: &str,
    ) -> Result<Self> {
        let (base, required) = match base_path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
        };

        let mut builder = Config::builder()
            .add_source(File::from(base.as_path()).format(FileFormat::Toml).required(required));

        // Add environment-specific overrides if specified
        if let Some(env) = environment {
            let env_file = base
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join("environments")
                .join(format!("{env}.toml"));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file).format(FileFormat::Toml));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (POOL_ prefix)
        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config: Self = builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        config.validate()?;
        debug!(
            initial_shares = config.pool.initial_shares,
            deposit_policy = ?config.pool.deposit_policy,
            mailbox_capacity = config.executor.mailbox_capacity,
            "configuration loaded"
        );
        Ok(config)
    }

    /// Reject settings no pool can run with
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.pool.initial_shares > 0,
            "pool.initial_shares must be positive"
        );
        ensure!(
            self.executor.mailbox_capacity > 0,
            "executor.mailbox_capacity must be positive"
        );
        Ok(())
    }

    /// Render as TOML, the format `load` reads
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize configuration")
    }
}

/// Convenience function to load configuration with defaults
pub fn load_config(environment: Option<&str>) -> Result<PoolFileConfig> {
    PoolFileConfig::load(None, environment)
}

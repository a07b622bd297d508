//! Runtime configuration: display limits, fetch timeout and log format.
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! `QUICKACCESS_*` environment variables.

mod env;

pub use env::RejectedOverride;

use crate::error::Result;
use crate::types::EntityKind;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

const ENV_TAGS_LIMIT: &str = "QUICKACCESS_TAGS_LIMIT";
const ENV_RESOURCES_LIMIT: &str = "QUICKACCESS_RESOURCES_LIMIT";
const ENV_FETCH_TIMEOUT_MS: &str = "QUICKACCESS_FETCH_TIMEOUT_MS";
const ENV_LOG_FORMAT: &str = "QUICKACCESS_LOG_FORMAT";

/// Maximum number of tags rendered at once.
pub const BROWSED_TAGS_LIMIT: usize = 500;

/// Maximum number of resources rendered at once.
pub const BROWSED_RESOURCES_LIMIT: usize = 500;

const DEFAULT_FETCH_TIMEOUT_MS: u64 = 10_000;

const CONFIG_DIR_NAME: &str = "quickaccess-browse";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Hard caps on rendered records. Not a pagination mechanism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayLimits {
    pub tags: usize,
    pub resources: usize,
}

impl Default for DisplayLimits {
    fn default() -> Self {
        Self {
            tags: BROWSED_TAGS_LIMIT,
            resources: BROWSED_RESOURCES_LIMIT,
        }
    }
}

impl DisplayLimits {
    pub const fn for_kind(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Tag => self.tags,
            EntityKind::Resource => self.resources,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Upper bound on a single data channel request.
    pub timeout_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_FETCH_TIMEOUT_MS,
        }
    }
}

impl FetchConfig {
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(raw: &str) -> std::result::Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format '{}', expected compact or json", other)),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub format: LogFormat,
}

/// Top-level configuration for a browsing session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    pub limits: DisplayLimits,
    pub fetch: FetchConfig,
    pub log: LogConfig,
}

/// Values read from `QUICKACCESS_*` variables. Unset or unparsable
/// variables are `None` and leave the configuration untouched.
///
/// Reading logs nothing: configuration is loaded before the subscriber
/// exists, so ignored variables are kept in `rejected` and reported by
/// [`EnvOverrides::warn_rejected`] once logging is up.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvOverrides {
    pub tags_limit: Option<usize>,
    pub resources_limit: Option<usize>,
    pub fetch_timeout_ms: Option<u64>,
    pub log_format: Option<LogFormat>,
    pub rejected: Vec<RejectedOverride>,
}

impl EnvOverrides {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read overrides through `lookup` instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut rejected = Vec::new();
        let tags_limit = env::read_parsed(&lookup, ENV_TAGS_LIMIT, &mut rejected);
        let resources_limit = env::read_parsed(&lookup, ENV_RESOURCES_LIMIT, &mut rejected);
        let fetch_timeout_ms = env::read_parsed(&lookup, ENV_FETCH_TIMEOUT_MS, &mut rejected);
        let log_format = env::read_parsed(&lookup, ENV_LOG_FORMAT, &mut rejected);

        Self {
            tags_limit,
            resources_limit,
            fetch_timeout_ms,
            log_format,
            rejected,
        }
    }

    pub fn warn_rejected(&self) {
        for rejected in &self.rejected {
            tracing::warn!("Ignoring override {}", rejected);
        }
    }
}

impl BrowseConfig {
    /// Load configuration for the binary, then apply `overrides`.
    ///
    /// An explicit `path` must exist. Without one, the per-user file under the
    /// platform config directory is used when present.
    pub fn load(path: Option<&Path>, overrides: &EnvOverrides) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(default_path) => Self::from_file(&default_path)?,
                None => Self::default(),
            },
        };

        Ok(config.with_overrides(overrides))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: &EnvOverrides) -> Self {
        if let Some(tags) = overrides.tags_limit {
            self.limits.tags = tags;
        }
        if let Some(resources) = overrides.resources_limit {
            self.limits.resources = resources;
        }
        if let Some(timeout_ms) = overrides.fetch_timeout_ms {
            self.fetch.timeout_ms = timeout_ms;
        }
        if let Some(format) = overrides.log_format {
            self.log.format = format;
        }
        self
    }
}

/// `<config dir>/quickaccess-browse/config.toml`, if the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

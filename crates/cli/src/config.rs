// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI configuration.
//!
//! Built-in defaults, then an optional TOML file, then `CHEDASH_*`
//! environment variables. Later layers win field by field.

use crate::env;
use dash_adapters::endpoint::{DEFAULT_API_CONTEXT, DEFAULT_WEBSOCKET_CONTEXT};
use dash_adapters::{ReconnectPolicy, ReconnectPolicyParseError};
use dash_engine::LoaderConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Reconnect(#[from] ReconnectPolicyParseError),
}

/// One configuration layer. Every field is optional so layers can be merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigLayer {
    pub url: Option<String>,
    pub token: Option<String>,
    pub api_context: Option<String>,
    pub websocket_context: Option<String>,
    /// Whitespace-separated registry base URLs.
    pub registry_urls: Option<String>,
    pub state_dir: Option<PathBuf>,
    pub settle_ms: Option<u64>,
    pub start_timeout_ms: Option<u64>,
    pub reconnect: Option<String>,
}

impl ConfigLayer {
    /// Read a TOML layer. A missing file is only an error when `required`.
    pub fn read(path: &Path, required: bool) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The environment layer.
    pub fn from_env() -> Self {
        Self {
            url: env::url(),
            token: env::token(),
            api_context: env::api_context(),
            websocket_context: env::websocket_context(),
            registry_urls: env::registry_urls(),
            state_dir: env::state_dir(),
            settle_ms: env::settle_ms().map(|d| d.as_millis() as u64),
            start_timeout_ms: env::start_timeout_ms().map(|d| d.as_millis() as u64),
            reconnect: env::reconnect(),
        }
    }

    /// Overlay `other` on top of `self`.
    pub fn merge(self, other: ConfigLayer) -> Self {
        Self {
            url: other.url.or(self.url),
            token: other.token.or(self.token),
            api_context: other.api_context.or(self.api_context),
            websocket_context: other.websocket_context.or(self.websocket_context),
            registry_urls: other.registry_urls.or(self.registry_urls),
            state_dir: other.state_dir.or(self.state_dir),
            settle_ms: other.settle_ms.or(self.settle_ms),
            start_timeout_ms: other.start_timeout_ms.or(self.start_timeout_ms),
            reconnect: other.reconnect.or(self.reconnect),
        }
    }
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Any URL on the workspace server. Commands that talk to the server need it.
    pub url: Option<String>,
    pub token: Option<String>,
    pub api_context: String,
    pub websocket_context: String,
    pub registry_urls: String,
    /// Where the log file goes. `None` disables file logging.
    pub state_dir: Option<PathBuf>,
    pub loader: LoaderConfig,
    pub reconnect: ReconnectPolicy,
}

impl Config {
    /// Load defaults, then the config file, then the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match env::config_path() {
            Some(path) => ConfigLayer::read(&path, true)?,
            None => match default_config_path() {
                Some(path) => ConfigLayer::read(&path, false)?,
                None => ConfigLayer::default(),
            },
        };
        Self::resolve(file.merge(ConfigLayer::from_env()))
    }

    /// Fill defaults into a merged layer.
    pub fn resolve(layer: ConfigLayer) -> Result<Self, ConfigError> {
        let reconnect = match layer.reconnect.as_deref() {
            Some(raw) => raw.parse()?,
            None => ReconnectPolicy::default(),
        };
        let loader = LoaderConfig {
            settle_delay: layer
                .settle_ms
                .map(Duration::from_millis)
                .unwrap_or(LoaderConfig::DEFAULT_SETTLE_DELAY),
            start_timeout: layer.start_timeout_ms.map(Duration::from_millis),
        };
        Ok(Self {
            url: layer.url,
            token: layer.token,
            api_context: layer
                .api_context
                .unwrap_or_else(|| DEFAULT_API_CONTEXT.to_string()),
            websocket_context: layer
                .websocket_context
                .unwrap_or_else(|| DEFAULT_WEBSOCKET_CONTEXT.to_string()),
            registry_urls: layer.registry_urls.unwrap_or_default(),
            state_dir: layer.state_dir.or_else(env::default_state_dir),
            loader,
            reconnect,
        })
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chedash").join("config.toml"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Devfiles, factory resolutions and registry listings

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DevfileParseError {
    #[error("invalid devfile: {0}")]
    Invalid(#[from] serde_yaml::Error),
    #[error("devfile has no metadata.name")]
    MissingName,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DevfileMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(
        rename = "generateName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub generate_name: Option<String>,
}

/// Structured description of a workspace.
///
/// Only `metadata` is interpreted; every other key round-trips untouched so
/// the document sent to the server is the one that was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Devfile {
    #[serde(rename = "apiVersion", default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,
    #[serde(default)]
    pub metadata: DevfileMetadata,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub commands: Vec<Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, Value>,
    #[serde(flatten)]
    pub extra: IndexMap<String, Value>,
}

impl Devfile {
    /// Parse a YAML or JSON devfile. A name (or generateName) is required.
    pub fn parse(text: &str) -> Result<Self, DevfileParseError> {
        let devfile: Devfile = serde_yaml::from_str(text)?;
        if devfile.metadata.name.is_empty() && devfile.metadata.generate_name.is_none() {
            return Err(DevfileParseError::MissingName);
        }
        Ok(devfile)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            api_version: "1.0.0".to_string(),
            metadata: DevfileMetadata {
                name: name.into(),
                generate_name: None,
            },
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }
}

/// Result of asking the server to turn a location into a devfile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevfileResolution {
    /// The location this resolution was requested for.
    pub location: String,
    /// How the server found the devfile (`repo` when taken from the repository itself).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devfile: Option<Devfile>,
}

impl DevfileResolution {
    /// Human-readable origin of the devfile, empty when it came from the repository.
    pub fn location_info(&self) -> String {
        match self.source.as_deref() {
            None | Some("") | Some("repo") => String::new(),
            Some(source) => format!("{} from the {}", source, self.location),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistryLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}

/// One entry of a registry's `devfiles/index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryEntry {
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub global_memory_limit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<String>,
    #[serde(default)]
    pub icon: String,
    pub links: RegistryLinks,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RegistryEntry {
    /// Resolve relative `icon` and `links.self` against the registry base.
    pub fn resolve_links(mut self, registry: &url::Url) -> Self {
        if !self.icon.is_empty() {
            self.icon = resolve_link(registry, &self.icon);
        }
        self.links.self_link = resolve_link(registry, &self.links.self_link);
        self.registry = Some(registry.to_string());
        self
    }
}

/// Normalize a registry URL so relative joins land under it.
pub fn registry_base(registry: &str) -> Result<url::Url, url::ParseError> {
    if registry.ends_with('/') {
        url::Url::parse(registry)
    } else {
        url::Url::parse(&format!("{registry}/"))
    }
}

fn resolve_link(base: &url::Url, link: &str) -> String {
    if link.starts_with("http") {
        return link.to_string();
    }
    base.join(link)
        .map(String::from)
        .unwrap_or_else(|_| link.to_string())
}

#[cfg(test)]
#[path = "devfile_tests.rs"]
mod tests;

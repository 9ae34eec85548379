// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace records as served by the workspace API.
//!
//! A workspace is identified by a server-assigned [`WorkspaceId`] and, for
//! humans, by its qualified name: the namespace plus the devfile's
//! `metadata.name`. Only the server changes `id`; the dashboard overlays
//! `status` from push notifications and replaces whole records on refresh.

use crate::devfile::Devfile;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Opaque, server-assigned workspace identifier. Serialized as the bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceId(pub String);

impl WorkspaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkspaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WorkspaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl PartialEq<&str> for WorkspaceId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// Cache maps keyed by id are looked up with plain `&str`
impl Borrow<str> for WorkspaceId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Lifecycle status reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkspaceStatus {
    Running,
    Stopped,
    Paused,
    Starting,
    Stopping,
    Error,
}

impl WorkspaceStatus {
    pub const ALL: [WorkspaceStatus; 6] = [
        WorkspaceStatus::Running,
        WorkspaceStatus::Stopped,
        WorkspaceStatus::Paused,
        WorkspaceStatus::Starting,
        WorkspaceStatus::Stopping,
        WorkspaceStatus::Error,
    ];

    /// Parse a wire status. Unrecognized values are not statuses.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WorkspaceStatus::Running => "RUNNING",
            WorkspaceStatus::Stopped => "STOPPED",
            WorkspaceStatus::Paused => "PAUSED",
            WorkspaceStatus::Starting => "STARTING",
            WorkspaceStatus::Stopping => "STOPPING",
            WorkspaceStatus::Error => "ERROR",
        }
    }

    /// Whether a start request is needed to bring the workspace up.
    pub fn needs_start(&self) -> bool {
        matches!(self, WorkspaceStatus::Stopped | WorkspaceStatus::Error)
    }
}

impl fmt::Display for WorkspaceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Server exposed by a runtime machine.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Server {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

impl Server {
    pub fn is_ide(&self) -> bool {
        self.attributes.get("type").is_some_and(|t| t == "ide")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Machine {
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub servers: IndexMap<String, Server>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub attributes: IndexMap<String, String>,
}

/// Live machines of a started workspace.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRuntime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_env: Option<String>,
    #[serde(default)]
    pub machines: IndexMap<String, Machine>,
}

/// A remote development environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: WorkspaceId,
    #[serde(default)]
    pub namespace: String,
    pub status: WorkspaceStatus,
    pub devfile: Devfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub runtime: Option<WorkspaceRuntime>,
    #[serde(default)]
    pub attributes: IndexMap<String, String>,
}

impl Workspace {
    /// Display name, taken from the devfile metadata.
    pub fn name(&self) -> &str {
        self.devfile.name()
    }

    pub fn is_named(&self, namespace: &str, name: &str) -> bool {
        self.namespace == namespace && self.name() == name
    }

    /// URL of the first server marked `type = "ide"`, in machine then
    /// server declaration order.
    pub fn ide_url(&self) -> Option<&str> {
        self.runtime
            .as_ref()?
            .machines
            .values()
            .flat_map(|m| m.servers.values())
            .find(|s| s.is_ide())
            .map(|s| s.url.as_str())
    }

    /// Epoch ms of the last update, falling back to creation time.
    pub fn last_modified_ms(&self) -> u64 {
        ["updated", "created"]
            .iter()
            .find_map(|key| self.attributes.get(*key)?.parse::<u64>().ok())
            .unwrap_or(0)
    }
}

/// Server-side workspace settings (free-form string map).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkspaceSettings(pub IndexMap<String, String>);

impl WorkspaceSettings {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;

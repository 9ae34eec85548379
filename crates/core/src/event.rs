// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event types for the dashboard state

use crate::devfile::{DevfileResolution, RegistryEntry};
use crate::workspace::{Workspace, WorkspaceId, WorkspaceSettings};
use serde::{Deserialize, Serialize};

/// Facts applied to the dashboard state.
///
/// Serializes with `{"type": "event:name", ...fields}` format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    // -- workspaces --
    #[serde(rename = "workspaces:requested")]
    WorkspacesRequested,

    /// Full listing; replaces every cached workspace.
    #[serde(rename = "workspaces:received")]
    WorkspacesReceived { workspaces: Vec<Workspace> },

    #[serde(rename = "workspaces:failed")]
    WorkspacesFailed { error: String },

    /// Record added or replaced wholesale.
    #[serde(rename = "workspace:updated")]
    WorkspaceUpdated { workspace: Workspace },

    #[serde(rename = "workspace:deleted")]
    WorkspaceDeleted { id: WorkspaceId },

    /// Status notification from the push channel. `status` is the raw wire
    /// value; unrecognized values are dropped when applied.
    #[serde(rename = "workspace:status_pushed")]
    WorkspaceStatusPushed {
        id: WorkspaceId,
        status: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        error: Option<String>,
    },

    #[serde(rename = "workspace:log")]
    WorkspaceLog { id: WorkspaceId, line: String },

    // -- settings --
    #[serde(rename = "settings:received")]
    SettingsReceived { settings: WorkspaceSettings },

    // -- devfiles --
    #[serde(rename = "factory:resolved")]
    FactoryResolved { resolution: DevfileResolution },

    #[serde(rename = "registry:received")]
    RegistryReceived { entries: Vec<RegistryEntry> },

    #[serde(rename = "devfile:requested")]
    DevfileRequested { location: String },

    #[serde(rename = "devfile:received")]
    DevfileReceived { location: String, content: String },

    #[serde(rename = "devfile:failed")]
    DevfileFailed { location: String, error: String },
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Event::WorkspacesRequested => "workspaces:requested",
            Event::WorkspacesReceived { .. } => "workspaces:received",
            Event::WorkspacesFailed { .. } => "workspaces:failed",
            Event::WorkspaceUpdated { .. } => "workspace:updated",
            Event::WorkspaceDeleted { .. } => "workspace:deleted",
            Event::WorkspaceStatusPushed { .. } => "workspace:status_pushed",
            Event::WorkspaceLog { .. } => "workspace:log",
            Event::SettingsReceived { .. } => "settings:received",
            Event::FactoryResolved { .. } => "factory:resolved",
            Event::RegistryReceived { .. } => "registry:received",
            Event::DevfileRequested { .. } => "devfile:requested",
            Event::DevfileReceived { .. } => "devfile:received",
            Event::DevfileFailed { .. } => "devfile:failed",
        }
    }

    /// Workspace this event concerns, if any.
    pub fn workspace_id(&self) -> Option<&WorkspaceId> {
        match self {
            Event::WorkspaceUpdated { workspace } => Some(&workspace.id),
            Event::WorkspaceDeleted { id }
            | Event::WorkspaceStatusPushed { id, .. }
            | Event::WorkspaceLog { id, .. } => Some(id),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized dashboard state

use dash_core::{
    DevfileResolution, Event, RegistryEntry, Workspace, WorkspaceId, WorkspaceSettings,
    WorkspaceStatus,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fetch state of a devfile requested by location.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevfileEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Everything the dashboard knows, rebuilt from events.
///
/// Workspaces keep the order the server listed them in; records created
/// later are appended.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MaterializedState {
    pub workspaces: IndexMap<WorkspaceId, Workspace>,
    pub is_loading: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<WorkspaceSettings>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub factory_resolver: Option<DevfileResolution>,
    #[serde(default)]
    pub registry: Vec<RegistryEntry>,
    #[serde(default)]
    pub devfiles: HashMap<String, DevfileEntry>,
    #[serde(default)]
    pub logs: HashMap<WorkspaceId, Vec<String>>,
}

impl MaterializedState {
    pub fn workspace(&self, id: &str) -> Option<&Workspace> {
        self.workspaces.get(id)
    }

    pub fn find_by_qualified_name(&self, namespace: &str, name: &str) -> Option<&Workspace> {
        self.workspaces
            .values()
            .find(|ws| ws.is_named(namespace, name))
    }

    /// Up to `n` workspaces, most recently modified first.
    pub fn recent(&self, n: usize) -> Vec<&Workspace> {
        let mut all: Vec<&Workspace> = self.workspaces.values().collect();
        all.sort_by_key(|ws| std::cmp::Reverse(ws.last_modified_ms()));
        all.truncate(n);
        all
    }

    pub fn logs(&self, id: &str) -> &[String] {
        self.logs.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Apply an event to derive state changes.
    pub fn apply_event(&mut self, event: &Event) {
        match event {
            Event::WorkspacesRequested => {
                self.is_loading = true;
                self.last_error = None;
            }
            Event::WorkspacesReceived { workspaces } => {
                self.is_loading = false;
                self.workspaces = workspaces
                    .iter()
                    .map(|ws| (ws.id.clone(), ws.clone()))
                    .collect();
            }
            Event::WorkspacesFailed { error } => {
                // Cached workspaces stay as they were
                self.is_loading = false;
                self.last_error = Some(error.clone());
            }
            Event::WorkspaceUpdated { workspace } => {
                self.is_loading = false;
                self.workspaces
                    .insert(workspace.id.clone(), workspace.clone());
            }
            Event::WorkspaceDeleted { id } => {
                self.is_loading = false;
                self.workspaces.shift_remove(id);
                self.logs.remove(id);
            }
            Event::WorkspaceStatusPushed { id, status, error } => {
                self.apply_status_push(id, status, error.as_deref());
            }
            Event::WorkspaceLog { id, line } => {
                self.logs.entry(id.clone()).or_default().push(line.clone());
            }
            Event::SettingsReceived { settings } => {
                self.settings = Some(settings.clone());
            }
            Event::FactoryResolved { resolution } => {
                self.factory_resolver = Some(resolution.clone());
            }
            Event::RegistryReceived { entries } => {
                self.registry = entries.clone();
            }
            Event::DevfileRequested { location } => {
                self.devfiles.insert(
                    location.clone(),
                    DevfileEntry {
                        content: None,
                        is_loading: true,
                        error: None,
                    },
                );
            }
            Event::DevfileReceived { location, content } => {
                self.devfiles.insert(
                    location.clone(),
                    DevfileEntry {
                        content: Some(content.clone()),
                        is_loading: false,
                        error: None,
                    },
                );
            }
            Event::DevfileFailed { location, error } => {
                self.devfiles.insert(
                    location.clone(),
                    DevfileEntry {
                        content: None,
                        is_loading: false,
                        error: Some(error.clone()),
                    },
                );
            }
        }
    }

    /// Overlay a pushed status onto a cached workspace.
    ///
    /// A push carrying an error means `ERROR`. Pushes for unknown workspaces
    /// and unrecognized statuses are dropped. Only `status` changes.
    fn apply_status_push(&mut self, id: &WorkspaceId, raw: &str, error: Option<&str>) {
        let status = match error {
            Some(e) if !e.is_empty() => Some(WorkspaceStatus::Error),
            _ => WorkspaceStatus::parse(raw),
        };
        let Some(status) = status else {
            tracing::debug!(workspace_id = %id, status = raw, "dropping unrecognized status push");
            return;
        };
        match self.workspaces.get_mut(id) {
            Some(ws) => ws.status = status,
            None => tracing::debug!(workspace_id = %id, %status, "dropping push for unknown workspace"),
        }
    }
}

#[cfg(test)]
#[path = "state_tests.rs"]
mod tests;

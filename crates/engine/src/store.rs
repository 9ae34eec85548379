// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace repository.
//!
//! Wraps the REST API and the push channel around the shared
//! [`MaterializedState`]. Every result is applied as an [`Event`] and then
//! broadcast, so controllers can wait on the store's update cycle instead
//! of polling.

use crate::error::{cause, StoreError};
use dash_adapters::{CreateRequest, StatusChannel, WorkspaceApi};
use dash_core::{Devfile, Event, Workspace, WorkspaceId, WorkspaceSettings, WorkspaceStatus};
use dash_storage::MaterializedState;
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::broadcast;

const CHANGES_CAPACITY: usize = 256;

pub struct WorkspaceStore<W, C> {
    api: W,
    channel: C,
    state: Arc<Mutex<MaterializedState>>,
    changes: broadcast::Sender<Event>,
}

impl<W: Clone, C: Clone> Clone for WorkspaceStore<W, C> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            channel: self.channel.clone(),
            state: Arc::clone(&self.state),
            changes: self.changes.clone(),
        }
    }
}

impl<W, C> WorkspaceStore<W, C>
where
    W: WorkspaceApi,
    C: StatusChannel,
{
    pub fn new(api: W, channel: C, state: Arc<Mutex<MaterializedState>>) -> Self {
        let (changes, _) = broadcast::channel(CHANGES_CAPACITY);
        Self {
            api,
            channel,
            state,
            changes,
        }
    }

    pub fn state(&self) -> Arc<Mutex<MaterializedState>> {
        Arc::clone(&self.state)
    }

    /// Events applied from now on.
    pub fn changes(&self) -> broadcast::Receiver<Event> {
        self.changes.subscribe()
    }

    /// Apply an event that arrived from outside (push channel).
    pub fn handle_event(&self, event: Event) {
        self.apply(event);
    }

    fn apply(&self, event: Event) {
        self.state.lock().apply_event(&event);
        // No receivers is fine
        let _ = self.changes.send(event);
    }

    /// Store a start/stop response. A status pushed while the request was
    /// in flight is newer than the response and wins.
    fn apply_transition(&self, before: Option<WorkspaceStatus>, mut workspace: Workspace) -> Workspace {
        let pushed = self
            .find_by_id(workspace.id.as_str())
            .map(|w| w.status)
            .filter(|status| Some(*status) != before);
        if let Some(status) = pushed {
            tracing::debug!(id = %workspace.id, %status, "keeping status pushed during request");
            workspace.status = status;
        }
        self.apply(Event::WorkspaceUpdated {
            workspace: workspace.clone(),
        });
        workspace
    }

    fn fail(&self, err: StoreError) -> StoreError {
        self.apply(Event::WorkspacesFailed {
            error: err.to_string(),
        });
        err
    }

    async fn subscribe(&self, id: &WorkspaceId) {
        if let Err(e) = self.channel.subscribe(id).await {
            tracing::warn!(workspace_id = %id, error = %e, "no live status updates");
        }
    }

    /// Drop every push subscription this store made.
    pub async fn unsubscribe_all(&self) {
        if let Err(e) = self.channel.unsubscribe_all().await {
            tracing::debug!(error = %e, "unsubscribe failed");
        }
    }

    /// Fetch all workspaces, replacing the cache. On failure the cache is kept.
    pub async fn list(&self) -> Result<Vec<Workspace>, StoreError> {
        self.apply(Event::WorkspacesRequested);
        let workspaces = match self.api.list().await {
            Ok(workspaces) => workspaces,
            Err(e) => return Err(self.fail(StoreError::List { message: cause(&e) })),
        };
        self.apply(Event::WorkspacesReceived {
            workspaces: workspaces.clone(),
        });
        self.unsubscribe_all().await;
        for ws in &workspaces {
            self.subscribe(&ws.id).await;
        }
        Ok(workspaces)
    }

    pub async fn create(
        &self,
        devfile: Devfile,
        namespace: Option<String>,
        infrastructure_namespace: Option<String>,
        attributes: IndexMap<String, String>,
    ) -> Result<Workspace, StoreError> {
        self.apply(Event::WorkspacesRequested);
        let request = CreateRequest {
            devfile,
            namespace,
            infrastructure_namespace,
            attributes,
        };
        let workspace = match self.api.create(&request).await {
            Ok(ws) => ws,
            Err(e) => return Err(self.fail(StoreError::Create { message: cause(&e) })),
        };
        self.apply(Event::WorkspaceUpdated {
            workspace: workspace.clone(),
        });
        self.subscribe(&workspace.id).await;
        Ok(workspace)
    }

    pub async fn start(&self, id: &WorkspaceId) -> Result<Workspace, StoreError> {
        let before = self.find_by_id(id.as_str()).map(|w| w.status);
        self.apply(Event::WorkspacesRequested);
        match self.api.start(id).await {
            Ok(workspace) => Ok(self.apply_transition(before, workspace)),
            Err(e) => Err(self.fail(StoreError::Start {
                id: id.clone(),
                message: cause(&e),
            })),
        }
    }

    pub async fn stop(&self, id: &WorkspaceId) -> Result<Workspace, StoreError> {
        let before = self.find_by_id(id.as_str()).map(|w| w.status);
        self.apply(Event::WorkspacesRequested);
        match self.api.stop(id).await {
            Ok(workspace) => Ok(self.apply_transition(before, workspace)),
            Err(e) => Err(self.fail(StoreError::Stop {
                id: id.clone(),
                message: cause(&e),
            })),
        }
    }

    /// Replace a workspace wholesale.
    pub async fn update(&self, workspace: &Workspace) -> Result<Workspace, StoreError> {
        self.apply(Event::WorkspacesRequested);
        match self.api.update(workspace).await {
            Ok(updated) => {
                self.apply(Event::WorkspaceUpdated {
                    workspace: updated.clone(),
                });
                Ok(updated)
            }
            Err(e) => Err(self.fail(StoreError::Update {
                id: workspace.id.clone(),
                message: cause(&e),
            })),
        }
    }

    pub async fn delete(&self, id: &WorkspaceId) -> Result<(), StoreError> {
        self.apply(Event::WorkspacesRequested);
        match self.api.delete(id).await {
            Ok(()) => {
                self.apply(Event::WorkspaceDeleted { id: id.clone() });
                Ok(())
            }
            Err(e) => Err(self.fail(StoreError::Delete {
                id: id.clone(),
                message: cause(&e),
            })),
        }
    }

    /// Re-fetch one workspace, picking up its runtime.
    pub async fn refresh(&self, id: &WorkspaceId) -> Result<Workspace, StoreError> {
        match self.api.get(id).await {
            Ok(workspace) => {
                self.apply(Event::WorkspaceUpdated {
                    workspace: workspace.clone(),
                });
                Ok(workspace)
            }
            Err(e) => Err(StoreError::Refresh {
                id: id.clone(),
                message: cause(&e),
            }),
        }
    }

    pub async fn settings(&self) -> Result<WorkspaceSettings, StoreError> {
        match self.api.settings().await {
            Ok(settings) => {
                self.apply(Event::SettingsReceived {
                    settings: settings.clone(),
                });
                Ok(settings)
            }
            Err(e) => Err(self.fail(StoreError::Settings { message: cause(&e) })),
        }
    }

    /// Overlay a status onto a cached record.
    pub fn apply_status_push(&self, id: &WorkspaceId, status: WorkspaceStatus) {
        self.apply(Event::WorkspaceStatusPushed {
            id: id.clone(),
            status: status.as_str().to_string(),
            error: None,
        });
    }

    pub fn find_by_id(&self, id: &str) -> Option<Workspace> {
        self.state.lock().workspace(id).cloned()
    }

    pub fn find_by_qualified_name(&self, namespace: &str, name: &str) -> Option<Workspace> {
        self.state
            .lock()
            .find_by_qualified_name(namespace, name)
            .cloned()
    }

    pub fn workspaces(&self) -> Vec<Workspace> {
        self.state.lock().workspaces.values().cloned().collect()
    }

    pub fn recent(&self, n: usize) -> Vec<Workspace> {
        self.state.lock().recent(n).into_iter().cloned().collect()
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().is_loading
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.lock().last_error.clone()
    }

    pub fn logs(&self, id: &str) -> Vec<String> {
        self.state.lock().logs(id).to_vec()
    }
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;

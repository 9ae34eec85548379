// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake workspace API for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{CreateRequest, WorkspaceApi};
use crate::http::ApiError;
use async_trait::async_trait;
use dash_core::{
    IdGen, SequentialIdGen, Workspace, WorkspaceId, WorkspaceRuntime, WorkspaceSettings,
    WorkspaceStatus,
};
use indexmap::IndexMap;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Operations that can be made to fail or stall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkspaceOp {
    List,
    Get,
    Create,
    Start,
    Stop,
    Update,
    Delete,
    Settings,
}

/// Recorded API call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceCall {
    List,
    Get { id: WorkspaceId },
    Create { request: CreateRequest },
    Start { id: WorkspaceId },
    Stop { id: WorkspaceId },
    Update { id: WorkspaceId },
    Delete { id: WorkspaceId },
    Settings,
}

struct FakeWorkspaceState {
    workspaces: IndexMap<WorkspaceId, Workspace>,
    settings: WorkspaceSettings,
    calls: Vec<WorkspaceCall>,
    failures: HashMap<WorkspaceOp, String>,
    delays: HashMap<WorkspaceOp, Duration>,
    default_namespace: String,
    clock_ms: u64,
}

/// In-memory workspace server
#[derive(Clone)]
pub struct FakeWorkspaceApi {
    inner: Arc<Mutex<FakeWorkspaceState>>,
    ids: SequentialIdGen,
}

impl Default for FakeWorkspaceApi {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeWorkspaceState {
                workspaces: IndexMap::new(),
                settings: WorkspaceSettings::default(),
                calls: Vec::new(),
                failures: HashMap::new(),
                delays: HashMap::new(),
                default_namespace: "che".to_string(),
                clock_ms: 1_000,
            })),
            ids: SequentialIdGen::new("ws"),
        }
    }
}

impl FakeWorkspaceApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<WorkspaceCall> {
        self.inner.lock().calls.clone()
    }

    /// Count recorded calls matching `pred`
    pub fn count(&self, pred: impl Fn(&WorkspaceCall) -> bool) -> usize {
        self.inner.lock().calls.iter().filter(|c| pred(c)).count()
    }

    /// Seed a workspace as if it already existed on the server
    pub fn add(&self, workspace: Workspace) {
        self.inner
            .lock()
            .workspaces
            .insert(workspace.id.clone(), workspace);
    }

    pub fn workspace(&self, id: &str) -> Option<Workspace> {
        self.inner.lock().workspaces.get(id).cloned()
    }

    pub fn set_status(&self, id: &str, status: WorkspaceStatus) {
        if let Some(ws) = self.inner.lock().workspaces.get_mut(id) {
            ws.status = status;
        }
    }

    pub fn set_runtime(&self, id: &str, runtime: Option<WorkspaceRuntime>) {
        if let Some(ws) = self.inner.lock().workspaces.get_mut(id) {
            ws.runtime = runtime;
        }
    }

    pub fn set_settings(&self, settings: WorkspaceSettings) {
        self.inner.lock().settings = settings;
    }

    /// Make every call of `op` fail with `message` until cleared
    pub fn fail(&self, op: WorkspaceOp, message: impl Into<String>) {
        self.inner.lock().failures.insert(op, message.into());
    }

    pub fn clear_failure(&self, op: WorkspaceOp) {
        self.inner.lock().failures.remove(&op);
    }

    /// Delay every call of `op` by `delay` (pairs with paused tokio time)
    pub fn delay(&self, op: WorkspaceOp, delay: Duration) {
        self.inner.lock().delays.insert(op, delay);
    }

    async fn enter(&self, op: WorkspaceOp, call: WorkspaceCall) -> Result<(), ApiError> {
        let delay = {
            let mut inner = self.inner.lock();
            inner.calls.push(call);
            inner.delays.get(&op).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match self.inner.lock().failures.get(&op) {
            Some(message) => Err(ApiError::Server {
                status: 500,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    fn not_found(id: &WorkspaceId) -> ApiError {
        ApiError::Server {
            status: 404,
            message: format!("Workspace with id '{id}' doesn't exist"),
        }
    }

    fn transition(&self, id: &WorkspaceId, status: WorkspaceStatus) -> Result<Workspace, ApiError> {
        let mut inner = self.inner.lock();
        let ws = inner
            .workspaces
            .get_mut(id)
            .ok_or_else(|| Self::not_found(id))?;
        ws.status = status;
        Ok(ws.clone())
    }
}

#[async_trait]
impl WorkspaceApi for FakeWorkspaceApi {
    async fn list(&self) -> Result<Vec<Workspace>, ApiError> {
        self.enter(WorkspaceOp::List, WorkspaceCall::List).await?;
        Ok(self.inner.lock().workspaces.values().cloned().collect())
    }

    async fn get(&self, id: &WorkspaceId) -> Result<Workspace, ApiError> {
        self.enter(WorkspaceOp::Get, WorkspaceCall::Get { id: id.clone() })
            .await?;
        self.inner
            .lock()
            .workspaces
            .get(id)
            .cloned()
            .ok_or_else(|| Self::not_found(id))
    }

    async fn create(&self, request: &CreateRequest) -> Result<Workspace, ApiError> {
        self.enter(
            WorkspaceOp::Create,
            WorkspaceCall::Create {
                request: request.clone(),
            },
        )
        .await?;
        let mut inner = self.inner.lock();
        inner.clock_ms += 1;
        let mut attributes = request.attributes.clone();
        attributes.insert("created".to_string(), inner.clock_ms.to_string());
        let workspace = Workspace {
            id: WorkspaceId::new(self.ids.next()),
            namespace: request
                .namespace
                .clone()
                .unwrap_or_else(|| inner.default_namespace.clone()),
            status: WorkspaceStatus::Stopped,
            devfile: request.devfile.clone(),
            runtime: None,
            attributes,
        };
        inner
            .workspaces
            .insert(workspace.id.clone(), workspace.clone());
        Ok(workspace)
    }

    async fn start(&self, id: &WorkspaceId) -> Result<Workspace, ApiError> {
        self.enter(WorkspaceOp::Start, WorkspaceCall::Start { id: id.clone() })
            .await?;
        self.transition(id, WorkspaceStatus::Starting)
    }

    async fn stop(&self, id: &WorkspaceId) -> Result<Workspace, ApiError> {
        self.enter(WorkspaceOp::Stop, WorkspaceCall::Stop { id: id.clone() })
            .await?;
        self.transition(id, WorkspaceStatus::Stopping)
    }

    async fn update(&self, workspace: &Workspace) -> Result<Workspace, ApiError> {
        self.enter(
            WorkspaceOp::Update,
            WorkspaceCall::Update {
                id: workspace.id.clone(),
            },
        )
        .await?;
        let mut inner = self.inner.lock();
        if !inner.workspaces.contains_key(&workspace.id) {
            return Err(Self::not_found(&workspace.id));
        }
        inner.clock_ms += 1;
        let mut updated = workspace.clone();
        updated
            .attributes
            .insert("updated".to_string(), inner.clock_ms.to_string());
        inner
            .workspaces
            .insert(updated.id.clone(), updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: &WorkspaceId) -> Result<(), ApiError> {
        self.enter(WorkspaceOp::Delete, WorkspaceCall::Delete { id: id.clone() })
            .await?;
        self.inner
            .lock()
            .workspaces
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }

    async fn settings(&self) -> Result<WorkspaceSettings, ApiError> {
        self.enter(WorkspaceOp::Settings, WorkspaceCall::Settings)
            .await?;
        Ok(self.inner.lock().settings.clone())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

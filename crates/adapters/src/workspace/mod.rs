// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace REST API adapters

mod http;

pub use http::HttpWorkspaceApi;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeWorkspaceApi, WorkspaceCall, WorkspaceOp};

use crate::http::ApiError;
use async_trait::async_trait;
use dash_core::{Devfile, Workspace, WorkspaceId, WorkspaceSettings};
use indexmap::IndexMap;

/// Everything needed to create a workspace from a devfile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRequest {
    pub devfile: Devfile,
    pub namespace: Option<String>,
    pub infrastructure_namespace: Option<String>,
    pub attributes: IndexMap<String, String>,
}

impl CreateRequest {
    pub fn new(devfile: Devfile) -> Self {
        Self {
            devfile,
            namespace: None,
            infrastructure_namespace: None,
            attributes: IndexMap::new(),
        }
    }

    pub fn with_attributes(mut self, attributes: IndexMap<String, String>) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Adapter for the workspace server's REST API
#[async_trait]
pub trait WorkspaceApi: Clone + Send + Sync + 'static {
    async fn list(&self) -> Result<Vec<Workspace>, ApiError>;

    async fn get(&self, id: &WorkspaceId) -> Result<Workspace, ApiError>;

    async fn create(&self, request: &CreateRequest) -> Result<Workspace, ApiError>;

    async fn start(&self, id: &WorkspaceId) -> Result<Workspace, ApiError>;

    async fn stop(&self, id: &WorkspaceId) -> Result<Workspace, ApiError>;

    /// Replace a workspace wholesale.
    async fn update(&self, workspace: &Workspace) -> Result<Workspace, ApiError>;

    async fn delete(&self, id: &WorkspaceId) -> Result<(), ApiError>;

    async fn settings(&self) -> Result<WorkspaceSettings, ApiError>;
}

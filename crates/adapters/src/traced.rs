// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::devfile::{DevfileAdapter, DevfileError, FactoryResolverResponse};
use crate::http::ApiError;
use crate::workspace::{CreateRequest, WorkspaceApi};
use async_trait::async_trait;
use dash_core::{RegistryEntry, Workspace, WorkspaceId, WorkspaceSettings};
use tracing::Instrument;

/// Wrapper that adds tracing to any WorkspaceApi
#[derive(Clone)]
pub struct TracedWorkspaceApi<W> {
    inner: W,
}

impl<W> TracedWorkspaceApi<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<W: WorkspaceApi> WorkspaceApi for TracedWorkspaceApi<W> {
    async fn list(&self) -> Result<Vec<Workspace>, ApiError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.list().await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(list) => tracing::info!(count = list.len(), elapsed_ms, "listed"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "list failed"),
            }
            result
        }
        .instrument(tracing::info_span!("workspace.list"))
        .await
    }

    async fn get(&self, id: &WorkspaceId) -> Result<Workspace, ApiError> {
        let result = self.inner.get(id).await;
        tracing::info_span!("workspace.get", %id).in_scope(|| match &result {
            Ok(ws) => tracing::debug!(status = %ws.status, "fetched"),
            Err(e) => tracing::error!(error = %e, "get failed"),
        });
        result
    }

    async fn create(&self, request: &CreateRequest) -> Result<Workspace, ApiError> {
        let span = tracing::info_span!("workspace.create", name = request.devfile.name());
        async {
            tracing::info!(attributes = request.attributes.len(), "creating");
            let start = std::time::Instant::now();
            let result = self.inner.create(request).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(ws) => tracing::info!(id = %ws.id, namespace = %ws.namespace, elapsed_ms, "workspace created"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "create failed"),
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn start(&self, id: &WorkspaceId) -> Result<Workspace, ApiError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.start(id).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(ws) => tracing::info!(status = %ws.status, elapsed_ms, "start requested"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "start failed"),
            }
            result
        }
        .instrument(tracing::info_span!("workspace.start", %id))
        .await
    }

    async fn stop(&self, id: &WorkspaceId) -> Result<Workspace, ApiError> {
        let result = self.inner.stop(id).await;
        tracing::info_span!("workspace.stop", %id).in_scope(|| match &result {
            Ok(ws) => tracing::info!(status = %ws.status, "stop requested"),
            Err(e) => tracing::error!(error = %e, "stop failed"),
        });
        result
    }

    async fn update(&self, workspace: &Workspace) -> Result<Workspace, ApiError> {
        let result = self.inner.update(workspace).await;
        if let Err(ref e) = result {
            tracing::error!(id = %workspace.id, error = %e, "update failed");
        }
        result
    }

    async fn delete(&self, id: &WorkspaceId) -> Result<(), ApiError> {
        let result = self.inner.delete(id).await;
        tracing::info_span!("workspace.delete", %id).in_scope(|| match &result {
            Ok(()) => tracing::info!("deleted"),
            Err(e) => tracing::error!(error = %e, "delete failed"),
        });
        result
    }

    async fn settings(&self) -> Result<WorkspaceSettings, ApiError> {
        let result = self.inner.settings().await;
        tracing::trace!(ok = result.is_ok(), "settings fetched");
        result
    }
}

/// Wrapper that adds tracing to any DevfileAdapter
#[derive(Clone)]
pub struct TracedDevfileAdapter<D> {
    inner: D,
}

impl<D> TracedDevfileAdapter<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<D: DevfileAdapter> DevfileAdapter for TracedDevfileAdapter<D> {
    async fn resolve_factory(
        &self,
        location: &str,
    ) -> Result<FactoryResolverResponse, DevfileError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.resolve_factory(location).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(r) => tracing::info!(
                    source = r.source.as_deref().unwrap_or("-"),
                    has_devfile = r.devfile.is_some(),
                    elapsed_ms,
                    "factory resolved"
                ),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "resolve failed"),
            }
            result
        }
        .instrument(tracing::info_span!("devfile.resolve", location))
        .await
    }

    async fn fetch_devfile(&self, url: &str) -> Result<String, DevfileError> {
        let result = self.inner.fetch_devfile(url).await;
        tracing::info_span!("devfile.fetch", url).in_scope(|| match &result {
            Ok(text) => tracing::debug!(len = text.len(), "fetched"),
            Err(e) => tracing::error!(error = %e, "fetch failed"),
        });
        result
    }

    async fn fetch_registry_index(
        &self,
        registry: &str,
    ) -> Result<Vec<RegistryEntry>, DevfileError> {
        async {
            let start = std::time::Instant::now();
            let result = self.inner.fetch_registry_index(registry).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match &result {
                Ok(entries) => tracing::info!(count = entries.len(), elapsed_ms, "registry fetched"),
                Err(e) => tracing::error!(elapsed_ms, error = %e, "registry fetch failed"),
            }
            result
        }
        .instrument(tracing::info_span!("devfile.registry", registry))
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REST implementation of the workspace API

use super::{CreateRequest, WorkspaceApi};
use crate::http::{ApiError, RestClient};
use async_trait::async_trait;
use dash_core::{Workspace, WorkspaceId, WorkspaceSettings};
use reqwest::Method;
use url::Url;

/// Workspace API over HTTP
#[derive(Clone)]
pub struct HttpWorkspaceApi {
    client: RestClient,
}

impl HttpWorkspaceApi {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

/// `POST {api}/workspace/devfile` URL with attributes and namespace hints
/// as query parameters.
pub(crate) fn create_url(client: &RestClient, request: &CreateRequest) -> Result<Url, ApiError> {
    let mut url = client.api_url("/workspace/devfile")?;
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in &request.attributes {
            query.append_pair("attribute", &format!("{key}:{value}"));
        }
        if let Some(namespace) = &request.namespace {
            query.append_pair("namespace", namespace);
        }
        if let Some(infra) = &request.infrastructure_namespace {
            query.append_pair("infrastructure-namespace", infra);
        }
    }
    if url.query() == Some("") {
        url.set_query(None);
    }
    Ok(url)
}

#[async_trait]
impl WorkspaceApi for HttpWorkspaceApi {
    async fn list(&self) -> Result<Vec<Workspace>, ApiError> {
        let url = self.client.api_url("/workspace")?;
        RestClient::send_json(self.client.request(Method::GET, url)).await
    }

    async fn get(&self, id: &WorkspaceId) -> Result<Workspace, ApiError> {
        let url = self.client.api_url(&format!("/workspace/{id}"))?;
        RestClient::send_json(self.client.request(Method::GET, url)).await
    }

    async fn create(&self, request: &CreateRequest) -> Result<Workspace, ApiError> {
        let url = create_url(&self.client, request)?;
        RestClient::send_json(self.client.request(Method::POST, url).json(&request.devfile)).await
    }

    async fn start(&self, id: &WorkspaceId) -> Result<Workspace, ApiError> {
        let url = self.client.api_url(&format!("/workspace/{id}/runtime"))?;
        RestClient::send_json(self.client.request(Method::POST, url)).await
    }

    async fn stop(&self, id: &WorkspaceId) -> Result<Workspace, ApiError> {
        // The runtime endpoint answers with an empty body; read the record back.
        let url = self.client.api_url(&format!("/workspace/{id}/runtime"))?;
        RestClient::send_empty(self.client.request(Method::DELETE, url)).await?;
        self.get(id).await
    }

    async fn update(&self, workspace: &Workspace) -> Result<Workspace, ApiError> {
        let url = self.client.api_url(&format!("/workspace/{}", workspace.id))?;
        RestClient::send_json(self.client.request(Method::PUT, url).json(workspace)).await
    }

    async fn delete(&self, id: &WorkspaceId) -> Result<(), ApiError> {
        let url = self.client.api_url(&format!("/workspace/{id}"))?;
        RestClient::send_empty(self.client.request(Method::DELETE, url)).await
    }

    async fn settings(&self) -> Result<WorkspaceSettings, ApiError> {
        let url = self.client.api_url("/workspace/settings")?;
        RestClient::send_json(self.client.request(Method::GET, url)).await
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;

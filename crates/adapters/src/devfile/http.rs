// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::{DevfileAdapter, DevfileError, FactoryResolverResponse};
use crate::http::{ApiError, RestClient};
use async_trait::async_trait;
use dash_core::{registry_base, RegistryEntry};
use reqwest::Method;

/// Devfile sources over HTTP.
///
/// Registry and devfile fetches go out without the session token; they
/// usually point at third-party hosts.
#[derive(Clone)]
pub struct HttpDevfileAdapter {
    client: RestClient,
}

impl HttpDevfileAdapter {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl DevfileAdapter for HttpDevfileAdapter {
    async fn resolve_factory(
        &self,
        location: &str,
    ) -> Result<FactoryResolverResponse, DevfileError> {
        let url = self.client.api_url("/factory/resolver")?;
        let body = serde_json::json!({ "url": location });
        let request = self.client.request(Method::POST, url).json(&body);
        Ok(RestClient::send_json(request).await?)
    }

    async fn fetch_devfile(&self, url: &str) -> Result<String, DevfileError> {
        Ok(RestClient::send_text(self.client.anonymous(url)).await?)
    }

    async fn fetch_registry_index(
        &self,
        registry: &str,
    ) -> Result<Vec<RegistryEntry>, DevfileError> {
        let base = registry_base(registry).map_err(|source| DevfileError::RegistryUrl {
            url: registry.to_string(),
            source,
        })?;
        let index = base.join("devfiles/index.json").map_err(ApiError::from)?;
        let entries: Vec<RegistryEntry> =
            RestClient::send_json(self.client.anonymous(index.as_str())).await?;
        Ok(entries
            .into_iter()
            .map(|entry| entry.resolve_links(&base))
            .collect())
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake devfile adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{DevfileAdapter, DevfileError, FactoryResolverResponse};
use crate::http::ApiError;
use async_trait::async_trait;
use dash_core::{Devfile, RegistryEntry};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Recorded devfile adapter call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DevfileCall {
    ResolveFactory { location: String },
    FetchDevfile { url: String },
    FetchRegistryIndex { registry: String },
}

#[derive(Default)]
struct FakeDevfileState {
    calls: Vec<DevfileCall>,
    factories: HashMap<String, Result<FactoryResolverResponse, String>>,
    devfiles: HashMap<String, String>,
    registries: HashMap<String, Vec<RegistryEntry>>,
    delays: HashMap<String, Duration>,
}

/// Fake devfile adapter with canned responses keyed by location
#[derive(Clone, Default)]
pub struct FakeDevfileAdapter {
    inner: Arc<Mutex<FakeDevfileState>>,
}

fn not_found(what: &str) -> DevfileError {
    DevfileError::Api(ApiError::Server {
        status: 404,
        message: format!("{what} not found"),
    })
}

impl FakeDevfileAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<DevfileCall> {
        self.inner.lock().calls.clone()
    }

    /// Resolve `location` to `devfile` with the given source classification
    pub fn set_factory(&self, location: &str, source: &str, devfile: Option<Devfile>) {
        self.inner.lock().factories.insert(
            location.to_string(),
            Ok(FactoryResolverResponse {
                source: Some(source.to_string()),
                devfile,
            }),
        );
    }

    pub fn fail_factory(&self, location: &str, message: &str) {
        self.inner
            .lock()
            .factories
            .insert(location.to_string(), Err(message.to_string()));
    }

    pub fn set_devfile(&self, url: &str, content: &str) {
        self.inner
            .lock()
            .devfiles
            .insert(url.to_string(), content.to_string());
    }

    pub fn set_registry(&self, registry: &str, entries: Vec<RegistryEntry>) {
        self.inner
            .lock()
            .registries
            .insert(registry.to_string(), entries);
    }

    /// Delay any call for `key` (location, url or registry)
    pub fn delay(&self, key: &str, delay: Duration) {
        self.inner.lock().delays.insert(key.to_string(), delay);
    }

    async fn enter(&self, key: &str, call: DevfileCall) {
        let delay = {
            let mut inner = self.inner.lock();
            inner.calls.push(call);
            inner.delays.get(key).copied()
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl DevfileAdapter for FakeDevfileAdapter {
    async fn resolve_factory(
        &self,
        location: &str,
    ) -> Result<FactoryResolverResponse, DevfileError> {
        self.enter(
            location,
            DevfileCall::ResolveFactory {
                location: location.to_string(),
            },
        )
        .await;
        match self.inner.lock().factories.get(location) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(DevfileError::Api(ApiError::Server {
                status: 400,
                message: message.clone(),
            })),
            None => Err(not_found(location)),
        }
    }

    async fn fetch_devfile(&self, url: &str) -> Result<String, DevfileError> {
        self.enter(
            url,
            DevfileCall::FetchDevfile {
                url: url.to_string(),
            },
        )
        .await;
        self.inner
            .lock()
            .devfiles
            .get(url)
            .cloned()
            .ok_or_else(|| not_found(url))
    }

    async fn fetch_registry_index(
        &self,
        registry: &str,
    ) -> Result<Vec<RegistryEntry>, DevfileError> {
        self.enter(
            registry,
            DevfileCall::FetchRegistryIndex {
                registry: registry.to_string(),
            },
        )
        .await;
        self.inner
            .lock()
            .registries
            .get(registry)
            .cloned()
            .ok_or_else(|| not_found(registry))
    }
}

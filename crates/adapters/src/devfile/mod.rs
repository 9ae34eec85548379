// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Devfile source adapters: factory resolver, raw devfile fetch, registry index

mod http;

pub use http::HttpDevfileAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{DevfileCall, FakeDevfileAdapter};

use crate::http::ApiError;
use async_trait::async_trait;
use dash_core::{Devfile, RegistryEntry};
use serde::Deserialize;
use thiserror::Error;

/// Errors from devfile sources
#[derive(Debug, Error)]
pub enum DevfileError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid registry url {url}: {source}")]
    RegistryUrl {
        url: String,
        source: url::ParseError,
    },
}

/// Server's answer to a factory resolution request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FactoryResolverResponse {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub devfile: Option<Devfile>,
}

/// Adapter for locating devfiles
#[async_trait]
pub trait DevfileAdapter: Clone + Send + Sync + 'static {
    /// Ask the server to find a devfile for a source location.
    async fn resolve_factory(&self, location: &str)
        -> Result<FactoryResolverResponse, DevfileError>;

    /// Plain fetch of a devfile document.
    async fn fetch_devfile(&self, url: &str) -> Result<String, DevfileError>;

    /// Entries of `<registry>/devfiles/index.json`, links resolved.
    async fn fetch_registry_index(&self, registry: &str)
        -> Result<Vec<RegistryEntry>, DevfileError>;
}

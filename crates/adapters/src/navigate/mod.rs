// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Navigation sinks

mod log;

pub use self::log::LogNavigator;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNavigator, NavigateCall};

use async_trait::async_trait;
use serde::Serialize;

/// What an embedding frame needs to open the IDE: its URL and the session
/// token it must present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeLaunch {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Route changes requested by controllers.
#[async_trait]
pub trait Navigator: Clone + Send + Sync + 'static {
    /// Push a new route.
    async fn redirect(&self, path: &str);

    /// Replace the current route without adding history.
    async fn replace(&self, path: &str);

    /// Hand the IDE endpoint to the presentation layer.
    async fn open_ide(&self, launch: IdeLaunch);
}

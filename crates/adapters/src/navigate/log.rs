// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Navigator for headless use.

use super::{IdeLaunch, Navigator};
use async_trait::async_trait;

/// Records navigation in the log only. Callers read the outcome from the
/// loader's view instead.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNavigator;

impl LogNavigator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Navigator for LogNavigator {
    async fn redirect(&self, path: &str) {
        tracing::info!(path, "navigate");
    }

    async fn replace(&self, path: &str) {
        tracing::info!(path, "navigate (replace)");
    }

    async fn open_ide(&self, launch: IdeLaunch) {
        tracing::info!(url = %launch.url, has_token = launch.token.is_some(), "open ide");
    }
}

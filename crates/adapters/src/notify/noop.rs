// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Log-only alert sink.

use super::{AlertAdapter, AlertError};
use async_trait::async_trait;
use dash_core::AlertVariant;

/// Alert sink used when nothing presents alerts: messages are only logged.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpAlertAdapter;

impl NoOpAlertAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AlertAdapter for NoOpAlertAdapter {
    async fn show_alert(&self, variant: AlertVariant, message: &str) -> Result<(), AlertError> {
        match variant {
            AlertVariant::Danger => tracing::error!(%message, "alert"),
            AlertVariant::Warning => tracing::warn!(%message, "alert"),
            AlertVariant::Success | AlertVariant::Info => tracing::info!(%message, "alert"),
        }
        Ok(())
    }
}

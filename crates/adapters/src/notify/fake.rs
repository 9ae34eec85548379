// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake alert sink for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{AlertAdapter, AlertError};
use async_trait::async_trait;
use dash_core::AlertVariant;
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertCall {
    pub variant: AlertVariant,
    pub message: String,
}

struct FakeAlertState {
    calls: Vec<AlertCall>,
}

/// Fake alert sink for testing
#[derive(Clone)]
pub struct FakeAlertAdapter {
    inner: Arc<Mutex<FakeAlertState>>,
}

impl Default for FakeAlertAdapter {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeAlertState { calls: Vec::new() })),
        }
    }
}

impl FakeAlertAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded alerts
    pub fn calls(&self) -> Vec<AlertCall> {
        self.inner.lock().calls.clone()
    }

    /// Messages of the given severity, in order
    pub fn messages(&self, variant: AlertVariant) -> Vec<String> {
        self.inner
            .lock()
            .calls
            .iter()
            .filter(|c| c.variant == variant)
            .map(|c| c.message.clone())
            .collect()
    }
}

#[async_trait]
impl AlertAdapter for FakeAlertAdapter {
    async fn show_alert(&self, variant: AlertVariant, message: &str) -> Result<(), AlertError> {
        self.inner.lock().calls.push(AlertCall {
            variant,
            message: message.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake navigator for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{IdeLaunch, Navigator};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;

/// Recorded navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateCall {
    Redirect { path: String },
    Replace { path: String },
    OpenIde { launch: IdeLaunch },
}

#[derive(Clone, Default)]
pub struct FakeNavigator {
    calls: Arc<Mutex<Vec<NavigateCall>>>,
}

impl FakeNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<NavigateCall> {
        self.calls.lock().clone()
    }

    /// Every launch handed to `open_ide`, in order
    pub fn launches(&self) -> Vec<IdeLaunch> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                NavigateCall::OpenIde { launch } => Some(launch.clone()),
                _ => None,
            })
            .collect()
    }
}

#[async_trait]
impl Navigator for FakeNavigator {
    async fn redirect(&self, path: &str) {
        self.calls.lock().push(NavigateCall::Redirect {
            path: path.to_string(),
        });
    }

    async fn replace(&self, path: &str) {
        self.calls.lock().push(NavigateCall::Replace {
            path: path.to_string(),
        });
    }

    async fn open_ide(&self, launch: IdeLaunch) {
        self.calls.lock().push(NavigateCall::OpenIde { launch });
    }
}

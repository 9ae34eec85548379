// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Alert sinks

mod bus;
mod noop;

pub use bus::{AlertBus, BusAlertAdapter, ListenerId};
pub use noop::NoOpAlertAdapter;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{AlertCall, FakeAlertAdapter};

use async_trait::async_trait;
use dash_core::AlertVariant;
use thiserror::Error;

/// Errors from alert sinks
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("alert sink unavailable: {0}")]
    Unavailable(String),
}

/// Where controllers report user-facing messages.
#[async_trait]
pub trait AlertAdapter: Clone + Send + Sync + 'static {
    async fn show_alert(&self, variant: AlertVariant, message: &str) -> Result<(), AlertError>;
}

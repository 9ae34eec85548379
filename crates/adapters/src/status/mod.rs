// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Workspace status push channel

pub mod jsonrpc;
mod noop;
mod websocket;

pub use noop::NoOpStatusChannel;
pub use websocket::JsonRpcStatusChannel;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{ChannelCall, FakeStatusChannel};

use async_trait::async_trait;
use dash_core::WorkspaceId;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Errors from the push channel
#[derive(Debug, Error)]
pub enum ChannelError {
    #[error("invalid websocket url: {0}")]
    Url(#[from] url::ParseError),
    #[error("push channel is closed")]
    Closed,
}

/// What to do when the push connection drops or cannot be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconnectPolicy {
    /// Give up; the dashboard keeps working from fetched snapshots.
    #[default]
    Never,
    /// Retry with exponential backoff, replaying live subscriptions.
    Backoff { initial: Duration, max: Duration },
}

impl ReconnectPolicy {
    pub const DEFAULT_BACKOFF: ReconnectPolicy = ReconnectPolicy::Backoff {
        initial: Duration::from_secs(1),
        max: Duration::from_secs(30),
    };

    /// Delay before the next attempt, given the previous delay.
    pub fn next_delay(&self, previous: Option<Duration>) -> Option<Duration> {
        match self {
            ReconnectPolicy::Never => None,
            ReconnectPolicy::Backoff { initial, max } => Some(match previous {
                None => *initial,
                Some(prev) => (prev * 2).min(*max),
            }),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid reconnect policy '{0}' (expected never, backoff, or backoff:<initial_ms>:<max_ms>)")]
pub struct ReconnectPolicyParseError(String);

impl FromStr for ReconnectPolicy {
    type Err = ReconnectPolicyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ReconnectPolicyParseError(s.to_string());
        let mut parts = s.trim().split(':');
        match parts.next() {
            Some("never") => match parts.next() {
                None => Ok(ReconnectPolicy::Never),
                Some(_) => Err(err()),
            },
            Some("backoff") => {
                let rest: Vec<&str> = parts.collect();
                match rest.as_slice() {
                    [] => Ok(ReconnectPolicy::DEFAULT_BACKOFF),
                    [initial, max] => {
                        let initial = initial.parse::<u64>().map_err(|_| err())?;
                        let max = max.parse::<u64>().map_err(|_| err())?;
                        if initial == 0 || max < initial {
                            return Err(err());
                        }
                        Ok(ReconnectPolicy::Backoff {
                            initial: Duration::from_millis(initial),
                            max: Duration::from_millis(max),
                        })
                    }
                    _ => Err(err()),
                }
            }
            _ => Err(err()),
        }
    }
}

/// Adapter for per-workspace status notifications.
///
/// Notifications are delivered as events on the sender the channel was
/// built with.
#[async_trait]
pub trait StatusChannel: Clone + Send + Sync + 'static {
    /// Start receiving status and log notifications for `id`.
    async fn subscribe(&self, id: &WorkspaceId) -> Result<(), ChannelError>;

    /// Drop every subscription made so far.
    async fn unsubscribe_all(&self) -> Result<(), ChannelError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;

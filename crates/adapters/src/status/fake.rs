// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake push channel for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ChannelError, StatusChannel};
use async_trait::async_trait;
use dash_core::{Event, WorkspaceId};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Recorded channel call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelCall {
    Subscribe { id: WorkspaceId },
    UnsubscribeAll,
}

struct FakeChannelState {
    calls: Vec<ChannelCall>,
    subscriptions: Vec<WorkspaceId>,
    closed: bool,
}

/// In-memory push channel.
///
/// Notifications are injected with [`FakeStatusChannel::push`] and only
/// reach the event sender while the workspace is subscribed.
#[derive(Clone)]
pub struct FakeStatusChannel {
    inner: Arc<Mutex<FakeChannelState>>,
    events: mpsc::Sender<Event>,
}

impl FakeStatusChannel {
    pub fn new(events: mpsc::Sender<Event>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeChannelState {
                calls: Vec::new(),
                subscriptions: Vec::new(),
                closed: false,
            })),
            events,
        }
    }

    pub fn calls(&self) -> Vec<ChannelCall> {
        self.inner.lock().calls.clone()
    }

    pub fn subscriptions(&self) -> Vec<WorkspaceId> {
        self.inner.lock().subscriptions.clone()
    }

    pub fn is_subscribed(&self, id: &str) -> bool {
        self.inner.lock().subscriptions.iter().any(|s| *s == id)
    }

    /// Make every later call fail with [`ChannelError::Closed`].
    pub fn close(&self) {
        self.inner.lock().closed = true;
    }

    /// Deliver a status notification. Returns whether it was delivered.
    pub fn push(&self, id: &str, status: &str) -> bool {
        self.deliver(Event::WorkspaceStatusPushed {
            id: WorkspaceId::new(id),
            status: status.to_string(),
            error: None,
        })
    }

    /// Deliver a status notification carrying an error message.
    pub fn push_error(&self, id: &str, status: &str, error: &str) -> bool {
        self.deliver(Event::WorkspaceStatusPushed {
            id: WorkspaceId::new(id),
            status: status.to_string(),
            error: Some(error.to_string()),
        })
    }

    pub fn push_log(&self, id: &str, line: &str) -> bool {
        self.deliver(Event::WorkspaceLog {
            id: WorkspaceId::new(id),
            line: line.to_string(),
        })
    }

    fn deliver(&self, event: Event) -> bool {
        let subscribed = match event.workspace_id() {
            Some(id) => self.is_subscribed(id.as_str()),
            None => false,
        };
        subscribed && self.events.try_send(event).is_ok()
    }
}

#[async_trait]
impl StatusChannel for FakeStatusChannel {
    async fn subscribe(&self, id: &WorkspaceId) -> Result<(), ChannelError> {
        let mut state = self.inner.lock();
        if state.closed {
            return Err(ChannelError::Closed);
        }
        state.calls.push(ChannelCall::Subscribe { id: id.clone() });
        if !state.subscriptions.contains(id) {
            state.subscriptions.push(id.clone());
        }
        Ok(())
    }

    async fn unsubscribe_all(&self) -> Result<(), ChannelError> {
        let mut state = self.inner.lock();
        if state.closed {
            return Err(ChannelError::Closed);
        }
        state.calls.push(ChannelCall::UnsubscribeAll);
        state.subscriptions.clear();
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;

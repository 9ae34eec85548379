// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-process alert bus.
//!
//! Keeps the list of visible alerts, tells listeners whenever it changes,
//! and removes each alert when its severity's time to live runs out.
//! Republishing a visible key replaces the alert and restarts its timer.

use super::{AlertAdapter, AlertError};
use async_trait::async_trait;
use dash_core::{AlertItem, AlertVariant, IdGen, UuidIdGen};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;

pub type ListenerId = u64;

type Listener = Arc<dyn Fn(&[AlertItem]) + Send + Sync>;

struct Expiry {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Default)]
struct BusState {
    alerts: Vec<AlertItem>,
    listeners: Vec<(ListenerId, Listener)>,
    expiries: HashMap<String, Expiry>,
    next_listener: ListenerId,
    next_generation: u64,
}

#[derive(Clone, Default)]
pub struct AlertBus {
    inner: Arc<Mutex<BusState>>,
}

impl AlertBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; it is called with the full alert list on every change.
    pub fn subscribe<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&[AlertItem]) + Send + Sync + 'static,
    {
        let mut state = self.inner.lock();
        state.next_listener += 1;
        let id = state.next_listener;
        state.listeners.push((id, Arc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: ListenerId) {
        self.inner.lock().listeners.retain(|(lid, _)| *lid != id);
    }

    /// Currently visible alerts, oldest first.
    pub fn alerts(&self) -> Vec<AlertItem> {
        self.inner.lock().alerts.clone()
    }

    /// Show an alert. Must be called within a tokio runtime.
    pub fn publish(&self, alert: AlertItem) {
        {
            let mut state = self.inner.lock();
            state.next_generation += 1;
            let generation = state.next_generation;
            let key = alert.key.clone();
            let ttl = alert.variant.ttl();

            match state.alerts.iter_mut().find(|a| a.key == key) {
                Some(existing) => *existing = alert,
                None => state.alerts.push(alert),
            }

            // Deadline counts from publish, not from the task's first poll
            let deadline = tokio::time::Instant::now() + ttl;
            let bus = self.clone();
            let expiry_key = key.clone();
            let handle = tokio::spawn(async move {
                tokio::time::sleep_until(deadline).await;
                bus.expire(&expiry_key, generation);
            });
            if let Some(old) = state.expiries.insert(key, Expiry { generation, handle }) {
                old.handle.abort();
            }
        }
        self.notify();
    }

    /// Remove an alert before it expires. Unknown keys are ignored.
    pub fn remove(&self, key: &str) {
        let removed = {
            let mut state = self.inner.lock();
            if let Some(expiry) = state.expiries.remove(key) {
                expiry.handle.abort();
            }
            let before = state.alerts.len();
            state.alerts.retain(|a| a.key != key);
            state.alerts.len() != before
        };
        if removed {
            self.notify();
        }
    }

    fn expire(&self, key: &str, generation: u64) {
        let removed = {
            let mut state = self.inner.lock();
            // A republish owns the key now
            let current = state.expiries.get(key).map(|e| e.generation);
            if current != Some(generation) {
                return;
            }
            state.expiries.remove(key);
            state.alerts.retain(|a| a.key != key);
            true
        };
        if removed {
            tracing::debug!(key, "alert expired");
            self.notify();
        }
    }

    fn notify(&self) {
        let (alerts, listeners) = {
            let state = self.inner.lock();
            let listeners: Vec<Listener> = state.listeners.iter().map(|(_, l)| l.clone()).collect();
            (state.alerts.clone(), listeners)
        };
        for listener in listeners {
            listener(&alerts);
        }
    }
}

/// Alert sink that publishes onto an [`AlertBus`] under fresh keys.
#[derive(Clone)]
pub struct BusAlertAdapter {
    bus: AlertBus,
    keys: UuidIdGen,
}

impl BusAlertAdapter {
    pub fn new(bus: AlertBus) -> Self {
        Self {
            bus,
            keys: UuidIdGen,
        }
    }

    pub fn bus(&self) -> &AlertBus {
        &self.bus
    }
}

#[async_trait]
impl AlertAdapter for BusAlertAdapter {
    async fn show_alert(&self, variant: AlertVariant, message: &str) -> Result<(), AlertError> {
        self.bus
            .publish(AlertItem::new(self.keys.next(), variant, message));
        Ok(())
    }
}

#[cfg(test)]
#[path = "bus_tests.rs"]
mod tests;

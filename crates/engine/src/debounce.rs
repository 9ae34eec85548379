// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cooldown guard against repeating an expensive action.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

type Listener = Arc<dyn Fn(bool) + Send + Sync>;

#[derive(Default)]
struct DebounceState {
    active: bool,
    generation: u64,
    timer: Option<JoinHandle<()>>,
    listeners: Vec<Listener>,
}

/// While a delay is set, callers are expected to refuse the guarded action.
/// Listeners hear `true` each time a delay is set and `false` once it lapses.
#[derive(Clone, Default)]
pub struct Debounce {
    inner: Arc<Mutex<DebounceState>>,
}

impl Debounce {
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(5);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_delay(&self) -> bool {
        self.inner.lock().active
    }

    /// Start (or restart) the cooldown window. Needs a tokio runtime.
    pub fn set_delay(&self, delay: Option<Duration>) {
        let delay = delay.unwrap_or(Self::DEFAULT_DELAY);
        let listeners = {
            let mut state = self.inner.lock();
            state.active = true;
            state.generation += 1;
            let generation = state.generation;
            if let Some(timer) = state.timer.take() {
                timer.abort();
            }
            let deadline = tokio::time::Instant::now() + delay;
            let guard = self.clone();
            state.timer = Some(tokio::spawn(async move {
                tokio::time::sleep_until(deadline).await;
                guard.lapse(generation);
            }));
            state.listeners.clone()
        };
        for listener in listeners {
            listener(true);
        }
    }

    fn lapse(&self, generation: u64) {
        let listeners = {
            let mut state = self.inner.lock();
            if state.generation != generation {
                return;
            }
            state.active = false;
            state.timer = None;
            state.listeners.clone()
        };
        for listener in listeners {
            listener(false);
        }
    }

    pub fn subscribe<F>(&self, listener: F)
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        self.inner.lock().listeners.push(Arc::new(listener));
    }

    pub fn unsubscribe_all(&self) {
        self.inner.lock().listeners.clear();
    }
}

#[cfg(test)]
#[path = "debounce_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pieces shared by the factory and IDE loaders.
//!
//! A loader owns one [`RunSlot`]. Each run gets a generation number when it
//! begins; every await point in a run is followed by a generation check, so
//! a run superseded by a newer target stops without touching anything.

use crate::error::LoaderError;
use crate::store::WorkspaceStore;
use dash_adapters::{AlertAdapter, StatusChannel, WorkspaceApi};
use dash_core::{AlertVariant, LifecycleRun, LoaderStep, RunContext, WorkspaceId, WorkspaceStatus};
use parking_lot::Mutex;
use std::time::Duration;
use tokio::sync::{broadcast, watch};

/// Tunables shared by both loaders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Pause before redirecting to the IDE route.
    pub settle_delay: Duration,
    /// Give up waiting for `RUNNING` after this long. `None` waits forever.
    pub start_timeout: Option<Duration>,
}

impl LoaderConfig {
    pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(500);
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            settle_delay: Self::DEFAULT_SETTLE_DELAY,
            start_timeout: None,
        }
    }
}

/// Collaborators every loader reports through.
pub struct LoaderDeps<W, C, N, A> {
    pub store: WorkspaceStore<W, C>,
    pub navigator: N,
    pub alerts: A,
}

impl<W: Clone, C: Clone, N: Clone, A: Clone> Clone for LoaderDeps<W, C, N, A> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            navigator: self.navigator.clone(),
            alerts: self.alerts.clone(),
        }
    }
}

impl<W, C, N, A> LoaderDeps<W, C, N, A>
where
    A: AlertAdapter,
{
    /// Report a run failure to the alert sink.
    pub(crate) async fn report(&self, err: &LoaderError) {
        let message = err.to_string();
        tracing::error!(error = %message, "loader run failed");
        if let Err(e) = self.alerts.show_alert(AlertVariant::Danger, &message).await {
            tracing::warn!(error = %e, "alert not shown");
        }
    }
}

/// How a call to `run` ended.
#[derive(Debug)]
pub enum RunOutcome {
    /// The run reached its terminal step.
    Completed,
    /// The run parked with an error (already reported to the alert sink).
    Failed(LoaderError),
    /// Same target as the current run; nothing was done.
    Unchanged,
    /// A newer target took over while this run was in flight.
    Superseded,
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }
}

/// Why a run stopped early.
pub(crate) enum Halt {
    Superseded,
    Failed(LoaderError),
}

impl From<LoaderError> for Halt {
    fn from(err: LoaderError) -> Self {
        Halt::Failed(err)
    }
}

struct SlotState<S: LoaderStep> {
    generation: u64,
    run: Option<LifecycleRun<S>>,
}

/// The current run of one loader, plus its observers.
pub(crate) struct RunSlot<S: LoaderStep> {
    state: Mutex<SlotState<S>>,
    view: watch::Sender<Option<LifecycleRun<S>>>,
    generations: watch::Sender<u64>,
}

impl<S: LoaderStep> RunSlot<S> {
    pub(crate) fn new() -> Self {
        Self {
            state: Mutex::new(SlotState {
                generation: 0,
                run: None,
            }),
            view: watch::Sender::new(None),
            generations: watch::Sender::new(0),
        }
    }

    /// Start a fresh run for `target`, unless it is already the current one.
    pub(crate) fn begin(&self, target: &str) -> Option<u64> {
        let (generation, run) = {
            let mut state = self.state.lock();
            if state.run.as_ref().is_some_and(|run| run.target() == target) {
                return None;
            }
            state.generation += 1;
            state.run = Some(LifecycleRun::new(target));
            (state.generation, state.run.clone())
        };
        self.view.send_replace(run);
        self.generations.send_replace(generation);
        Some(generation)
    }

    pub(crate) fn is_current(&self, generation: u64) -> bool {
        self.state.lock().generation == generation
    }

    pub(crate) fn check(&self, generation: u64) -> Result<(), Halt> {
        if self.is_current(generation) {
            Ok(())
        } else {
            Err(Halt::Superseded)
        }
    }

    /// Mutate the run if `generation` is still current, then publish it.
    pub(crate) fn update<T>(
        &self,
        generation: u64,
        f: impl FnOnce(&mut LifecycleRun<S>) -> T,
    ) -> Option<T> {
        let (result, snapshot) = {
            let mut state = self.state.lock();
            if state.generation != generation {
                return None;
            }
            let run = state.run.as_mut()?;
            let result = f(run);
            (result, run.clone())
        };
        self.view.send_replace(Some(snapshot));
        Some(result)
    }

    pub(crate) fn advance(&self, generation: u64, to: S) -> Result<(), Halt> {
        match self.update(generation, |run| run.advance(to)) {
            Some(Ok(())) => {
                tracing::info!(step = to.label(), "loader step");
                Ok(())
            }
            Some(Err(e)) => {
                tracing::warn!(error = %e, "step refused");
                Err(Halt::Superseded)
            }
            None => Err(Halt::Superseded),
        }
    }

    pub(crate) fn with_context(
        &self,
        generation: u64,
        f: impl FnOnce(&mut RunContext),
    ) -> Result<(), Halt> {
        match self.update(generation, |run| run.context_mut().map(f)) {
            Some(Ok(())) => Ok(()),
            _ => Err(Halt::Superseded),
        }
    }

    pub(crate) fn complete(&self, generation: u64) -> Result<(), Halt> {
        match self.update(generation, |run| run.complete()) {
            Some(Ok(())) => Ok(()),
            _ => Err(Halt::Superseded),
        }
    }

    /// Park the run with `err`. Returns whether this run took the error.
    pub(crate) fn fail(&self, generation: u64, err: &LoaderError) -> bool {
        self.update(generation, |run| run.fail(err.to_string()))
            .unwrap_or(false)
    }

    pub(crate) fn snapshot(&self) -> Option<LifecycleRun<S>> {
        self.state.lock().run.clone()
    }

    pub(crate) fn watch(&self) -> watch::Receiver<Option<LifecycleRun<S>>> {
        self.view.subscribe()
    }

    pub(crate) fn generations(&self) -> watch::Receiver<u64> {
        self.generations.subscribe()
    }
}

/// How waiting for `RUNNING` ended badly.
pub(crate) enum WaitError {
    Superseded,
    /// The workspace reported `ERROR`.
    Errored,
    /// The workspace left the cache.
    Vanished,
    TimedOut(Duration),
}

/// Suspend until the cached workspace reports `RUNNING`.
///
/// Reacts to the store's update cycle and to newer runs; never polls.
pub(crate) async fn wait_running<S, W, C>(
    slot: &RunSlot<S>,
    generation: u64,
    store: &WorkspaceStore<W, C>,
    id: &WorkspaceId,
    timeout: Option<Duration>,
) -> Result<(), WaitError>
where
    S: LoaderStep,
    W: WorkspaceApi,
    C: StatusChannel,
{
    // Subscribe before the first look so no update slips between them
    let mut changes = store.changes();
    let mut generations = slot.generations();
    let deadline = timeout.map(|t| (tokio::time::Instant::now() + t, t));

    loop {
        if !slot.is_current(generation) {
            return Err(WaitError::Superseded);
        }
        match store.find_by_id(id.as_str()).map(|ws| ws.status) {
            Some(WorkspaceStatus::Running) => return Ok(()),
            Some(WorkspaceStatus::Error) => return Err(WaitError::Errored),
            Some(_) => {}
            None => return Err(WaitError::Vanished),
        }

        let sleep = async {
            match deadline {
                Some((at, _)) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            received = changes.recv() => match received {
                Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                Err(broadcast::error::RecvError::Closed) => return Err(WaitError::Vanished),
            },
            changed = generations.changed() => {
                if changed.is_err() {
                    return Err(WaitError::Superseded);
                }
            }
            _ = sleep => {
                if let Some((_, t)) = deadline {
                    return Err(WaitError::TimedOut(t));
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Factory loader: repository URL to running workspace.

use crate::error::{LoaderError, ResolutionError};
use crate::loader::{
    wait_running, Halt, LoaderConfig, LoaderDeps, RunOutcome, RunSlot, WaitError,
};
use crate::resolver::DevfileResolver;
use dash_adapters::{AlertAdapter, DevfileAdapter, Navigator, StatusChannel, WorkspaceApi};
use dash_core::{ide_path, FactoryParams, FactoryStep, LifecycleRun};
use std::sync::Arc;
use tokio::sync::watch;

struct Inner<W, C, D, N, A> {
    deps: LoaderDeps<W, C, N, A>,
    resolver: DevfileResolver<D>,
    config: LoaderConfig,
    slot: RunSlot<FactoryStep>,
}

/// Drives `INITIALIZING → APPLYING_DEVFILE → CREATE_WORKSPACE →
/// START_WORKSPACE → OPEN_IDE` for one search string at a time.
pub struct FactoryLoader<W, C, D, N, A> {
    inner: Arc<Inner<W, C, D, N, A>>,
}

impl<W, C, D, N, A> Clone for FactoryLoader<W, C, D, N, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W, C, D, N, A> FactoryLoader<W, C, D, N, A>
where
    W: WorkspaceApi,
    C: StatusChannel,
    D: DevfileAdapter,
    N: Navigator,
    A: AlertAdapter,
{
    pub fn new(
        deps: LoaderDeps<W, C, N, A>,
        resolver: DevfileResolver<D>,
        config: LoaderConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                deps,
                resolver,
                config,
                slot: RunSlot::new(),
            }),
        }
    }

    /// Current run, if any.
    pub fn view(&self) -> Option<LifecycleRun<FactoryStep>> {
        self.inner.slot.snapshot()
    }

    /// Every change to the current run.
    pub fn watch(&self) -> watch::Receiver<Option<LifecycleRun<FactoryStep>>> {
        self.inner.slot.watch()
    }

    /// Evaluate the navigation target `search` (the query string).
    ///
    /// An unchanged target is a no-op. A new target starts over from
    /// `INITIALIZING`, and any run still in flight stops at its next await.
    pub async fn run(&self, search: &str) -> RunOutcome {
        let slot = &self.inner.slot;
        let Some(generation) = slot.begin(search) else {
            tracing::debug!(search, "factory target unchanged");
            return RunOutcome::Unchanged;
        };
        tracing::info!(search, generation, "factory run");

        match self.execute(generation, search).await {
            Ok(()) => RunOutcome::Completed,
            Err(Halt::Superseded) => {
                tracing::info!(search, generation, "factory run superseded");
                RunOutcome::Superseded
            }
            Err(Halt::Failed(err)) => {
                if !slot.fail(generation, &err) {
                    return RunOutcome::Superseded;
                }
                self.inner.deps.report(&err).await;
                RunOutcome::Failed(err)
            }
        }
    }

    async fn execute(&self, generation: u64, search: &str) -> Result<(), Halt> {
        let Inner {
            deps,
            resolver,
            config,
            slot,
        } = &*self.inner;

        let params = FactoryParams::parse(search).map_err(LoaderError::from)?;

        slot.advance(generation, FactoryStep::ApplyingDevfile)?;
        let resolved = resolver.resolve(&params.location).await;
        slot.check(generation)?;
        let resolution = resolved.map_err(LoaderError::Resolution)?;
        let devfile = resolution.devfile.clone().ok_or_else(|| {
            LoaderError::Resolution(ResolutionError::NoDevfile {
                location: params.location.clone(),
            })
        })?;
        slot.with_context(generation, |ctx| {
            ctx.devfile_location_info = resolution.location_info();
        })?;

        slot.advance(generation, FactoryStep::CreateWorkspace)?;
        let created = deps
            .store
            .create(devfile, None, None, params.attributes.clone())
            .await;
        slot.check(generation)?;
        let workspace = created.map_err(LoaderError::Create)?;
        let name = workspace.name().to_string();
        slot.with_context(generation, |ctx| {
            ctx.workspace_id = Some(workspace.id.clone());
            ctx.workspace_name = name.clone();
        })?;

        slot.advance(generation, FactoryStep::StartWorkspace)?;
        let started = deps.store.start(&workspace.id).await;
        slot.check(generation)?;
        let failed_to_start = || LoaderError::Start {
            message: format!("Workspace {name} failed to start."),
        };
        if let Err(e) = started {
            tracing::warn!(error = %e, "start request failed");
            return Err(failed_to_start().into());
        }

        match wait_running(slot, generation, &deps.store, &workspace.id, config.start_timeout).await
        {
            Ok(()) => {}
            Err(WaitError::Superseded) => return Err(Halt::Superseded),
            Err(WaitError::Errored) | Err(WaitError::Vanished) => {
                return Err(failed_to_start().into())
            }
            Err(WaitError::TimedOut(timeout)) => {
                return Err(LoaderError::Timeout { name, timeout }.into())
            }
        }

        slot.advance(generation, FactoryStep::OpenIde)?;
        tokio::time::sleep(config.settle_delay).await;
        slot.check(generation)?;
        deps.navigator
            .redirect(&ide_path(&workspace.namespace, &name))
            .await;
        slot.complete(generation)
    }
}

#[cfg(test)]
#[path = "factory_loader_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IDE loader: open an existing workspace by namespace and name.

use crate::error::LoaderError;
use crate::loader::{
    wait_running, Halt, LoaderConfig, LoaderDeps, RunOutcome, RunSlot, WaitError,
};
use dash_adapters::{AlertAdapter, IdeLaunch, Navigator, StatusChannel, WorkspaceApi};
use dash_core::{ide_path, normalize_workspace_name, IdeStep, LifecycleRun, WorkspaceStatus};
use std::sync::Arc;
use tokio::sync::watch;

struct Inner<W, C, N, A> {
    deps: LoaderDeps<W, C, N, A>,
    config: LoaderConfig,
    token: Option<String>,
    slot: RunSlot<IdeStep>,
}

/// Drives `INITIALIZING → START_WORKSPACE → OPEN_IDE` for one
/// `(namespace, name)` route at a time.
pub struct IdeLoader<W, C, N, A> {
    inner: Arc<Inner<W, C, N, A>>,
}

impl<W, C, N, A> Clone for IdeLoader<W, C, N, A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W, C, N, A> IdeLoader<W, C, N, A>
where
    W: WorkspaceApi,
    C: StatusChannel,
    N: Navigator,
    A: AlertAdapter,
{
    /// `token` is handed to the IDE along with its URL.
    pub fn new(deps: LoaderDeps<W, C, N, A>, config: LoaderConfig, token: Option<String>) -> Self {
        Self {
            inner: Arc::new(Inner {
                deps,
                config,
                token,
                slot: RunSlot::new(),
            }),
        }
    }

    pub fn view(&self) -> Option<LifecycleRun<IdeStep>> {
        self.inner.slot.snapshot()
    }

    pub fn watch(&self) -> watch::Receiver<Option<LifecycleRun<IdeStep>>> {
        self.inner.slot.watch()
    }

    /// Evaluate the route `/ide/{namespace}/{name}`.
    pub async fn run(&self, namespace: &str, name: &str) -> RunOutcome {
        let normalized = normalize_workspace_name(name);
        if normalized != name {
            self.inner
                .deps
                .navigator
                .replace(&ide_path(namespace, normalized))
                .await;
        }

        let target = format!("{namespace}/{normalized}");
        let slot = &self.inner.slot;
        let Some(generation) = slot.begin(&target) else {
            tracing::debug!(target, "ide target unchanged");
            return RunOutcome::Unchanged;
        };
        tracing::info!(target, generation, "ide run");

        match self.execute(generation, namespace, normalized).await {
            Ok(()) => RunOutcome::Completed,
            Err(Halt::Superseded) => {
                tracing::info!(target, generation, "ide run superseded");
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

    async fn execute(&self, generation: u64, namespace: &str, name: &str) -> Result<(), Halt> {
        let Inner {
            deps,
            config,
            token,
            slot,
        } = &*self.inner;
        let store = &deps.store;

        if store.workspaces().is_empty() {
            let listed = store.list().await;
            slot.check(generation)?;
            if let Err(e) = listed {
                tracing::warn!(error = %e, "workspace list failed");
                return Err(LoaderError::Fetch {
                    message: "Failed to fetch workspaces.".to_string(),
                }
                .into());
            }
        }

        let workspace = store
            .find_by_qualified_name(namespace, name)
            .ok_or(LoaderError::NotFound)?;
        slot.with_context(generation, |ctx| {
            ctx.workspace_id = Some(workspace.id.clone());
            ctx.workspace_name = name.to_string();
        })?;

        let ready = workspace.status == WorkspaceStatus::Running && workspace.runtime.is_some();
        if !ready {
            slot.advance(generation, IdeStep::StartWorkspace)?;
            if workspace.status.needs_start() {
                let started = store.start(&workspace.id).await;
                slot.check(generation)?;
                if let Err(e) = started {
                    return Err(LoaderError::Start {
                        message: format!("Workspace {name} failed to start. {}", e.cause()),
                    }
                    .into());
                }
            }

            match wait_running(slot, generation, store, &workspace.id, config.start_timeout).await {
                Ok(()) => {}
                Err(WaitError::Superseded) => return Err(Halt::Superseded),
                Err(WaitError::Errored) => {
                    return Err(LoaderError::Start {
                        message: "An unknown workspace error.".to_string(),
                    }
                    .into())
                }
                Err(WaitError::Vanished) => return Err(LoaderError::NotFound.into()),
                Err(WaitError::TimedOut(timeout)) => {
                    return Err(LoaderError::Timeout {
                        name: name.to_string(),
                        timeout,
                    }
                    .into())
                }
            }
        }

        slot.advance(generation, IdeStep::OpenIde)?;
        let refreshed = store.refresh(&workspace.id).await;
        slot.check(generation)?;
        let workspace = refreshed.map_err(|e| LoaderError::Fetch {
            message: format!("Getting workspace detail data failed. {}", e.cause()),
        })?;
        let url = workspace
            .ide_url()
            .map(str::to_string)
            .ok_or(LoaderError::IdeEndpointNotFound)?;
        slot.with_context(generation, |ctx| ctx.ide_url = Some(url.clone()))?;

        deps.navigator
            .open_ide(IdeLaunch {
                url,
                token: token.clone(),
            })
            .await;
        slot.complete(generation)
    }
}

#[cfg(test)]
#[path = "ide_loader_tests.rs"]
mod tests;

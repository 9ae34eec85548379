// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wiring of one dashboard session.
//!
//! Owns the shared state, the components built on it, and the task that
//! applies pushed events in delivery order.

use crate::debounce::Debounce;
use crate::factory_loader::FactoryLoader;
use crate::ide_loader::IdeLoader;
use crate::loader::{LoaderConfig, LoaderDeps};
use crate::resolver::DevfileResolver;
use crate::sample::SampleLauncher;
use crate::store::WorkspaceStore;
use dash_adapters::{AlertAdapter, DevfileAdapter, Navigator, StatusChannel, WorkspaceApi};
use dash_core::Event;
use dash_storage::MaterializedState;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Adapter dependencies of a session
pub struct DashboardDeps<W, C, D, N, A> {
    pub api: W,
    pub channel: C,
    pub devfiles: D,
    pub navigator: N,
    pub alerts: A,
    /// Session token handed to the IDE.
    pub token: Option<String>,
}

pub struct Dashboard<W, C, D, N, A> {
    store: WorkspaceStore<W, C>,
    resolver: DevfileResolver<D>,
    factory: FactoryLoader<W, C, D, N, A>,
    ide: IdeLoader<W, C, N, A>,
    samples: SampleLauncher<W, C, D, N, A>,
    pump: JoinHandle<()>,
}

impl<W, C, D, N, A> Dashboard<W, C, D, N, A>
where
    W: WorkspaceApi,
    C: StatusChannel,
    D: DevfileAdapter,
    N: Navigator,
    A: AlertAdapter,
{
    /// Build a session. `events` is the receiving end of the sender the push
    /// channel was built with. Must be called within a tokio runtime.
    pub fn new(
        deps: DashboardDeps<W, C, D, N, A>,
        config: LoaderConfig,
        mut events: mpsc::Receiver<Event>,
    ) -> Self {
        let state = Arc::new(Mutex::new(MaterializedState::default()));
        let store = WorkspaceStore::new(deps.api, deps.channel, Arc::clone(&state));
        let resolver = DevfileResolver::new(deps.devfiles, state);
        let loader_deps = LoaderDeps {
            store: store.clone(),
            navigator: deps.navigator.clone(),
            alerts: deps.alerts.clone(),
        };
        let factory = FactoryLoader::new(loader_deps.clone(), resolver.clone(), config.clone());
        let ide = IdeLoader::new(loader_deps, config, deps.token);
        let samples = SampleLauncher::new(
            store.clone(),
            resolver.clone(),
            deps.navigator,
            deps.alerts,
            Debounce::new(),
        );

        let sink = store.clone();
        let pump = tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                tracing::trace!(event = event.name(), "push");
                sink.handle_event(event);
            }
        });

        Self {
            store,
            resolver,
            factory,
            ide,
            samples,
            pump,
        }
    }

    pub fn store(&self) -> &WorkspaceStore<W, C> {
        &self.store
    }

    pub fn resolver(&self) -> &DevfileResolver<D> {
        &self.resolver
    }

    pub fn factory(&self) -> &FactoryLoader<W, C, D, N, A> {
        &self.factory
    }

    pub fn ide(&self) -> &IdeLoader<W, C, N, A> {
        &self.ide
    }

    pub fn samples(&self) -> &SampleLauncher<W, C, D, N, A> {
        &self.samples
    }

    /// End the session, releasing every push subscription.
    pub async fn shutdown(self) {
        self.store.unsubscribe_all().await;
        self.pump.abort();
    }
}

#[cfg(test)]
#[path = "dashboard_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Create-and-start from a registry sample.

use crate::debounce::Debounce;
use crate::error::LaunchError;
use crate::resolver::DevfileResolver;
use crate::store::WorkspaceStore;
use dash_adapters::{AlertAdapter, DevfileAdapter, Navigator, StatusChannel, WorkspaceApi};
use dash_core::{
    ide_path, AlertVariant, Devfile, RegistryEntry, Workspace, STACK_NAME_ATTRIBUTE,
};
use indexmap::IndexMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct SampleLauncher<W, C, D, N, A> {
    store: WorkspaceStore<W, C>,
    resolver: DevfileResolver<D>,
    navigator: N,
    alerts: A,
    debounce: Debounce,
    in_flight: Arc<AtomicBool>,
}

impl<W, C, D, N, A> Clone for SampleLauncher<W, C, D, N, A>
where
    W: Clone,
    C: Clone,
    D: Clone,
    N: Clone,
    A: Clone,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            resolver: self.resolver.clone(),
            navigator: self.navigator.clone(),
            alerts: self.alerts.clone(),
            debounce: self.debounce.clone(),
            in_flight: Arc::clone(&self.in_flight),
        }
    }
}

impl<W, C, D, N, A> SampleLauncher<W, C, D, N, A>
where
    W: WorkspaceApi,
    C: StatusChannel,
    D: DevfileAdapter,
    N: Navigator,
    A: AlertAdapter,
{
    pub fn new(
        store: WorkspaceStore<W, C>,
        resolver: DevfileResolver<D>,
        navigator: N,
        alerts: A,
        debounce: Debounce,
    ) -> Self {
        Self {
            store,
            resolver,
            navigator,
            alerts,
            debounce,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn debounce(&self) -> &Debounce {
        &self.debounce
    }

    /// Create a workspace from `entry`, start it and open its IDE route.
    ///
    /// Refused with [`LaunchError::Busy`] during the cooldown or while
    /// another launch runs. Every attempt that gets going ends by arming the
    /// cooldown.
    pub async fn launch(&self, entry: &RegistryEntry) -> Result<Workspace, LaunchError> {
        if self.debounce.has_delay() || self.in_flight.swap(true, Ordering::SeqCst) {
            tracing::debug!(sample = %entry.display_name, "launch ignored");
            return Err(LaunchError::Busy);
        }
        let result = self.launch_inner(entry).await;
        self.in_flight.store(false, Ordering::SeqCst);
        self.debounce.set_delay(None);
        result
    }

    async fn launch_inner(&self, entry: &RegistryEntry) -> Result<Workspace, LaunchError> {
        let content = self
            .resolver
            .request_devfile(&entry.links.self_link)
            .await
            .map_err(LaunchError::Fetch)?;
        let devfile = Devfile::parse(&content)?;

        let mut attributes = IndexMap::new();
        attributes.insert(STACK_NAME_ATTRIBUTE.to_string(), entry.display_name.clone());
        let workspace = self
            .store
            .create(devfile, None, None, attributes)
            .await
            .map_err(LaunchError::Create)?;
        let name = workspace.name().to_string();
        self.alert(
            AlertVariant::Success,
            &format!("Workspace {name} has been created"),
        )
        .await;

        if let Err(e) = self.store.start(&workspace.id).await {
            let message = match e.cause() {
                "" => format!("Workspace {name} failed to start."),
                cause => cause.to_string(),
            };
            self.alert(AlertVariant::Danger, &message).await;
            return Err(LaunchError::Start(e));
        }

        self.navigator
            .redirect(&ide_path(&workspace.namespace, &name))
            .await;
        Ok(workspace)
    }

    async fn alert(&self, variant: AlertVariant, message: &str) {
        if let Err(e) = self.alerts.show_alert(variant, message).await {
            tracing::warn!(error = %e, "alert not shown");
        }
    }
}

#[cfg(test)]
#[path = "sample_tests.rs"]
mod tests;

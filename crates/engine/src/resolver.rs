// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Devfile resolution and registry metadata

use crate::error::ResolutionError;
use dash_adapters::DevfileAdapter;
use dash_core::{DevfileResolution, Event, RegistryEntry};
use dash_storage::MaterializedState;
use futures_util::future::try_join_all;
use parking_lot::Mutex;
use std::sync::Arc;

/// Most recent `resolve` request.
#[derive(Default)]
struct LatestRequest {
    seq: u64,
    location: String,
}

#[derive(Clone)]
pub struct DevfileResolver<D> {
    adapter: D,
    state: Arc<Mutex<MaterializedState>>,
    latest: Arc<Mutex<LatestRequest>>,
}

impl<D: DevfileAdapter> DevfileResolver<D> {
    pub fn new(adapter: D, state: Arc<Mutex<MaterializedState>>) -> Self {
        Self {
            adapter,
            state,
            latest: Arc::default(),
        }
    }

    /// Ask the server for the devfile behind `location`.
    ///
    /// The result is stored as the current resolution and read back; a
    /// read-back that lacks a devfile or belongs to another location fails.
    /// A response overtaken by a newer request is dropped without touching
    /// the stored resolution. No retries.
    pub async fn resolve(&self, location: &str) -> Result<DevfileResolution, ResolutionError> {
        let seq = {
            let mut latest = self.latest.lock();
            latest.seq += 1;
            latest.location = location.to_string();
            latest.seq
        };
        let response = self.adapter.resolve_factory(location).await?;
        let resolution = DevfileResolution {
            location: location.to_string(),
            source: response.source,
            devfile: response.devfile,
        };
        let current = {
            let latest = self.latest.lock();
            if latest.seq != seq {
                tracing::debug!(location, newer = %latest.location, "dropping stale resolution");
                return Err(ResolutionError::LocationMismatch {
                    expected: location.to_string(),
                    actual: latest.location.clone(),
                });
            }
            let mut state = self.state.lock();
            state.apply_event(&Event::FactoryResolved { resolution });
            state.factory_resolver.clone()
        };
        match current {
            Some(current) if current.location != location => {
                Err(ResolutionError::LocationMismatch {
                    expected: location.to_string(),
                    actual: current.location,
                })
            }
            Some(current) if current.devfile.is_some() => Ok(current),
            _ => Err(ResolutionError::NoDevfile {
                location: location.to_string(),
            }),
        }
    }

    /// Raw devfile text at `url`, cached per location.
    pub async fn request_devfile(&self, url: &str) -> Result<String, ResolutionError> {
        {
            let mut state = self.state.lock();
            if let Some(content) = state.devfiles.get(url).and_then(|e| e.content.clone()) {
                return Ok(content);
            }
            state.apply_event(&Event::DevfileRequested {
                location: url.to_string(),
            });
        }
        match self.adapter.fetch_devfile(url).await {
            Ok(content) => {
                self.state.lock().apply_event(&Event::DevfileReceived {
                    location: url.to_string(),
                    content: content.clone(),
                });
                Ok(content)
            }
            Err(e) => {
                self.state.lock().apply_event(&Event::DevfileFailed {
                    location: url.to_string(),
                    error: e.to_string(),
                });
                Err(e.into())
            }
        }
    }

    /// Fetch every registry in the whitespace-separated `urls`.
    ///
    /// Entries keep registry order. One failing registry fails the whole
    /// request and leaves the stored metadata untouched.
    pub async fn request_registries_metadata(
        &self,
        urls: &str,
    ) -> Result<Vec<RegistryEntry>, ResolutionError> {
        let fetches = urls
            .split_whitespace()
            .map(|registry| self.adapter.fetch_registry_index(registry));
        let entries: Vec<RegistryEntry> = try_join_all(fetches).await?.into_iter().flatten().collect();
        self.state.lock().apply_event(&Event::RegistryReceived {
            entries: entries.clone(),
        });
        Ok(entries)
    }

    pub fn registry(&self) -> Vec<RegistryEntry> {
        self.state.lock().registry.clone()
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Workspace lifecycle engine

mod dashboard;
mod debounce;
mod error;
mod factory_loader;
mod ide_loader;
mod loader;
mod resolver;
mod sample;
mod store;

#[cfg(test)]
mod test_helpers;

pub use dashboard::{Dashboard, DashboardDeps};
pub use debounce::Debounce;
pub use error::{LaunchError, LoaderError, ResolutionError, StoreError};
pub use factory_loader::FactoryLoader;
pub use ide_loader::IdeLoader;
pub use loader::{LoaderConfig, LoaderDeps, RunOutcome};
pub use resolver::DevfileResolver;
pub use sample::SampleLauncher;
pub use store::WorkspaceStore;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! dash-core: domain types for the workspace dashboard

pub mod alert;
pub mod devfile;
pub mod event;
pub mod factory;
pub mod id;
pub mod route;
pub mod run;
pub mod step;
pub mod workspace;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use alert::{AlertItem, AlertVariant};
pub use devfile::{
    registry_base, Devfile, DevfileMetadata, DevfileParseError, DevfileResolution, RegistryEntry,
    RegistryLinks,
};
pub use event::Event;
pub use factory::{FactoryParams, FactoryParamsError, FORWARDED_ATTRIBUTES, STACK_NAME_ATTRIBUTE};
pub use id::{IdGen, SequentialIdGen, UuidIdGen};
pub use route::{ide_path, normalize_workspace_name};
pub use run::{LifecycleRun, RunContext, RunError};
pub use step::{FactoryStep, IdeStep, LoaderStep, StepGlyph};
pub use workspace::{
    Machine, Server, Workspace, WorkspaceId, WorkspaceRuntime, WorkspaceSettings, WorkspaceStatus,
};

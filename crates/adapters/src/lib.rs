// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for external I/O

pub mod devfile;
pub mod endpoint;
mod env;
pub mod http;
pub mod navigate;
pub mod notify;
pub mod status;
pub mod traced;
pub mod workspace;

pub use devfile::{DevfileAdapter, DevfileError, FactoryResolverResponse, HttpDevfileAdapter};
pub use endpoint::Endpoint;
pub use http::{ApiError, RestClient};
pub use navigate::{IdeLaunch, LogNavigator, Navigator};
pub use notify::{AlertAdapter, AlertBus, AlertError, BusAlertAdapter, ListenerId, NoOpAlertAdapter};
pub use status::{
    ChannelError, JsonRpcStatusChannel, NoOpStatusChannel, ReconnectPolicy,
    ReconnectPolicyParseError, StatusChannel,
};
pub use traced::{TracedDevfileAdapter, TracedWorkspaceApi};
pub use workspace::{CreateRequest, HttpWorkspaceApi, WorkspaceApi};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use devfile::{DevfileCall, FakeDevfileAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use navigate::{FakeNavigator, NavigateCall};
#[cfg(any(test, feature = "test-support"))]
pub use notify::{AlertCall, FakeAlertAdapter};
#[cfg(any(test, feature = "test-support"))]
pub use status::{ChannelCall, FakeStatusChannel};
#[cfg(any(test, feature = "test-support"))]
pub use workspace::{FakeWorkspaceApi, WorkspaceCall, WorkspaceOp};

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake-backed dashboards for command tests.

use dash_adapters::{
    FakeAlertAdapter, FakeDevfileAdapter, FakeNavigator, FakeStatusChannel, FakeWorkspaceApi,
};
use dash_core::{RegistryEntry, RegistryLinks};
use dash_engine::{Dashboard, DashboardDeps, LoaderConfig};
use std::time::Duration;
use tokio::sync::mpsc;

pub(crate) type TestDashboard = Dashboard<
    FakeWorkspaceApi,
    FakeStatusChannel,
    FakeDevfileAdapter,
    FakeNavigator,
    FakeAlertAdapter,
>;

pub(crate) struct TestContext {
    pub dashboard: TestDashboard,
    pub api: FakeWorkspaceApi,
    pub channel: FakeStatusChannel,
    pub devfiles: FakeDevfileAdapter,
    pub alerts: FakeAlertAdapter,
}

pub(crate) fn setup() -> TestContext {
    let (event_tx, event_rx) = mpsc::channel(64);
    let api = FakeWorkspaceApi::new();
    let channel = FakeStatusChannel::new(event_tx);
    let devfiles = FakeDevfileAdapter::new();
    let alerts = FakeAlertAdapter::new();
    let dashboard = Dashboard::new(
        DashboardDeps {
            api: api.clone(),
            channel: channel.clone(),
            devfiles: devfiles.clone(),
            navigator: FakeNavigator::new(),
            alerts: alerts.clone(),
            token: None,
        },
        LoaderConfig {
            settle_delay: Duration::ZERO,
            start_timeout: None,
        },
        event_rx,
    );
    TestContext {
        dashboard,
        api,
        channel,
        devfiles,
        alerts,
    }
}

/// Registry entry whose devfile lives under `devfiles/{name}/`.
pub(crate) fn entry(name: &str, memory: &str, tags: &[&str]) -> RegistryEntry {
    RegistryEntry {
        display_name: name.to_string(),
        global_memory_limit: memory.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        links: RegistryLinks {
            self_link: format!(
                "https://registry.example.com/devfiles/{}/devfile.yaml",
                name.to_lowercase()
            ),
        },
        ..RegistryEntry::default()
    }
}

/// Exit code carried by a command error, if any.
pub(crate) fn exit_code(err: &anyhow::Error) -> Option<i32> {
    err.downcast_ref::<crate::exit_error::ExitError>()
        .map(|e| e.code)
}

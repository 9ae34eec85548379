// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for the engine crate.

use crate::{Dashboard, DashboardDeps, LoaderConfig};
use dash_adapters::{
    FakeAlertAdapter, FakeDevfileAdapter, FakeNavigator, FakeStatusChannel, FakeWorkspaceApi,
};
use dash_core::{Devfile, LifecycleRun, LoaderStep};
use std::time::Duration;
use tokio::sync::{mpsc, watch};

/// Convenience alias for the fully-faked session.
pub(crate) type TestDashboard = Dashboard<
    FakeWorkspaceApi,
    FakeStatusChannel,
    FakeDevfileAdapter,
    FakeNavigator,
    FakeAlertAdapter,
>;

pub(crate) const REPO: &str = "https://example.com/repo";
pub(crate) const TOKEN: &str = "session-token";

/// Test context holding the session and handles to every fake.
pub(crate) struct TestContext {
    pub dashboard: TestDashboard,
    pub api: FakeWorkspaceApi,
    pub channel: FakeStatusChannel,
    pub devfiles: FakeDevfileAdapter,
    pub navigator: FakeNavigator,
    pub alerts: FakeAlertAdapter,
}

pub(crate) fn setup() -> TestContext {
    setup_with(LoaderConfig::default())
}

pub(crate) fn setup_with(config: LoaderConfig) -> TestContext {
    let (event_tx, event_rx) = mpsc::channel(64);
    let api = FakeWorkspaceApi::new();
    let channel = FakeStatusChannel::new(event_tx);
    let devfiles = FakeDevfileAdapter::new();
    let navigator = FakeNavigator::new();
    let alerts = FakeAlertAdapter::new();
    let dashboard = Dashboard::new(
        DashboardDeps {
            api: api.clone(),
            channel: channel.clone(),
            devfiles: devfiles.clone(),
            navigator: navigator.clone(),
            alerts: alerts.clone(),
            token: Some(TOKEN.to_string()),
        },
        config,
        event_rx,
    );
    TestContext {
        dashboard,
        api,
        channel,
        devfiles,
        navigator,
        alerts,
    }
}

/// Factory search string for `location`.
pub(crate) fn search(location: &str) -> String {
    format!("?url={location}")
}

/// Make `location` resolve to a devfile named `name` from a repository.
pub(crate) fn serve_repo(ctx: &TestContext, location: &str, name: &str) {
    ctx.devfiles
        .set_factory(location, "repo", Some(Devfile::named(name)));
}

/// Wait until the run observed through `rx` reaches `step` or fails.
pub(crate) async fn wait_for_step<S: LoaderStep>(
    mut rx: watch::Receiver<Option<LifecycleRun<S>>>,
    step: S,
) {
    let reached = tokio::time::timeout(
        Duration::from_secs(600),
        rx.wait_for(|run| {
            run.as_ref()
                .is_some_and(|run| run.reached(step) || run.has_error())
        }),
    )
    .await;
    assert!(
        matches!(reached, Ok(Ok(_))),
        "run never reached {:?}",
        step
    );
}

/// Let spawned tasks drain their queues.
pub(crate) async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::devfile::FakeDevfileAdapter;
use crate::workspace::{FakeWorkspaceApi, WorkspaceOp};
use dash_core::test_support::workspace;
use dash_core::{Devfile, WorkspaceStatus};
use serial_test::{parallel, serial};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// A writer that captures log output for testing
#[derive(Clone, Default)]
struct CapturedLogs {
    logs: Arc<Mutex<Vec<u8>>>,
}

impl CapturedLogs {
    fn new() -> Self {
        Self::default()
    }

    fn contents(&self) -> String {
        let logs = self.logs.lock().unwrap();
        String::from_utf8_lossy(&logs).to_string()
    }
}

impl std::io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.logs.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run a test with captured tracing output
fn with_tracing<F, Fut>(f: F) -> (String, Fut::Output)
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future,
{
    let logs = CapturedLogs::new();
    let logs_clone = logs.clone();

    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_writer(logs_clone)
        .with_ansi(false)
        .without_time()
        .finish();

    let result = tracing::subscriber::with_default(subscriber, || {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap()
            .block_on(f())
    });

    (logs.contents(), result)
}

/// Assert that captured logs contain the expected substring
fn assert_log(logs: &str, label: &str, expected: &str) {
    assert!(logs.contains(expected), "Should log {label}. Logs:\n{logs}",);
}

// =============================================================================
// TracedWorkspaceApi
// =============================================================================

#[test]
#[serial(tracing)]
fn traced_create_logs_entry_and_completion() {
    let (logs, result) = with_tracing(|| async {
        let traced = TracedWorkspaceApi::new(FakeWorkspaceApi::new());
        traced
            .create(&CreateRequest::new(Devfile::named("petclinic")))
            .await
    });

    assert!(result.is_ok(), "create should succeed: {:?}", result);
    assert_log(&logs, "span name", "workspace.create");
    assert_log(&logs, "devfile name", "petclinic");
    assert_log(&logs, "entry message", "creating");
    assert_log(&logs, "completion", "workspace created");
    assert_log(&logs, "timing", "elapsed_ms");
}

#[test]
#[serial(tracing)]
fn traced_start_logs_error_on_failure() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeWorkspaceApi::new();
        fake.add(workspace("ws-1", "che", "petclinic", WorkspaceStatus::Stopped));
        fake.fail(WorkspaceOp::Start, "quota exceeded");
        let traced = TracedWorkspaceApi::new(fake);
        traced.start(&WorkspaceId::new("ws-1")).await
    });

    assert!(result.is_err());
    assert_log(&logs, "span name", "workspace.start");
    assert_log(&logs, "error message", "start failed");
    assert_log(&logs, "server message", "quota exceeded");
}

#[test]
#[serial(tracing)]
fn traced_delete_logs_operation() {
    let (logs, _) = with_tracing(|| async {
        let fake = FakeWorkspaceApi::new();
        fake.add(workspace("ws-1", "che", "petclinic", WorkspaceStatus::Stopped));
        TracedWorkspaceApi::new(fake)
            .delete(&WorkspaceId::new("ws-1"))
            .await
    });

    assert_log(&logs, "span name", "workspace.delete");
    assert_log(&logs, "completion", "deleted");
}

#[tokio::test]
#[parallel(tracing)]
async fn traced_workspace_api_delegates_to_inner() {
    let fake = FakeWorkspaceApi::new();
    fake.add(workspace("ws-1", "che", "petclinic", WorkspaceStatus::Running));
    let traced = TracedWorkspaceApi::new(fake.clone());

    let listed = traced.list().await.unwrap();
    assert_eq!(listed.len(), 1);
    let stopped = traced.stop(&WorkspaceId::new("ws-1")).await.unwrap();
    assert_eq!(stopped.status, WorkspaceStatus::Stopping);
    assert_eq!(fake.calls().len(), 2);
}

// =============================================================================
// TracedDevfileAdapter
// =============================================================================

#[test]
#[serial(tracing)]
fn traced_resolve_logs_source() {
    let (logs, result) = with_tracing(|| async {
        let fake = FakeDevfileAdapter::new();
        fake.set_factory(
            "https://github.com/eclipse/che",
            "devfile.yaml",
            Some(Devfile::named("che")),
        );
        TracedDevfileAdapter::new(fake)
            .resolve_factory("https://github.com/eclipse/che")
            .await
    });

    assert!(result.is_ok());
    assert_log(&logs, "span name", "devfile.resolve");
    assert_log(&logs, "location", "https://github.com/eclipse/che");
    assert_log(&logs, "completion", "factory resolved");
    assert_log(&logs, "source", "devfile.yaml");
}

#[test]
#[serial(tracing)]
fn traced_registry_logs_error_on_failure() {
    let (logs, result) = with_tracing(|| async {
        TracedDevfileAdapter::new(FakeDevfileAdapter::new())
            .fetch_registry_index("https://registry.example/")
            .await
    });

    assert!(result.is_err());
    assert_log(&logs, "span name", "devfile.registry");
    assert_log(&logs, "error message", "registry fetch failed");
}

#[tokio::test]
#[parallel(tracing)]
async fn traced_devfile_adapter_delegates_to_inner() {
    let fake = FakeDevfileAdapter::new();
    fake.set_devfile("https://example.com/devfile.yaml", "metadata:\n  name: x\n");
    let traced = TracedDevfileAdapter::new(fake.clone());

    let text = traced
        .fetch_devfile("https://example.com/devfile.yaml")
        .await
        .unwrap();
    assert!(text.contains("name: x"));
    assert_eq!(fake.calls().len(), 1);
}

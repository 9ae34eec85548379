// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::commands::test_support::{exit_code, setup};
use dash_core::test_support::{ide_runtime, workspace};
use dash_core::{AlertVariant, WorkspaceStatus};

const IDE_URL: &str = "https://che.example.com/ws-1/theia/";

fn args(namespace: &str, name: &str) -> IdeArgs {
    IdeArgs {
        namespace: namespace.to_string(),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn running_workspace_reports_ide_url() {
    let ctx = setup();
    let mut ws = workspace("ws-1", "che", "my-ws", WorkspaceStatus::Running);
    ws.runtime = Some(ide_runtime(IDE_URL));
    ctx.api.add(ws);

    let report = run(&args("che", "my-ws&from=factory"), &ctx.dashboard, OutputFormat::Json).await;

    assert_eq!(report.outcome, "completed");
    assert_eq!(report.ide_path.as_deref(), Some("/ide/che/my-ws"));
    let run = report.run.as_ref().unwrap();
    assert_eq!(run.context().ide_url.as_deref(), Some(IDE_URL));
    assert_eq!(
        report.render(false),
        format!(
            "✓ [1/3] Initializing\n\
             ✓ [2/3] Waiting for workspace to start\n\
             ✓ [3/3] Open IDE\n\
             Workspace: my-ws\n\
             Route: /ide/che/my-ws\n\
             IDE: {IDE_URL}\n"
        )
    );
}

#[tokio::test]
async fn unknown_workspace_exits_non_zero() {
    let ctx = setup();
    ctx.api
        .add(workspace("ws-1", "che", "other", WorkspaceStatus::Stopped));

    let err = handle(args("che", "my-ws"), &ctx.dashboard, OutputFormat::Json)
        .await
        .unwrap_err();

    assert_eq!(exit_code(&err), Some(1));
    assert_eq!(
        ctx.alerts.messages(AlertVariant::Danger),
        vec!["Failed to find the target workspace."]
    );
}

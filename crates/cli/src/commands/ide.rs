// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `chedash ide` - Start a workspace if needed and print its IDE URL

use anyhow::Result;
use clap::Args;
use dash_adapters::{AlertAdapter, DevfileAdapter, Navigator, StatusChannel, WorkspaceApi};
use dash_core::{ide_path, normalize_workspace_name, IdeStep};
use dash_engine::Dashboard;

use super::RunReport;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct IdeArgs {
    /// Workspace namespace
    pub namespace: String,
    /// Workspace name
    pub name: String,
}

pub async fn handle<W, C, D, N, A>(
    args: IdeArgs,
    dashboard: &Dashboard<W, C, D, N, A>,
    format: OutputFormat,
) -> Result<()>
where
    W: WorkspaceApi,
    C: StatusChannel,
    D: DevfileAdapter,
    N: Navigator,
    A: AlertAdapter,
{
    run(&args, dashboard, format).await.print(format)
}

pub(crate) async fn run<W, C, D, N, A>(
    args: &IdeArgs,
    dashboard: &Dashboard<W, C, D, N, A>,
    format: OutputFormat,
) -> RunReport<IdeStep>
where
    W: WorkspaceApi,
    C: StatusChannel,
    D: DevfileAdapter,
    N: Navigator,
    A: AlertAdapter,
{
    let ide = dashboard.ide();
    let progress = (format == OutputFormat::Text).then(|| output::follow_steps(ide.watch()));
    let outcome = ide.run(&args.namespace, &args.name).await;
    if let Some(progress) = progress {
        progress.abort();
    }

    let route = ide_path(&args.namespace, normalize_workspace_name(&args.name));
    RunReport::new(&outcome, ide.view()).with_ide_path(Some(route))
}

#[cfg(test)]
#[path = "ide_tests.rs"]
mod tests;

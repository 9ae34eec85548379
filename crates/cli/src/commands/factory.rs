// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `chedash factory` - Create and start a workspace from a repository

use anyhow::Result;
use clap::Args;
use dash_adapters::{AlertAdapter, DevfileAdapter, Navigator, StatusChannel, WorkspaceApi};
use dash_core::{ide_path, FactoryStep};
use dash_engine::Dashboard;

use super::RunReport;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct FactoryArgs {
    /// Factory query (`?url=<repository>&...`) or a bare repository URL
    pub search: String,
}

/// Accept a bare repository URL in place of a query string.
pub fn normalize_search(raw: &str) -> String {
    let raw = raw.trim();
    if raw.starts_with("http://") || raw.starts_with("https://") {
        format!("?url={raw}")
    } else {
        raw.to_string()
    }
}

pub async fn handle<W, C, D, N, A>(
    args: FactoryArgs,
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
    let report = run(&normalize_search(&args.search), dashboard, format).await;
    report.print(format)
}

pub(crate) async fn run<W, C, D, N, A>(
    search: &str,
    dashboard: &Dashboard<W, C, D, N, A>,
    format: OutputFormat,
) -> RunReport<FactoryStep>
where
    W: WorkspaceApi,
    C: StatusChannel,
    D: DevfileAdapter,
    N: Navigator,
    A: AlertAdapter,
{
    let factory = dashboard.factory();
    let progress = (format == OutputFormat::Text).then(|| output::follow_steps(factory.watch()));
    let outcome = factory.run(search).await;
    if let Some(progress) = progress {
        progress.abort();
    }

    let run = factory.view();
    let route = outcome
        .is_completed()
        .then(|| run.as_ref()?.context().workspace_id.clone())
        .flatten()
        .and_then(|id| dashboard.store().find_by_id(id.as_str()))
        .map(|ws| ide_path(&ws.namespace, ws.name()));
    RunReport::new(&outcome, run).with_ide_path(route)
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;

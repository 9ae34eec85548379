// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `chedash sample` - Create and start a workspace from a registry sample

use anyhow::Result;
use clap::Args;
use dash_adapters::{AlertAdapter, DevfileAdapter, Navigator, StatusChannel, WorkspaceApi};
use dash_core::{ide_path, RegistryEntry};
use dash_engine::{Dashboard, LaunchError};

use super::registry::registry_urls;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

#[derive(Args)]
pub struct SampleArgs {
    /// Display name of the sample, as listed by `chedash registry`
    pub name: String,

    /// Registry base URL (repeatable; default: the configured `registry_urls`)
    #[arg(long = "registry")]
    pub registries: Vec<String>,
}

/// Case-insensitive match on the display name.
pub fn find_sample<'a>(entries: &'a [RegistryEntry], name: &str) -> Option<&'a RegistryEntry> {
    entries
        .iter()
        .find(|entry| entry.display_name.eq_ignore_ascii_case(name))
}

pub async fn handle<W, C, D, N, A>(
    args: SampleArgs,
    dashboard: &Dashboard<W, C, D, N, A>,
    configured: &str,
    format: OutputFormat,
) -> Result<()>
where
    W: WorkspaceApi,
    C: StatusChannel,
    D: DevfileAdapter,
    N: Navigator,
    A: AlertAdapter,
{
    let urls = registry_urls(&args.registries, configured)?;
    let entries = dashboard
        .resolver()
        .request_registries_metadata(&urls)
        .await?;
    let Some(entry) = find_sample(&entries, &args.name) else {
        return Err(ExitError::new(3, format!("Sample not found: {}", args.name)).into());
    };

    let workspace = match dashboard.samples().launch(entry).await {
        Ok(workspace) => workspace,
        // Already shown as an alert
        Err(LaunchError::Start(_)) => return Err(ExitError::silent(1).into()),
        Err(e) => return Err(e.into()),
    };

    let route = ide_path(&workspace.namespace, workspace.name());
    match format {
        OutputFormat::Text => {
            println!(
                "Workspace {} ({}) is starting",
                workspace.name(),
                workspace.id
            );
            println!("Route: {route}");
        }
        OutputFormat::Json => output::print_json(&serde_json::json!({
            "workspace": workspace,
            "ide_path": route,
        }))?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "sample_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `chedash workspace` - Workspace management commands

use anyhow::Result;
use clap::{Args, Subcommand};
use dash_adapters::{StatusChannel, WorkspaceApi};
use dash_core::{ide_path, Workspace, WorkspaceSettings, STACK_NAME_ATTRIBUTE};
use dash_engine::WorkspaceStore;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{self, format_time_ago, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct WorkspaceArgs {
    #[command(subcommand)]
    pub command: WorkspaceCommand,
}

#[derive(Subcommand)]
pub enum WorkspaceCommand {
    /// List workspaces, most recently modified first
    List {
        /// Maximum number of workspaces to show
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,

        /// Show all workspaces (no limit)
        #[arg(long, conflicts_with = "limit")]
        no_limit: bool,
    },
    /// Show details of a workspace
    Show {
        /// Workspace ID or `namespace/name`
        target: String,
    },
    /// Request a workspace start
    Start {
        /// Workspace ID or `namespace/name`
        target: String,
    },
    /// Request a workspace stop
    Stop {
        /// Workspace ID or `namespace/name`
        target: String,
    },
    /// Delete a workspace
    Delete {
        /// Workspace ID or `namespace/name`
        target: String,
    },
    /// Show server-side workspace settings
    Settings,
}

pub async fn handle<W, C>(
    command: WorkspaceCommand,
    store: &WorkspaceStore<W, C>,
    format: OutputFormat,
) -> Result<()>
where
    W: WorkspaceApi,
    C: StatusChannel,
{
    match command {
        WorkspaceCommand::List { limit, no_limit } => {
            store.list().await?;
            let total = store.workspaces().len();
            let workspaces = store.recent(if no_limit { total } else { limit });

            match format {
                OutputFormat::Text => {
                    if workspaces.is_empty() {
                        println!("No workspaces");
                        return Ok(());
                    }
                    list_table(&workspaces, output::should_use_color())
                        .render(&mut std::io::stdout())?;
                    if workspaces.len() < total {
                        println!(
                            "\n{}",
                            color::context(&format!(
                                "... {} more not shown. Use --no-limit or -n N to see more.",
                                total - workspaces.len()
                            ))
                        );
                    }
                }
                OutputFormat::Json => output::print_json(&workspaces)?,
            }
        }
        WorkspaceCommand::Show { target } => {
            let workspace = resolve_target(store, &target).await?;
            match format {
                OutputFormat::Text => {
                    print!("{}", format_details(&workspace, output::should_use_color()))
                }
                OutputFormat::Json => output::print_json(&workspace)?,
            }
        }
        WorkspaceCommand::Start { target } => {
            let workspace = resolve_target(store, &target).await?;
            let started = store.start(&workspace.id).await?;
            print_transition(&started, "Starting", format)?;
        }
        WorkspaceCommand::Stop { target } => {
            let workspace = resolve_target(store, &target).await?;
            let stopped = store.stop(&workspace.id).await?;
            print_transition(&stopped, "Stopping", format)?;
        }
        WorkspaceCommand::Delete { target } => {
            let workspace = resolve_target(store, &target).await?;
            store.delete(&workspace.id).await?;
            match format {
                OutputFormat::Text => println!(
                    "Deleted workspace {} ({})",
                    workspace.name(),
                    workspace.id
                ),
                OutputFormat::Json => output::print_json(&serde_json::json!({
                    "deleted": workspace.id,
                }))?,
            }
        }
        WorkspaceCommand::Settings => {
            let settings = store.settings().await?;
            match format {
                OutputFormat::Text => {
                    if settings.0.is_empty() {
                        println!("No settings");
                    } else {
                        settings_table(&settings).render(&mut std::io::stdout())?;
                    }
                }
                OutputFormat::Json => output::print_json(&settings)?,
            }
        }
    }
    Ok(())
}

/// Find a workspace by ID, or by `namespace/name`, after a fresh list.
pub(crate) async fn resolve_target<W, C>(
    store: &WorkspaceStore<W, C>,
    target: &str,
) -> Result<Workspace>
where
    W: WorkspaceApi,
    C: StatusChannel,
{
    store.list().await?;
    let found = match target.split_once('/') {
        Some((namespace, name)) => store.find_by_qualified_name(namespace, name),
        None => store.find_by_id(target),
    };
    found.ok_or_else(|| ExitError::new(3, format!("Workspace not found: {target}")).into())
}

/// Widest wire status (`STARTING`, `STOPPING`).
const STATUS_WIDTH: usize = 8;

pub(crate) fn list_table(workspaces: &[Workspace], colorize: bool) -> Table {
    let mut table = Table::with_color(
        vec![
            Column::muted("ID"),
            Column::left("NAMESPACE"),
            Column::left("NAME").with_max(40),
            Column::status("STATUS").with_min(STATUS_WIDTH),
            Column::left("UPDATED"),
        ],
        colorize,
    );
    for ws in workspaces {
        table.row(vec![
            ws.id.to_string(),
            ws.namespace.clone(),
            ws.name().to_string(),
            ws.status.to_string(),
            format_time_ago(ws.last_modified_ms()),
        ]);
    }
    table
}

fn settings_table(settings: &WorkspaceSettings) -> Table {
    let mut table = Table::new(vec![Column::left("KEY"), Column::left("VALUE")]);
    for (key, value) in &settings.0 {
        table.row(vec![key.clone(), value.clone()]);
    }
    table
}

pub(crate) fn format_details(ws: &Workspace, colorize: bool) -> String {
    let (title, status) = if colorize {
        (
            color::apply_header("Workspace:"),
            color::apply_status(ws.status.as_str()),
        )
    } else {
        ("Workspace:".to_string(), ws.status.to_string())
    };
    let mut out = format!("{title} {}\n", ws.name());
    let mut field = |label: &str, value: &str| {
        out.push_str(&format!("  {:<11}{value}\n", format!("{label}:")));
    };
    field("ID", ws.id.as_str());
    field("Namespace", &ws.namespace);
    field("Status", &status);
    field("Route", &ide_path(&ws.namespace, ws.name()));
    if let Some(url) = ws.ide_url() {
        field("IDE", url);
    }
    if let Some(stack) = ws.attributes.get(STACK_NAME_ATTRIBUTE) {
        field("Stack", stack);
    }
    field("Updated", &format_time_ago(ws.last_modified_ms()));
    out
}

fn print_transition(ws: &Workspace, verb: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!(
            "{verb} workspace {} ({}): {}",
            ws.name(),
            ws.id,
            color::status(ws.status.as_str())
        ),
        OutputFormat::Json => output::print_json(ws)?,
    }
    Ok(())
}

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! chedash - Workspace dashboard CLI

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod color;
mod commands;
mod config;
mod env;
mod exit_error;
mod logging;
mod output;
mod session;
mod table;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use commands::{factory, ide, registry, sample, workspace};
use config::Config;
use output::OutputFormat;
use session::Session;

#[derive(Parser)]
#[command(
    name = "chedash",
    version,
    about = "Workspace dashboard - create, start and open remote development workspaces"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create and start a workspace from a repository (factory link)
    Factory(factory::FactoryArgs),
    /// Start a workspace if needed and print its IDE URL
    Ide(ide::IdeArgs),
    /// Workspace management
    Workspace(workspace::WorkspaceArgs),
    /// List devfile registry samples
    Registry(registry::RegistryArgs),
    /// Create and start a workspace from a registry sample
    Sample(sample::SampleArgs),
}

fn cli_command() -> clap::Command {
    Cli::command()
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, deduplicating the chain.
///
/// If the top-level Display already contains every source message, the
/// "Caused by" chain is skipped. Otherwise the full chain is rendered.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();

    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));

    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.output;

    let Some(command) = cli.command else {
        cli_command().print_help()?;
        println!();
        return Ok(());
    };

    let config = Config::load()?;
    let _log_guard = match &config.state_dir {
        Some(dir) => Some(
            logging::setup_logging(dir)
                .with_context(|| format!("failed to open log in {}", dir.display()))?,
        ),
        None => None,
    };

    let session = Session::connect(&config)?;
    let dashboard = session.dashboard();
    let result = match command {
        Commands::Factory(args) => factory::handle(args, dashboard, format).await,
        Commands::Ide(args) => ide::handle(args, dashboard, format).await,
        Commands::Workspace(args) => {
            workspace::handle(args.command, dashboard.store(), format).await
        }
        Commands::Registry(args) => {
            registry::handle(args, dashboard.resolver(), &config.registry_urls, format).await
        }
        Commands::Sample(args) => {
            sample::handle(args, dashboard, &config.registry_urls, format).await
        }
    };
    session.close().await;
    result
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `chedash registry` - List devfile registry samples

use anyhow::{bail, Result};
use clap::Args;
use dash_adapters::DevfileAdapter;
use dash_core::RegistryEntry;
use dash_engine::DevfileResolver;

use crate::output::{self, OutputFormat};
use crate::table::{Column, Table};

#[derive(Args)]
pub struct RegistryArgs {
    /// Registry base URLs (default: the configured `registry_urls`)
    pub urls: Vec<String>,
}

/// Registries named on the command line, else the configured ones, as one
/// whitespace-separated list.
pub fn registry_urls(given: &[String], configured: &str) -> Result<String> {
    let urls = if given.is_empty() {
        configured.split_whitespace().collect::<Vec<_>>().join(" ")
    } else {
        given.join(" ")
    };
    if urls.is_empty() {
        bail!("no devfile registry configured (pass URLs or set CHEDASH_REGISTRY_URLS)");
    }
    Ok(urls)
}

pub async fn handle<D: DevfileAdapter>(
    args: RegistryArgs,
    resolver: &DevfileResolver<D>,
    configured: &str,
    format: OutputFormat,
) -> Result<()> {
    let urls = registry_urls(&args.urls, configured)?;
    let entries = resolver.request_registries_metadata(&urls).await?;

    match format {
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("No samples");
            } else {
                entry_table(&entries, output::should_use_color())
                    .render(&mut std::io::stdout())?;
            }
        }
        OutputFormat::Json => output::print_json(&entries)?,
    }
    Ok(())
}

pub(crate) fn entry_table(entries: &[RegistryEntry], colorize: bool) -> Table {
    let mut table = Table::with_color(
        vec![
            Column::left("NAME").with_max(32),
            Column::right("MEMORY"),
            Column::left("TAGS").with_max(40),
            Column::muted("DEVFILE"),
        ],
        colorize,
    );
    for entry in entries {
        table.row(vec![
            entry.display_name.clone(),
            if entry.global_memory_limit.is_empty() {
                "-".to_string()
            } else {
                entry.global_memory_limit.clone()
            },
            entry.tags.join(","),
            entry.links.self_link.clone(),
        ]);
    }
    table
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

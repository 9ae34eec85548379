// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! CLI command implementations

pub mod factory;
pub mod ide;
pub mod registry;
pub mod sample;
pub mod workspace;

#[cfg(test)]
mod test_support;

use anyhow::Result;
use dash_core::{LifecycleRun, LoaderStep, RunContext};
use dash_engine::RunOutcome;
use serde::Serialize;

use crate::color;
use crate::exit_error::ExitError;
use crate::output::{self, OutputFormat};

/// End state of a loader run, as printed by `factory` and `ide`.
#[derive(Debug, Serialize)]
pub(crate) struct RunReport<S: LoaderStep> {
    pub outcome: &'static str,
    pub run: Option<LifecycleRun<S>>,
    /// Dashboard route of the workspace's IDE page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ide_path: Option<String>,
}

impl<S: LoaderStep> RunReport<S> {
    pub fn new(outcome: &RunOutcome, run: Option<LifecycleRun<S>>) -> Self {
        let outcome = match outcome {
            RunOutcome::Completed => "completed",
            RunOutcome::Failed(_) => "failed",
            RunOutcome::Unchanged => "unchanged",
            RunOutcome::Superseded => "superseded",
        };
        Self {
            outcome,
            run,
            ide_path: None,
        }
    }

    pub fn with_ide_path(mut self, path: Option<String>) -> Self {
        self.ide_path = path;
        self
    }

    pub fn render(&self, colorize: bool) -> String {
        let Some(run) = &self.run else {
            return String::new();
        };
        let mut out = output::render_run(run, colorize);
        let RunContext {
            devfile_location_info,
            workspace_name,
            ide_url,
            ..
        } = run.context();
        let mut detail = |label: &str, value: &str| {
            let label = if colorize {
                color::apply_header(label)
            } else {
                label.to_string()
            };
            out.push_str(&format!("{label} {value}\n"));
        };
        if !devfile_location_info.is_empty() {
            detail("Devfile:", devfile_location_info);
        }
        if !workspace_name.is_empty() {
            detail("Workspace:", workspace_name);
        }
        if let Some(path) = &self.ide_path {
            detail("Route:", path);
        }
        if let Some(url) = ide_url {
            detail("IDE:", url);
        }
        out
    }

    /// Print the report. A failed run exits non-zero without another
    /// message, since the alert already said what went wrong.
    pub fn print(self, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => print!("{}", self.render(output::should_use_color())),
            OutputFormat::Json => output::print_json(&self)?,
        }
        if self.outcome == "failed" {
            return Err(ExitError::silent(1).into());
        }
        Ok(())
    }
}

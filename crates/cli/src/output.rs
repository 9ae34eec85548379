// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use dash_core::{LifecycleRun, LoaderStep};
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::color;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

/// Whether stdout gets color, see [`crate::color::should_colorize`].
pub fn should_use_color() -> bool {
    crate::color::should_colorize()
}

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Relative age of an epoch-ms timestamp ("5s", "2m", "1h30m", "3d").
/// Zero means unknown and renders as "-".
pub fn format_time_ago(epoch_ms: u64) -> String {
    let now_ms = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64;
    format_age(epoch_ms, now_ms)
}

pub(crate) fn format_age(epoch_ms: u64, now_ms: u64) -> String {
    if epoch_ms == 0 {
        return "-".to_string();
    }
    let secs = now_ms.saturating_sub(epoch_ms) / 1000;
    match secs {
        0..=59 => format!("{secs}s"),
        60..=3599 => format!("{}m", secs / 60),
        3600..=86399 => match (secs % 3600) / 60 {
            0 => format!("{}h", secs / 3600),
            m => format!("{}h{}m", secs / 3600, m),
        },
        _ => format!("{}d", secs / 86400),
    }
}

/// One line per step with its glyph. Child steps are indented under their
/// parent.
pub fn render_run<S: LoaderStep>(run: &LifecycleRun<S>, colorize: bool) -> String {
    let total = S::all().len();
    let mut out = String::new();
    for step in S::all() {
        let indent = if step.parent().is_some() { "  " } else { "" };
        out.push_str(&format!(
            "{indent}{} [{}/{total}] {}\n",
            color::glyph(run.glyph(*step), colorize),
            step.index(),
            step.label(),
        ));
    }
    out
}

/// Echo each newly entered step to stderr until aborted.
pub fn follow_steps<S: LoaderStep>(
    mut rx: watch::Receiver<Option<LifecycleRun<S>>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut printed = 0;
        let mut target = None;
        loop {
            let lines = {
                let run = rx.borrow_and_update();
                match run.as_ref() {
                    Some(run) => {
                        if target.as_deref() != Some(run.target()) {
                            target = Some(run.target().to_string());
                            printed = 0;
                        }
                        let lines = step_lines(run, printed);
                        printed = run.history().len();
                        lines
                    }
                    None => Vec::new(),
                }
            };
            for line in lines {
                eprintln!("{}", color::context(&line));
            }
            if rx.changed().await.is_err() {
                return;
            }
        }
    })
}

/// Progress lines for the steps entered after the first `skip`.
pub(crate) fn step_lines<S: LoaderStep>(run: &LifecycleRun<S>, skip: usize) -> Vec<String> {
    let total = S::all().len();
    run.history()
        .iter()
        .skip(skip)
        .map(|step| format!("[{}/{total}] {}", step.index(), step.label()))
        .collect()
}

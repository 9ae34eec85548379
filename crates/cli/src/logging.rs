// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! File logging

use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;

pub const LOG_FILE: &str = "chedash.log";

/// Route `tracing` output to `{state_dir}/chedash.log`.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`. The returned
/// guard flushes pending lines when dropped, so hold it for the whole run.
pub fn setup_logging(state_dir: &Path) -> std::io::Result<WorkerGuard> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(state_dir)?;

    let file_appender = tracing_appender::rolling::never(state_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // A second init (tests, embedding) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(non_blocking))
        .try_init();

    Ok(guard)
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use std::time::Duration;

fn non_empty(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|s| !s.is_empty())
}

fn parse_duration_ms(var: &str) -> Option<Duration> {
    non_empty(var)
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

// --- Config file ---

/// Explicit config file path (CHEDASH_CONFIG).
pub fn config_path() -> Option<PathBuf> {
    non_empty("CHEDASH_CONFIG").map(PathBuf::from)
}

// --- State directory ---

pub fn state_dir() -> Option<PathBuf> {
    non_empty("CHEDASH_STATE_DIR").map(PathBuf::from)
}

/// Fallback state directory: XDG_STATE_HOME/chedash > ~/.local/state/chedash
pub fn default_state_dir() -> Option<PathBuf> {
    if let Some(xdg) = non_empty("XDG_STATE_HOME") {
        return Some(PathBuf::from(xdg).join("chedash"));
    }
    dirs::home_dir().map(|home| home.join(".local/state/chedash"))
}

// --- Server ---

pub fn url() -> Option<String> {
    non_empty("CHEDASH_URL")
}

pub fn token() -> Option<String> {
    non_empty("CHEDASH_TOKEN")
}

pub fn api_context() -> Option<String> {
    non_empty("CHEDASH_API_CONTEXT")
}

pub fn websocket_context() -> Option<String> {
    non_empty("CHEDASH_WEBSOCKET_CONTEXT")
}

pub fn registry_urls() -> Option<String> {
    non_empty("CHEDASH_REGISTRY_URLS")
}

/// Raw reconnect policy, parsed by the config layer.
pub fn reconnect() -> Option<String> {
    non_empty("CHEDASH_RECONNECT")
}

// --- Loader timing ---

pub fn settle_ms() -> Option<Duration> {
    parse_duration_ms("CHEDASH_SETTLE_MS")
}

pub fn start_timeout_ms() -> Option<Duration> {
    parse_duration_ms("CHEDASH_START_TIMEOUT_MS")
}

// --- Color ---

pub fn no_color() -> bool {
    std::env::var("NO_COLOR").is_ok_and(|v| v == "1")
}

pub fn force_color() -> bool {
    std::env::var("COLOR").is_ok_and(|v| v == "1")
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// REST request timeout (default: 30000ms).
pub fn http_timeout() -> Duration {
    parse_duration_ms("CHEDASH_HTTP_TIMEOUT_MS").unwrap_or(Duration::from_secs(30))
}

/// Push channel connect timeout (default: 10000ms).
pub fn ws_connect_timeout() -> Duration {
    parse_duration_ms("CHEDASH_WS_CONNECT_TIMEOUT_MS").unwrap_or(Duration::from_secs(10))
}

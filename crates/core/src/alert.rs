// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User-facing alerts

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Severity of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertVariant {
    Success,
    Info,
    Warning,
    Danger,
}

impl AlertVariant {
    /// How long an alert of this severity stays visible.
    pub fn ttl(&self) -> Duration {
        match self {
            AlertVariant::Success => Duration::from_millis(2000),
            AlertVariant::Info => Duration::from_millis(8000),
            AlertVariant::Warning | AlertVariant::Danger => Duration::from_millis(20000),
        }
    }
}

impl fmt::Display for AlertVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertVariant::Success => "success",
            AlertVariant::Info => "info",
            AlertVariant::Warning => "warning",
            AlertVariant::Danger => "danger",
        };
        f.write_str(s)
    }
}

/// An alert, keyed by a caller-supplied id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertItem {
    pub key: String,
    pub variant: AlertVariant,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl AlertItem {
    pub fn new(key: impl Into<String>, variant: AlertVariant, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            variant,
            title: title.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        success = { AlertVariant::Success, 2000 },
        info = { AlertVariant::Info, 8000 },
        warning = { AlertVariant::Warning, 20000 },
        danger = { AlertVariant::Danger, 20000 },
    )]
    fn ttl_by_variant(variant: AlertVariant, ms: u64) {
        assert_eq!(variant.ttl(), Duration::from_millis(ms));
    }

    #[test]
    fn success_expires_before_danger() {
        assert!(AlertVariant::Success.ttl() < AlertVariant::Danger.ttl());
    }
}

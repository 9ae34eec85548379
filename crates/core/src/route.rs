// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dashboard routes

/// Route of the IDE page for a workspace.
pub fn ide_path(namespace: &str, name: &str) -> String {
    format!("/ide/{}/{}", namespace, name)
}

/// Workspace name as carried by an IDE route.
///
/// Links built by older factories append query-like suffixes with `&`;
/// everything from the first `&` is dropped.
pub fn normalize_workspace_name(raw: &str) -> &str {
    raw.split('&').next().unwrap_or(raw)
}

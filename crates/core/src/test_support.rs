// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test helpers for use across crates.
//!
//! Gated behind `#[cfg(any(test, feature = "test-support"))]`.

use crate::{
    Devfile, Event, Machine, Server, Workspace, WorkspaceId, WorkspaceRuntime, WorkspaceStatus,
};
use indexmap::IndexMap;

// ── Builders ────────────────────────────────────────────────────────────────

pub fn workspace(id: &str, namespace: &str, name: &str, status: WorkspaceStatus) -> Workspace {
    Workspace {
        id: WorkspaceId::new(id),
        namespace: namespace.to_string(),
        status,
        devfile: Devfile::named(name),
        runtime: None,
        attributes: IndexMap::new(),
    }
}

/// Runtime with a single machine exposing one IDE server at `ide_url`.
pub fn ide_runtime(ide_url: &str) -> WorkspaceRuntime {
    let mut servers = IndexMap::new();
    servers.insert(
        "theia".to_string(),
        Server {
            url: ide_url.to_string(),
            attributes: [("type".to_string(), "ide".to_string())].into_iter().collect(),
        },
    );
    let mut machines = IndexMap::new();
    machines.insert(
        "theia-ide".to_string(),
        Machine {
            servers,
            attributes: IndexMap::new(),
        },
    );
    WorkspaceRuntime {
        active_env: Some("default".to_string()),
        machines,
    }
}

// ── Event factory functions ─────────────────────────────────────────────────

pub fn status_push_event(id: &str, status: &str) -> Event {
    Event::WorkspaceStatusPushed {
        id: WorkspaceId::new(id),
        status: status.to_string(),
        error: None,
    }
}

pub fn workspace_updated_event(workspace: Workspace) -> Event {
    Event::WorkspaceUpdated { workspace }
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! JSON-RPC 2.0 frames spoken on the workspace master websocket

use dash_core::{Event, WorkspaceId};
use serde::Deserialize;
use serde_json::{json, Value};

pub const STATUS_METHOD: &str = "workspace/statusChanged";
pub const RUNTIME_LOG_METHOD: &str = "runtime/log";
pub const INSTALLER_LOG_METHOD: &str = "installer/log";

/// Notification methods subscribed for each workspace.
pub const SUBSCRIBED_METHODS: [&str; 3] =
    [STATUS_METHOD, RUNTIME_LOG_METHOD, INSTALLER_LOG_METHOD];

fn scoped_request(request_id: u64, action: &str, method: &str, id: &WorkspaceId) -> String {
    json!({
        "jsonrpc": "2.0",
        "id": request_id,
        "method": action,
        "params": {
            "method": method,
            "scope": { "workspaceId": id.as_str() },
        },
    })
    .to_string()
}

pub fn subscribe_request(request_id: u64, method: &str, id: &WorkspaceId) -> String {
    scoped_request(request_id, "subscribe", method, id)
}

pub fn unsubscribe_request(request_id: u64, method: &str, id: &WorkspaceId) -> String {
    scoped_request(request_id, "unSubscribe", method, id)
}

#[derive(Deserialize)]
struct Notification {
    method: String,
    #[serde(default)]
    params: Value,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StatusParams {
    workspace_id: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuntimeId {
    workspace_id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogParams {
    runtime_id: RuntimeId,
    text: String,
}

/// Turn an inbound frame into an event.
///
/// Responses to our own requests, unknown methods and malformed frames
/// yield `None`.
pub fn parse_notification(text: &str) -> Option<Event> {
    let notification: Notification = serde_json::from_str(text).ok()?;
    match notification.method.as_str() {
        STATUS_METHOD => {
            let params: StatusParams = serde_json::from_value(notification.params).ok()?;
            Some(Event::WorkspaceStatusPushed {
                id: WorkspaceId::new(params.workspace_id),
                status: params.status,
                error: params.error.filter(|e| !e.is_empty()),
            })
        }
        RUNTIME_LOG_METHOD | INSTALLER_LOG_METHOD => {
            let params: LogParams = serde_json::from_value(notification.params).ok()?;
            Some(Event::WorkspaceLog {
                id: WorkspaceId::new(params.runtime_id.workspace_id),
                line: params.text,
            })
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "jsonrpc_tests.rs"]
mod tests;

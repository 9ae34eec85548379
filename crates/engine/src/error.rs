// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine

use dash_adapters::{ApiError, DevfileError};
use dash_core::{DevfileParseError, FactoryParamsError, WorkspaceId};
use std::time::Duration;
use thiserror::Error;

/// Server message when there is one, else the whole error.
pub(crate) fn cause(e: &ApiError) -> String {
    e.server_message()
        .map(str::to_string)
        .unwrap_or_else(|| e.to_string())
}

/// Failures of workspace repository operations.
///
/// Each names the operation and, where there is one, the workspace.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to request workspaces: \n{message}")]
    List { message: String },
    #[error("Failed to create a new workspace from the devfile: \n{message}")]
    Create { message: String },
    #[error("Failed to start the workspace, ID: {id}, {message}")]
    Start { id: WorkspaceId, message: String },
    #[error("Failed to stop the workspace, ID: {id}, {message}")]
    Stop { id: WorkspaceId, message: String },
    #[error("Failed to update the workspace, ID: {id}, {message}")]
    Update { id: WorkspaceId, message: String },
    #[error("Failed to delete the workspace, ID: {id}, {message}")]
    Delete { id: WorkspaceId, message: String },
    #[error("Failed to fetch the workspace, ID: {id}, {message}")]
    Refresh { id: WorkspaceId, message: String },
    #[error("Failed to fetch settings, \n{message}")]
    Settings { message: String },
}

impl StoreError {
    /// The underlying server (or transport) message.
    pub fn cause(&self) -> &str {
        match self {
            StoreError::List { message }
            | StoreError::Create { message }
            | StoreError::Settings { message }
            | StoreError::Start { message, .. }
            | StoreError::Stop { message, .. }
            | StoreError::Update { message, .. }
            | StoreError::Delete { message, .. }
            | StoreError::Refresh { message, .. } => message,
        }
    }
}

/// Failures to obtain a devfile.
#[derive(Debug, Error)]
pub enum ResolutionError {
    #[error(transparent)]
    Source(#[from] DevfileError),
    #[error("no devfile found for {location}")]
    NoDevfile { location: String },
    #[error("resolved {actual} while {expected} was requested")]
    LocationMismatch { expected: String, actual: String },
}

/// Terminal failures of a loader run. Display is the message shown to the user.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error(transparent)]
    MissingParameter(#[from] FactoryParamsError),
    #[error("Failed to resolve a devfile.")]
    Resolution(#[source] ResolutionError),
    #[error("Failed to create a workspace.")]
    Create(#[source] StoreError),
    #[error("{message}")]
    Start { message: String },
    #[error("{message}")]
    Fetch { message: String },
    #[error("Failed to find the target workspace.")]
    NotFound,
    #[error("Don't know what to open, IDE url is not defined.")]
    IdeEndpointNotFound,
    #[error("Workspace {name} did not start within {}s.", .timeout.as_secs())]
    Timeout { name: String, timeout: Duration },
}

/// Failures of launching a registry sample.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("another launch is in progress")]
    Busy,
    #[error("Failed to fetch the devfile: {0}")]
    Fetch(#[source] ResolutionError),
    #[error("Failed to parse the devfile: {0}")]
    Parse(#[from] DevfileParseError),
    #[error(transparent)]
    Create(StoreError),
    #[error(transparent)]
    Start(StoreError),
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Factory navigation parameters.
//!
//! A factory link carries the source location in its `url` query parameter.
//! A fixed allow-list of keys is forwarded to workspace creation as
//! attributes; every non-location parameter is additionally preserved in the
//! `stackName` attribute so the workspace remembers how it was made.

use indexmap::IndexMap;
use thiserror::Error;

/// Query keys forwarded verbatim as workspace attributes.
pub const FORWARDED_ATTRIBUTES: [&str; 2] =
    ["workspaceDeploymentLabels", "workspaceDeploymentAnnotations"];

/// Attribute recording the factory link a workspace was created from.
pub const STACK_NAME_ATTRIBUTE: &str = "stackName";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactoryParamsError {
    #[error("Failed to find search params.")]
    MissingSearch,
    #[error("Failed to find a repository URL.")]
    MissingLocation,
}

/// Parsed factory query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryParams {
    pub location: String,
    pub attributes: IndexMap<String, String>,
}

impl FactoryParams {
    /// Parse a navigation search string (with or without the leading `?`).
    pub fn parse(search: &str) -> Result<Self, FactoryParamsError> {
        let query = search.strip_prefix('?').unwrap_or(search);
        if query.is_empty() {
            return Err(FactoryParamsError::MissingSearch);
        }

        let mut location = String::new();
        let mut attributes = IndexMap::new();
        let mut extra = String::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if key == "url" {
                location = value.into_owned();
                continue;
            }
            if FORWARDED_ATTRIBUTES.contains(&key.as_ref()) {
                attributes.insert(key.to_string(), value.to_string());
            }
            extra.push(if extra.is_empty() { '?' } else { '&' });
            extra.push_str(&key);
            extra.push('=');
            extra.push_str(&value);
        }

        if location.is_empty() {
            return Err(FactoryParamsError::MissingLocation);
        }
        attributes.insert(STACK_NAME_ATTRIBUTE.to_string(), format!("{location}{extra}"));
        Ok(Self {
            location,
            attributes,
        })
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;

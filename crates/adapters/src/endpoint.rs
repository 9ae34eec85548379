// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Server addresses derived from the dashboard origin

use url::Url;

pub const DEFAULT_API_CONTEXT: &str = "/api";
pub const DEFAULT_WEBSOCKET_CONTEXT: &str = "/api/websocket";

/// Where the workspace server lives and how to authenticate against it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    origin: Url,
    api_context: String,
    websocket_context: String,
    token: Option<String>,
}

impl Endpoint {
    /// Build from any URL on the server; only its origin is kept.
    pub fn new(url: &str) -> Result<Self, url::ParseError> {
        let parsed = Url::parse(url)?;
        let origin = Url::parse(&parsed.origin().ascii_serialization())?;
        Ok(Self {
            origin,
            api_context: DEFAULT_API_CONTEXT.to_string(),
            websocket_context: DEFAULT_WEBSOCKET_CONTEXT.to_string(),
            token: None,
        })
    }

    pub fn with_api_context(mut self, context: impl Into<String>) -> Self {
        self.api_context = context.into();
        self
    }

    pub fn with_websocket_context(mut self, context: impl Into<String>) -> Self {
        self.websocket_context = context.into();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// REST URL for `path` under the API context.
    pub fn api_url(&self, path: &str) -> Result<Url, url::ParseError> {
        let context = self.api_context.trim_end_matches('/');
        self.origin.join(&format!("{}{}", context, path))
    }

    /// Push channel URL: the origin with a websocket scheme, the websocket
    /// context, and the session token as a query parameter when present.
    pub fn websocket_url(&self) -> Result<Url, url::ParseError> {
        let origin = self.origin.origin().ascii_serialization();
        let ws_origin = match origin.strip_prefix("http") {
            Some(rest) => format!("ws{rest}"),
            None => origin,
        };
        let mut url = Url::parse(&format!("{}{}", ws_origin, self.websocket_context))?;
        if let Some(token) = &self.token {
            url.query_pairs_mut().append_pair("token", token);
        }
        Ok(url)
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared REST client for the workspace server

use crate::endpoint::Endpoint;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

/// Errors from REST calls
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid response body: {0}")]
    Json(#[from] serde_json::Error),
    /// Non-success status; `message` is the server's explanation when it sent one.
    #[error("{message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    /// The server's own message, when the failure carried one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } if !message.is_empty() => Some(message),
            _ => None,
        }
    }
}

#[derive(Deserialize)]
struct ServerErrorBody {
    message: String,
}

/// Thin wrapper over `reqwest::Client` that knows the endpoint and token.
#[derive(Debug, Clone)]
pub struct RestClient {
    http: reqwest::Client,
    endpoint: Endpoint,
}

impl RestClient {
    pub fn new(endpoint: Endpoint) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("chedash/", env!("CARGO_PKG_VERSION")))
            .timeout(crate::env::http_timeout())
            .build()?;
        Ok(Self { http, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn api_url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.endpoint.api_url(path)?)
    }

    /// Request against the API with the session token attached.
    pub fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let request = self.http.request(method, url);
        match self.endpoint.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Request to an arbitrary location, without credentials.
    pub fn anonymous(&self, url: &str) -> RequestBuilder {
        self.http.get(url)
    }

    pub async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = Self::check(request.send().await?).await?;
        let text = response.text().await?;
        Ok(serde_json::from_str(&text)?)
    }

    pub async fn send_text(request: RequestBuilder) -> Result<String, ApiError> {
        let response = Self::check(request.send().await?).await?;
        Ok(response.text().await?)
    }

    pub async fn send_empty(request: RequestBuilder) -> Result<(), ApiError> {
        Self::check(request.send().await?).await?;
        Ok(())
    }

    async fn check(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        Err(server_error(status.as_u16(), &text))
    }
}

/// Build the error for a non-success response body.
pub(crate) fn server_error(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ServerErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) if body.trim().is_empty() => format!("server responded with status {status}"),
        Err(_) => body.trim().to_string(),
    };
    ApiError::Server { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        che_message = { 409, r#"{"message":"Workspace with name 'my-ws' already exists"}"#, "Workspace with name 'my-ws' already exists" },
        plain_text = { 502, "Bad Gateway\n", "Bad Gateway" },
        empty = { 404, "", "server responded with status 404" },
    )]
    fn server_error_message(status: u16, body: &str, expected: &str) {
        let err = server_error(status, body);
        assert_eq!(err.to_string(), expected);
        assert!(matches!(err, ApiError::Server { status: s, .. } if s == status));
    }

    #[test]
    fn server_message_only_for_server_errors() {
        let err = server_error(500, r#"{"message":"boom"}"#);
        assert_eq!(err.server_message(), Some("boom"));
        let err = ApiError::Url(url::ParseError::EmptyHost);
        assert_eq!(err.server_message(), None);
    }

    #[test]
    fn client_builds_with_endpoint() {
        let endpoint = Endpoint::new("https://che.example.com").unwrap();
        let client = RestClient::new(endpoint).unwrap();
        assert_eq!(
            client.api_url("/workspace").unwrap().as_str(),
            "https://che.example.com/api/workspace"
        );
    }
}

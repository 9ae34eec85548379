// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[test]
fn new_keeps_only_origin() {
    let endpoint = Endpoint::new("https://che.example.com/dashboard/#/workspaces").unwrap();
    assert_eq!(endpoint.origin().as_str(), "https://che.example.com/");
}

#[test]
fn api_url_uses_context() {
    let endpoint = Endpoint::new("https://che.example.com").unwrap();
    assert_eq!(
        endpoint.api_url("/workspace/ws-1/runtime").unwrap().as_str(),
        "https://che.example.com/api/workspace/ws-1/runtime"
    );
}

#[test]
fn api_url_with_custom_context() {
    let endpoint = Endpoint::new("http://localhost:8080")
        .unwrap()
        .with_api_context("/che/api/");
    assert_eq!(
        endpoint.api_url("/workspace").unwrap().as_str(),
        "http://localhost:8080/che/api/workspace"
    );
}

#[parameterized(
    https = { "https://che.example.com", "wss://che.example.com/api/websocket" },
    http_with_port = { "http://localhost:8080", "ws://localhost:8080/api/websocket" },
)]
fn websocket_url_swaps_scheme(origin: &str, expected: &str) {
    let endpoint = Endpoint::new(origin).unwrap();
    assert_eq!(endpoint.websocket_url().unwrap().as_str(), expected);
}

#[test]
fn websocket_url_carries_token() {
    let endpoint = Endpoint::new("https://che.example.com")
        .unwrap()
        .with_websocket_context("/ws")
        .with_token(Some("abc.def".to_string()));
    assert_eq!(
        endpoint.websocket_url().unwrap().as_str(),
        "wss://che.example.com/ws?token=abc.def"
    );
}

#[test]
fn empty_token_is_ignored() {
    let endpoint = Endpoint::new("https://che.example.com")
        .unwrap()
        .with_token(Some(String::new()));
    assert_eq!(endpoint.token(), None);
    assert!(endpoint.websocket_url().unwrap().query().is_none());
}

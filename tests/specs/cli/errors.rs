//! CLI error reporting specs

use crate::prelude::*;

#[test]
fn missing_server_url_is_reported() {
    cli()
        .args(&["workspace", "list"])
        .fails()
        .code(1)
        .stderr_has("no server URL configured");
}

#[test]
fn invalid_server_url_is_reported() {
    cli()
        .args(&["workspace", "list"])
        .server("not a url")
        .fails()
        .stderr_has("invalid server URL: not a url");
}

#[test]
fn unknown_config_key_is_reported() {
    cli()
        .args(&["workspace", "list"])
        .config("colour = \"blue\"\n")
        .fails()
        .stderr_has("invalid config");
}

#[test]
fn factory_without_repository_url_fails_with_alert() {
    // Nothing listens on port 9; the factory fails before any request
    cli()
        .args(&["factory", "?ref=main"])
        .server("http://127.0.0.1:9")
        .fails()
        .code(1)
        .stderr_has("danger: Failed to find a repository URL.")
        .stderr_lacks("Error:");
}

#[test]
fn registry_without_urls_is_reported() {
    cli()
        .args(&["registry"])
        .server("http://127.0.0.1:9")
        .fails()
        .stderr_has("no devfile registry configured");
}

#[test]
fn unknown_subcommand_is_a_usage_error() {
    cli()
        .args(&["workspaces"])
        .fails()
        .code(2)
        .stderr_has("unrecognized subcommand");
}

//! `chedash workspace list` specs

use crate::prelude::*;

#[test]
fn lists_workspaces_newest_first() {
    let server = MockServer::json(WORKSPACES);

    let run = cli()
        .args(&["workspace", "list"])
        .server(&server.url())
        .passes()
        .stdout_has("NAMESPACE")
        .stdout_has("workspace-web")
        .stdout_has("RUNNING")
        .stdout_has("STOPPED");

    let stdout = run.stdout();
    let web = stdout.find("workspace-web").unwrap();
    let api = stdout.find("workspace-api").unwrap();
    assert!(web < api, "newest workspace should come first\n{stdout}");
    assert!(server
        .requests()
        .iter()
        .any(|r| r.starts_with("GET /api/workspace ")));
}

#[test]
fn json_output_is_the_workspace_list() {
    let server = MockServer::json(WORKSPACES);

    let json = cli()
        .args(&["workspace", "list", "-o", "json"])
        .server(&server.url())
        .passes()
        .json();

    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["id"], "workspace-web");
    assert_eq!(list[0]["status"], "RUNNING");
}

#[test]
fn limit_reports_hidden_workspaces() {
    let server = MockServer::json(WORKSPACES);

    cli()
        .args(&["workspace", "list", "-n", "1"])
        .server(&server.url())
        .passes()
        .stdout_has("workspace-web")
        .stdout_lacks("workspace-api")
        .stdout_has("1 more not shown");
}

#[test]
fn empty_list_says_so() {
    let server = MockServer::json("[]");

    cli()
        .args(&["workspace", "list"])
        .server(&server.url())
        .passes()
        .stdout_eq("No workspaces\n");
}

#[test]
fn server_failure_message_is_shown() {
    let server = MockServer::respond(500, r#"{"message":"backend unavailable"}"#);

    cli()
        .args(&["workspace", "list"])
        .server(&server.url())
        .fails()
        .code(1)
        .stderr_has("Failed to request workspaces")
        .stderr_has("backend unavailable");
}

#[test]
fn api_context_is_configurable() {
    let server = MockServer::json("[]");

    cli()
        .args(&["workspace", "list"])
        .server(&server.url())
        .env("CHEDASH_API_CONTEXT", "/che-api")
        .passes();

    assert!(server
        .requests()
        .iter()
        .any(|r| r.starts_with("GET /che-api/workspace ")));
}

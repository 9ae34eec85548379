//! `chedash workspace show` specs

use crate::prelude::*;

#[test]
fn shows_workspace_by_qualified_name() {
    let server = MockServer::json(WORKSPACES);

    cli()
        .args(&["workspace", "show", "che/api"])
        .server(&server.url())
        .passes()
        .stdout_has("Workspace: api")
        .stdout_has("workspace-api")
        .stdout_has("/ide/che/api")
        .stdout_has("Go");
}

#[test]
fn shows_workspace_by_id_as_json() {
    let server = MockServer::json(WORKSPACES);

    let json = cli()
        .args(&["workspace", "show", "workspace-web", "-o", "json"])
        .server(&server.url())
        .passes()
        .json();

    assert_eq!(json["namespace"], "che");
    assert_eq!(json["devfile"]["metadata"]["name"], "web");
}

#[test]
fn unknown_workspace_exits_with_not_found() {
    let server = MockServer::json(WORKSPACES);

    cli()
        .args(&["workspace", "show", "che/missing"])
        .server(&server.url())
        .fails()
        .code(3)
        .stderr_has("Workspace not found: che/missing");
}

//! CLI help and version specs

use crate::prelude::*;

#[test]
fn no_arguments_prints_usage() {
    cli().passes().stdout_has("Usage:").stdout_has("factory");
}

#[test]
fn help_lists_every_command() {
    let run = cli().args(&["--help"]).passes();
    for command in ["factory", "ide", "workspace", "registry", "sample"] {
        assert!(
            run.stdout().contains(command),
            "help should list {command}\nstdout: {}",
            run.stdout()
        );
    }
}

#[test]
fn workspace_help_lists_subcommands() {
    cli()
        .args(&["workspace", "--help"])
        .passes()
        .stdout_has("list")
        .stdout_has("show")
        .stdout_has("start")
        .stdout_has("stop")
        .stdout_has("delete")
        .stdout_has("settings");
}

#[test]
fn version_is_printed() {
    cli().args(&["--version"]).passes().stdout_has("chedash 0.1");
}

#[test]
fn help_does_not_need_a_server() {
    cli()
        .args(&["factory", "--help"])
        .passes()
        .stdout_has("Usage:")
        .stderr_lacks("no server URL configured");
}

// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use yare::parameterized;

#[parameterized(
    empty = { "", FactoryParamsError::MissingSearch },
    bare_question_mark = { "?", FactoryParamsError::MissingSearch },
    no_url = { "?policies.create=perclick", FactoryParamsError::MissingLocation },
    empty_url = { "?url=", FactoryParamsError::MissingLocation },
)]
fn parse_rejects(search: &str, expected: FactoryParamsError) {
    assert_eq!(FactoryParams::parse(search).unwrap_err(), expected);
}

#[test]
fn parse_location_only() {
    let params = FactoryParams::parse("?url=https://example.com/repo").unwrap();
    assert_eq!(params.location, "https://example.com/repo");
    assert_eq!(params.attributes.len(), 1);
    assert_eq!(params.attributes["stackName"], "https://example.com/repo");
}

#[test]
fn parse_without_leading_question_mark() {
    let params = FactoryParams::parse("url=https://example.com/repo").unwrap();
    assert_eq!(params.location, "https://example.com/repo");
}

#[test]
fn parse_decodes_location() {
    let params =
        FactoryParams::parse("?url=https%3A%2F%2Fgithub.com%2Forg%2Frepo%3Fref%3Dmain").unwrap();
    assert_eq!(params.location, "https://github.com/org/repo?ref=main");
}

#[test]
fn parse_forwards_allow_listed_attributes() {
    let params = FactoryParams::parse(
        "?workspaceDeploymentLabels=a%3Db&url=https://example.com/repo&workspaceDeploymentAnnotations=c%3Dd&other=1",
    )
    .unwrap();
    let keys: Vec<&str> = params.attributes.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec![
            "workspaceDeploymentLabels",
            "workspaceDeploymentAnnotations",
            "stackName"
        ]
    );
    assert_eq!(params.attributes["workspaceDeploymentLabels"], "a=b");
    assert_eq!(params.attributes["workspaceDeploymentAnnotations"], "c=d");
}

#[test]
fn stack_name_keeps_every_other_parameter_in_order() {
    let params =
        FactoryParams::parse("?url=https://example.com/repo&policies.create=perclick&workspaceDeploymentLabels=x")
            .unwrap();
    assert_eq!(
        params.attributes["stackName"],
        "https://example.com/repo?policies.create=perclick&workspaceDeploymentLabels=x"
    );
    assert!(!params.attributes.contains_key("policies.create"));
}

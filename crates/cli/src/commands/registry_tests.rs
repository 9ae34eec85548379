// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::commands::test_support::{entry, setup};

#[test]
fn given_urls_win_over_configured() {
    let given = vec!["https://a/".to_string(), "https://b/".to_string()];

    assert_eq!(
        registry_urls(&given, "https://c/").unwrap(),
        "https://a/ https://b/"
    );
    assert_eq!(
        registry_urls(&[], "  https://c/\n https://d/ ").unwrap(),
        "https://c/ https://d/"
    );
}

#[test]
fn no_registry_is_an_error() {
    let err = registry_urls(&[], " ").unwrap_err();

    assert!(err.to_string().starts_with("no devfile registry configured"));
}

#[test]
fn table_lists_entries() {
    let entries = vec![entry("Go", "1686Mi", &["Go", "Debian"]), entry("Java", "", &[])];

    let mut buf = Vec::new();
    entry_table(&entries, false).render(&mut buf).unwrap();

    assert_eq!(
        String::from_utf8(buf).unwrap(),
        "NAME  MEMORY  TAGS       DEVFILE\n\
         Go    1686Mi  Go,Debian  https://registry.example.com/devfiles/go/devfile.yaml\n\
         Java       -             https://registry.example.com/devfiles/java/devfile.yaml\n"
    );
}

#[tokio::test]
async fn entries_are_fetched_from_every_registry() {
    let ctx = setup();
    ctx.devfiles
        .set_registry("https://a/", vec![entry("Go", "1Gi", &[])]);
    ctx.devfiles
        .set_registry("https://b/", vec![entry("Java", "2Gi", &[])]);

    handle(
        RegistryArgs {
            urls: vec!["https://a/".to_string(), "https://b/".to_string()],
        },
        ctx.dashboard.resolver(),
        "",
        OutputFormat::Json,
    )
    .await
    .unwrap();

    let names: Vec<String> = ctx
        .dashboard
        .resolver()
        .registry()
        .into_iter()
        .map(|e| e.display_name)
        .collect();
    assert_eq!(names, vec!["Go", "Java"]);
}

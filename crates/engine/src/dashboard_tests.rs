// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use crate::test_helpers::{settle, setup};
use dash_adapters::ChannelCall;
use dash_core::test_support::workspace;
use dash_core::WorkspaceStatus;

#[tokio::test]
async fn pushes_reach_the_store_in_order() {
    let ctx = setup();
    ctx.api
        .add(workspace("ws-1", "che", "my-ws", WorkspaceStatus::Stopped));
    ctx.dashboard.store().list().await.unwrap();

    assert!(ctx.channel.push("ws-1", "STARTING"));
    assert!(ctx.channel.push("ws-1", "RUNNING"));
    assert!(ctx.channel.push_log("ws-1", "pulling image"));
    settle().await;

    let store = ctx.dashboard.store();
    assert_eq!(store.find_by_id("ws-1").unwrap().status, WorkspaceStatus::Running);
    assert_eq!(store.logs("ws-1"), vec!["pulling image"]);
}

#[tokio::test]
async fn pushes_for_unsubscribed_workspaces_are_not_delivered() {
    let ctx = setup();

    assert!(!ctx.channel.push("ws-9", "RUNNING"));
}

#[tokio::test]
async fn shutdown_releases_subscriptions() {
    let ctx = setup();
    ctx.api
        .add(workspace("ws-1", "che", "my-ws", WorkspaceStatus::Running));
    ctx.dashboard.store().list().await.unwrap();
    assert!(ctx.channel.is_subscribed("ws-1"));

    ctx.dashboard.shutdown().await;

    assert_eq!(ctx.channel.calls().last(), Some(&ChannelCall::UnsubscribeAll));
    assert!(ctx.channel.subscriptions().is_empty());
}

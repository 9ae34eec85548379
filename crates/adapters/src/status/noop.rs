// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op push channel.

use super::{ChannelError, StatusChannel};
use async_trait::async_trait;
use dash_core::WorkspaceId;

/// Push channel that never delivers anything.
///
/// Used by one-shot commands that only read snapshots.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpStatusChannel;

impl NoOpStatusChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl StatusChannel for NoOpStatusChannel {
    async fn subscribe(&self, _id: &WorkspaceId) -> Result<(), ChannelError> {
        Ok(())
    }

    async fn unsubscribe_all(&self) -> Result<(), ChannelError> {
        Ok(())
    }
}

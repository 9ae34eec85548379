// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Key generators for alerts and fake server records

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

pub trait IdGen: Clone + Send + Sync {
    fn next(&self) -> String;
}

/// Random v4 UUIDs.
#[derive(Clone, Default)]
pub struct UuidIdGen;

impl IdGen for UuidIdGen {
    fn next(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// `{prefix}-1`, `{prefix}-2`, ... Clones share one counter.
#[derive(Clone)]
pub struct SequentialIdGen {
    prefix: Arc<str>,
    issued: Arc<AtomicU64>,
}

impl SequentialIdGen {
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: Arc::from(prefix),
            issued: Arc::default(),
        }
    }
}

impl IdGen for SequentialIdGen {
    fn next(&self) -> String {
        let n = self.issued.fetch_add(1, Ordering::Relaxed) + 1;
        format!("{}-{n}", self.prefix)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;

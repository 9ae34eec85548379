// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Loader step enumerations.
//!
//! Steps are ordered by their index and runs only move forward through them.
//! A step with children (a "parent") is never entered directly: it is shown
//! in progress while any of its children is current.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A step of a loader state machine.
pub trait LoaderStep:
    Copy + Ord + Eq + fmt::Debug + Serialize + Send + Sync + 'static
{
    /// Entry step of every run.
    const INITIAL: Self;

    /// Every step, in order.
    fn all() -> &'static [Self];

    /// 1-based index shown to the user.
    fn index(&self) -> u8;

    fn label(&self) -> &'static str;

    fn parent(&self) -> Option<Self> {
        None
    }

    fn is_parent(&self) -> bool {
        Self::all().iter().any(|s| s.parent() == Some(*self))
    }

    /// Whether `other` is this step or one of its children.
    fn covers(&self, other: Self) -> bool {
        *self == other || other.parent() == Some(*self)
    }
}

/// Steps of creating a workspace from a factory link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FactoryStep {
    Initializing,
    LookingForDevfile,
    ApplyingDevfile,
    CreateWorkspace,
    StartWorkspace,
    OpenIde,
}

impl LoaderStep for FactoryStep {
    const INITIAL: Self = FactoryStep::Initializing;

    fn all() -> &'static [Self] {
        &[
            FactoryStep::Initializing,
            FactoryStep::LookingForDevfile,
            FactoryStep::ApplyingDevfile,
            FactoryStep::CreateWorkspace,
            FactoryStep::StartWorkspace,
            FactoryStep::OpenIde,
        ]
    }

    fn index(&self) -> u8 {
        match self {
            FactoryStep::Initializing => 1,
            FactoryStep::LookingForDevfile => 2,
            FactoryStep::ApplyingDevfile => 3,
            FactoryStep::CreateWorkspace => 4,
            FactoryStep::StartWorkspace => 5,
            FactoryStep::OpenIde => 6,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            FactoryStep::Initializing => "Initializing",
            FactoryStep::LookingForDevfile => "Looking for devfile",
            FactoryStep::ApplyingDevfile => "Applying devfile",
            FactoryStep::CreateWorkspace => "Creating a workspace",
            FactoryStep::StartWorkspace => "Waiting for workspace to start",
            FactoryStep::OpenIde => "Open IDE",
        }
    }

    fn parent(&self) -> Option<Self> {
        match self {
            FactoryStep::ApplyingDevfile | FactoryStep::CreateWorkspace => {
                Some(FactoryStep::LookingForDevfile)
            }
            _ => None,
        }
    }
}

/// Steps of opening an existing workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdeStep {
    Initializing,
    StartWorkspace,
    OpenIde,
}

impl LoaderStep for IdeStep {
    const INITIAL: Self = IdeStep::Initializing;

    fn all() -> &'static [Self] {
        &[IdeStep::Initializing, IdeStep::StartWorkspace, IdeStep::OpenIde]
    }

    fn index(&self) -> u8 {
        match self {
            IdeStep::Initializing => 1,
            IdeStep::StartWorkspace => 2,
            IdeStep::OpenIde => 3,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            IdeStep::Initializing => "Initializing",
            IdeStep::StartWorkspace => "Waiting for workspace to start",
            IdeStep::OpenIde => "Open IDE",
        }
    }
}

/// Icon shown next to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepGlyph {
    Done,
    InProgress,
    Failed,
    Pending,
}

impl fmt::Display for StepGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepGlyph::Done => "✓",
            StepGlyph::InProgress => "…",
            StepGlyph::Failed => "✗",
            StepGlyph::Pending => " ",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
